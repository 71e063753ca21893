use axum::Router;

use crate::state::AuthState;

pub mod dto;
pub mod handlers;
pub mod service;
pub mod users;

pub fn router() -> Router<AuthState> {
    Router::new().merge(handlers::auth_routes())
}
