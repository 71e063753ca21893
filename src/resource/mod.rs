use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::remote::AuthGuard;
use crate::state::ResourceState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: String,
}

pub fn router() -> Router<ResourceState> {
    Router::new().route("/profile", get(profile))
}

/// Example protected resource. The guard runs before the handler body;
/// reaching this point means the authorization service accepted the token.
async fn profile(_guard: AuthGuard) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "authorized".into(),
    })
}
