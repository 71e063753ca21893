use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::auth::dto::{AuthResponse, LoginRequest, ValidateTokensRequest, ValidateTokensResponse};
use crate::error::AppError;
use crate::state::AuthState;

pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/validate/tokens", post(validate_tokens))
}

/// Authorizes a user and returns access and refresh JWT tokens.
#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = state.authenticator.login(&payload).await?;
    Ok(Json(response))
}

/// Verifies access and refresh JWT tokens.
#[instrument(skip(state, payload))]
async fn validate_tokens(
    State(state): State<AuthState>,
    Json(payload): Json<ValidateTokensRequest>,
) -> Result<Json<ValidateTokensResponse>, AppError> {
    let response = state.authenticator.verify_token_pair(&payload)?;
    Ok(Json(response))
}
