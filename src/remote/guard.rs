use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::ValidateTokensRequest;
use crate::error::AppError;
use crate::state::ResourceState;

use super::client::AuthServiceClient;

pub const AUTH_HEADER_REQUIRED: &str = "Authorization header is required!";
pub const BEARER_TOKEN_REQUIRED: &str = "Authorization Bearer token is required!";
pub const JWT_TOKEN_REQUIRED: &str = "Authorization JWT token is required!";

lazy_static! {
    static ref BEARER_JWT_RE: Regex =
        Regex::new(r"^Bearer\s+([A-Za-z0-9\-_]+\.[A-Za-z0-9\-_]+\.[A-Za-z0-9\-_]+)$").unwrap();
}

impl AuthServiceClient {
    /// Extracts the bearer credential and delegates its validation to the
    /// authorization service.
    ///
    /// Failure precedence, most generic to most specific; the first
    /// matching condition wins:
    /// 1. no `Authorization` header,
    /// 2. header without a `Bearer ` marker,
    /// 3. bearer value that is not a three-segment JWT,
    /// 4. whatever the remote validation decides.
    pub async fn check_bearer_or_fail(&self, headers: &HeaderMap) -> Result<(), AppError> {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized(AUTH_HEADER_REQUIRED.into()))?;

        if !header.contains("Bearer ") {
            return Err(AppError::Unauthorized(BEARER_TOKEN_REQUIRED.into()));
        }

        let token = BEARER_JWT_RE
            .captures(header)
            .and_then(|c| c.get(1))
            .ok_or_else(|| AppError::Unauthorized(JWT_TOKEN_REQUIRED.into()))?
            .as_str();

        self.validate_tokens_or_fail(&ValidateTokensRequest {
            access_token: Some(token.to_string()),
            refresh_token: None,
        })
        .await
    }
}

/// Rejects the request unless the authorization service vouches for its
/// bearer token. If the client aborts the request, dropping this future
/// also aborts the in-flight outbound validation call.
pub struct AuthGuard;

#[async_trait]
impl<S> FromRequestParts<S> for AuthGuard
where
    S: Send + Sync,
    ResourceState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = ResourceState::from_ref(state);
        state.auth.check_bearer_or_fail(&parts.headers).await?;
        Ok(AuthGuard)
    }
}
