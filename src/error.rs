use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Closed set of failure classes crossing a service boundary.
///
/// Each variant carries its HTTP status as data so handlers never dispatch
/// on error names. Token-class errors are classified once, at the token
/// engine, and are never re-mapped upstream.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Caller supplied a structurally invalid request.
    #[error("{0}")]
    Validation(String),
    /// Caller's credential is absent, malformed, expired or cryptographically invalid.
    #[error("{0}")]
    Unauthorized(String),
    /// Referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Subsystem-level fault. Logged server-side, surfaced opaquely.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error name as reported in the response body.
    pub fn name(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::Unauthorized(_) => "UnauthorizedError",
            AppError::NotFound(_) => "NotFoundError",
            AppError::Internal(_) => "InternalServerError",
        }
    }
}

/// Wire shape of an error reply.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(ref message) = self {
            error!(%message, "internal fault");
        }
        let body = ErrorBody {
            name: self.name().to_string(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_error_classes() {
        assert_eq!(
            AppError::Validation("v".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("u".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("n".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("i".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn body_carries_name_and_message() {
        let err = AppError::Unauthorized("Authorization token is expired.".into());
        assert_eq!(err.name(), "UnauthorizedError");
        assert_eq!(err.to_string(), "Authorization token is expired.");
    }
}
