use reqwest::{header::CONTENT_TYPE, StatusCode};
use serde::Serialize;
use tracing::error;

use crate::auth::dto::{ValidateTokensRequest, ValidateTokensResponse};
use crate::config::ResourceServiceConfig;
use crate::error::AppError;

use super::validator::validate_tokens_response;

pub const FAILED_TO_SEND_REQUEST: &str = "Failed to send HTTP request.";
pub const FAILED_TO_VALIDATE_TOKENS: &str = "Failed to validate auth tokens!";
pub const AUTH_TOKENS_NOT_PROVIDED: &str = "Auth tokens not provided!";

pub const VALIDATE_TOKENS_PATH: &str = "/api/v1/auth/validate/tokens";

/// Body of a successful remote reply: parsed JSON or raw text.
///
/// Callers must handle both branches; a text body where JSON was expected
/// is a contract violation on the remote side, not an authentication
/// failure.
#[derive(Debug)]
pub enum RemotePayload {
    Json(serde_json::Value),
    Text(String),
}

/// HTTP client for the authorization service's validation endpoint.
///
/// The underlying pool is bounded and every request carries a hard timeout
/// so a stalled authorization service cannot exhaust request slots. No
/// retries happen at this layer.
pub struct AuthServiceClient {
    http: reqwest::Client,
    origin: String,
}

impl AuthServiceClient {
    pub fn new(config: &ResourceServiceConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()?;
        Ok(Self {
            http,
            origin: config.auth_origin.trim_end_matches('/').to_string(),
        })
    }

    /// Delegates trust to the authorization service: posts the tokens in
    /// question and turns the remote verdicts into an accept/reject
    /// decision. Transport and remote-service errors surface as-is.
    pub async fn validate_tokens_or_fail(
        &self,
        request: &ValidateTokensRequest,
    ) -> Result<(), AppError> {
        if request.is_empty() {
            return Err(AppError::Unauthorized(AUTH_TOKENS_NOT_PROVIDED.into()));
        }

        match self.post(VALIDATE_TOKENS_PATH, request).await? {
            RemotePayload::Json(value) => {
                let response: ValidateTokensResponse = serde_json::from_value(value.clone())
                    .map_err(|_| {
                        error!(payload = %value, path = VALIDATE_TOKENS_PATH,
                            "failed to parse validation response");
                        AppError::Internal(FAILED_TO_VALIDATE_TOKENS.into())
                    })?;
                validate_tokens_response(request, &response)
            }
            RemotePayload::Text(raw) => {
                error!(payload = %raw, path = VALIDATE_TOKENS_PATH,
                    "non-JSON validation response");
                Err(AppError::Internal(FAILED_TO_VALIDATE_TOKENS.into()))
            }
        }
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<RemotePayload, AppError> {
        let url = format!("{}{}", self.origin, path);
        let response = self.http.post(&url).json(body).send().await.map_err(|e| {
            error!(error = %e, %url, "failed to send POST request");
            AppError::Internal(FAILED_TO_SEND_REQUEST.into())
        })?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);
        let text = response.text().await.map_err(|e| {
            error!(error = %e, %url, "failed to read response body");
            AppError::Internal(FAILED_TO_SEND_REQUEST.into())
        })?;

        if !status.is_success() {
            return Err(map_remote_error(status, text));
        }
        if is_json {
            if let Ok(value) = serde_json::from_str(&text) {
                return Ok(RemotePayload::Json(value));
            }
        }
        Ok(RemotePayload::Text(text))
    }
}

/// Maps a non-2xx remote status onto the matching error class so the
/// resource service's handler reports the true failure.
fn map_remote_error(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::BAD_REQUEST => AppError::Validation(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::Internal(message),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use super::*;

    pub(crate) fn client_for(origin: &str) -> AuthServiceClient {
        AuthServiceClient::new(&ResourceServiceConfig {
            auth_origin: origin.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_idle_per_host: 2,
        })
        .expect("build client")
    }

    fn access_request(token: &str) -> ValidateTokensRequest {
        ValidateTokensRequest {
            access_token: Some(token.to_string()),
            refresh_token: None,
        }
    }

    #[tokio::test]
    async fn rejects_empty_request_before_any_network_call() {
        let client = client_for("http://127.0.0.1:1");
        let err = client
            .validate_tokens_or_fail(&ValidateTokensRequest::default())
            .await
            .unwrap_err();
        match err {
            AppError::Unauthorized(msg) => assert_eq!(msg, AUTH_TOKENS_NOT_PROVIDED),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn accepts_valid_verdicts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", VALIDATE_TOKENS_PATH)
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"accessToken": "a.b.c"}),
            ))
            .with_header("content-type", "application/json")
            .with_body(r#"{"accessToken": {"isValid": true, "isExpired": false}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        client
            .validate_tokens_or_fail(&access_request("a.b.c"))
            .await
            .expect("valid token accepted");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejects_with_composed_verdict_messages() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", VALIDATE_TOKENS_PATH)
            .with_header("content-type", "application/json")
            .with_body(r#"{"accessToken": {"isValid": false, "isExpired": true}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .validate_tokens_or_fail(&access_request("a.b.c"))
            .await
            .unwrap_err();
        match err {
            AppError::Unauthorized(msg) => {
                assert_eq!(msg, "Access token is expired!\nAccess token is invalid!")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_body_is_an_internal_fault() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", VALIDATE_TOKENS_PATH)
            .with_header("content-type", "text/plain")
            .with_body("surprise")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .validate_tokens_or_fail(&access_request("a.b.c"))
            .await
            .unwrap_err();
        match err {
            AppError::Internal(msg) => assert_eq!(msg, FAILED_TO_VALIDATE_TOKENS),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn remote_status_maps_onto_error_classes() {
        let cases = [
            (400, "bad body"),
            (401, "denied"),
            (404, "missing"),
            (500, "broken"),
        ];
        for (status, body) in cases {
            let mut server = mockito::Server::new_async().await;
            server
                .mock("POST", VALIDATE_TOKENS_PATH)
                .with_status(status)
                .with_body(body)
                .create_async()
                .await;

            let client = client_for(&server.url());
            let err = client
                .validate_tokens_or_fail(&access_request("a.b.c"))
                .await
                .unwrap_err();
            match (status, &err) {
                (400, AppError::Validation(msg))
                | (401, AppError::Unauthorized(msg))
                | (404, AppError::NotFound(msg))
                | (500, AppError::Internal(msg)) => assert_eq!(msg, body),
                other => panic!("unexpected mapping: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn unreachable_remote_is_an_internal_fault() {
        // Nothing listens on port 1.
        let client = client_for("http://127.0.0.1:1");
        let err = client
            .validate_tokens_or_fail(&access_request("a.b.c"))
            .await
            .unwrap_err();
        match err {
            AppError::Internal(msg) => assert_eq!(msg, FAILED_TO_SEND_REQUEST),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
