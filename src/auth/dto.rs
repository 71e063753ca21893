use serde::{Deserialize, Serialize};

use crate::auth::users::User;
use crate::token::TokenVerdict;

/// Body of `POST /auth/login`. Exactly one of email/phone must be given.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Successful login reply: a fresh token pair plus the resolved user.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Body of `POST /auth/validate/tokens`. At least one token is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokensRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl ValidateTokensRequest {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// One verdict per token the caller asked about.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokensResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<TokenVerdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<TokenVerdict>,
}
