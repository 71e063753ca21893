use serde::{Deserialize, Serialize};

use crate::auth::users::User;

/// Distinguishes short-lived access tokens from long-lived refresh tokens.
/// The two are never interchangeable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Human-readable label used in composed validation messages.
    pub fn label(self) -> &'static str {
        match self {
            TokenKind::Access => "Access",
            TokenKind::Refresh => "Refresh",
        }
    }
}

/// Minimal claim set embedded verbatim in the signed token body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPayload {
    /// User's unique email.
    pub sub: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

impl TokenPayload {
    /// Derives the claim set for a user record. Pure and total.
    pub fn for_user(kind: TokenKind, user: &User) -> Self {
        Self {
            sub: user.email.clone(),
            user_id: user.id,
            kind,
        }
    }
}

/// Full claims of a verified token. Produced only by successful
/// verification, never constructed by hand outside the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub payload: TokenPayload,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expires-at (unix seconds).
    pub exp: i64,
    /// Issuer.
    pub iss: String,
}
