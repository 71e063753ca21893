use std::sync::Arc;

use tracing::{info, instrument};

use crate::auth::dto::{AuthResponse, LoginRequest, ValidateTokensRequest, ValidateTokensResponse};
use crate::auth::users::UserLookup;
use crate::error::AppError;
use crate::token::{TokenEngine, TokenKind, TokenPayload};

pub const ONLY_EMAIL_OR_PHONE: &str = "Only email or phone should be specified.";
pub const EMAIL_OR_PHONE_REQUIRED: &str = "Authorization requires either email or phone.";
pub const TOKENS_REQUIRED: &str = "Verification requires either access or refresh tokens.";

/// Issues token pairs for resolved users and verifies presented pairs.
/// Stateless apart from the engine and the lookup collaborator.
pub struct Authenticator {
    engine: TokenEngine,
    users: Arc<dyn UserLookup>,
}

impl Authenticator {
    pub fn new(engine: TokenEngine, users: Arc<dyn UserLookup>) -> Self {
        Self { engine, users }
    }

    /// Validates credential shape, resolves the user and issues an
    /// access/refresh pair. Lookup failures propagate untranslated.
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, AppError> {
        check_login_request(credentials)?;

        let user = self.users.find_by_credentials(credentials).await?;

        let access_token = self.engine.issue(
            TokenKind::Access,
            TokenPayload::for_user(TokenKind::Access, &user),
        )?;
        let refresh_token = self.engine.issue(
            TokenKind::Refresh,
            TokenPayload::for_user(TokenKind::Refresh, &user),
        )?;

        info!(user_id = user.id, "token pair issued");
        Ok(AuthResponse {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Returns a fresh validity verdict for each token present in the
    /// request. At least one token must be supplied.
    pub fn verify_token_pair(
        &self,
        request: &ValidateTokensRequest,
    ) -> Result<ValidateTokensResponse, AppError> {
        if request.is_empty() {
            return Err(AppError::Validation(TOKENS_REQUIRED.into()));
        }

        let mut response = ValidateTokensResponse::default();
        if let Some(token) = &request.access_token {
            response.access_token = Some(self.engine.check_validity(TokenKind::Access, token)?);
        }
        if let Some(token) = &request.refresh_token {
            response.refresh_token = Some(self.engine.check_validity(TokenKind::Refresh, token)?);
        }
        Ok(response)
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}

fn check_login_request(credentials: &LoginRequest) -> Result<(), AppError> {
    match (&credentials.email, &credentials.phone) {
        (Some(_), Some(_)) => Err(AppError::Validation(ONLY_EMAIL_OR_PHONE.into())),
        (None, None) => Err(AppError::Validation(EMAIL_OR_PHONE_REQUIRED.into())),
        _ => Ok(()),
    }
}
