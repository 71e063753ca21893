use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::auth::dto::LoginRequest;
use crate::error::AppError;

pub const USER_NOT_FOUND: &str = "User with such credentials does not exist.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// User record as resolved by the lookup collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// Resolves a user record from login credentials.
///
/// This is the boundary to the persistence collaborator: given credentials,
/// return a user record. Failures propagate untranslated to the caller.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_by_credentials(&self, credentials: &LoginRequest) -> Result<User, AppError>;
}

/// In-memory reference implementation of [`UserLookup`], seeded at startup.
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Seeds a directory from `(id, email, phone, password)` tuples,
    /// hashing each password.
    pub fn seed(entries: Vec<(i64, String, Option<String>, String)>) -> anyhow::Result<Self> {
        let users = entries
            .into_iter()
            .map(|(id, email, phone, password)| {
                Ok(User {
                    id,
                    email,
                    phone,
                    password_hash: hash_password(&password)?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { users })
    }
}

#[async_trait]
impl UserLookup for UserDirectory {
    async fn find_by_credentials(&self, credentials: &LoginRequest) -> Result<User, AppError> {
        let user = self
            .users
            .iter()
            .find(|u| match (&credentials.email, &credentials.phone) {
                (Some(email), _) => u.email == *email,
                (None, Some(phone)) => u.phone.as_deref() == Some(phone.as_str()),
                (None, None) => false,
            })
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))?;

        if !verify_password(&credentials.password, &user.password_hash)? {
            warn!(user_id = user.id, "password mismatch");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }
        Ok(user.clone())
    }
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        AppError::Internal(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn directory() -> UserDirectory {
        UserDirectory::seed(vec![(
            7,
            "jane@example.com".into(),
            Some("+1555123".into()),
            "p@ssw0rd".into(),
        )])
        .expect("seed directory")
    }

    fn login(email: Option<&str>, phone: Option<&str>, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn finds_user_by_email() {
        let user = directory()
            .find_by_credentials(&login(Some("jane@example.com"), None, "p@ssw0rd"))
            .await
            .expect("find");
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn finds_user_by_phone() {
        let user = directory()
            .find_by_credentials(&login(None, Some("+1555123"), "p@ssw0rd"))
            .await
            .expect("find");
        assert_eq!(user.email, "jane@example.com");
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let err = directory()
            .find_by_credentials(&login(Some("ghost@example.com"), None, "p@ssw0rd"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let err = directory()
            .find_by_credentials(&login(Some("jane@example.com"), None, "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("correct-horse").expect("hash");
        assert!(verify_password("correct-horse", &hash).expect("verify"));
        assert!(!verify_password("battery-staple", &hash).expect("verify"));
    }
}
