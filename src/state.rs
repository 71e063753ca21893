use std::sync::Arc;

use crate::auth::service::Authenticator;
use crate::auth::users::UserLookup;
use crate::config::{AuthServiceConfig, ResourceServiceConfig};
use crate::keys::KeyPair;
use crate::remote::AuthServiceClient;
use crate::token::TokenEngine;

/// Shared state of the authorization service.
#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<Authenticator>,
}

impl AuthState {
    /// Loads key material and wires the authenticator. Fails fast if the
    /// key files are unreadable.
    pub fn init(config: &AuthServiceConfig, users: Arc<dyn UserLookup>) -> anyhow::Result<Self> {
        let keys = Arc::new(KeyPair::load(
            &config.jwt.private_key_path,
            &config.jwt.public_key_path,
        )?);
        let engine = TokenEngine::new(keys, &config.jwt);
        Ok(Self {
            authenticator: Arc::new(Authenticator::new(engine, users)),
        })
    }

    pub fn from_parts(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

/// Shared state of the resource service.
#[derive(Clone)]
pub struct ResourceState {
    pub auth: Arc<AuthServiceClient>,
}

impl ResourceState {
    pub fn init(config: &ResourceServiceConfig) -> anyhow::Result<Self> {
        Ok(Self {
            auth: Arc::new(AuthServiceClient::new(config)?),
        })
    }
}