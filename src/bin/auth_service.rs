use std::sync::Arc;

use authgate::app::{build_auth_app, init_tracing, serve};
use authgate::auth::users::UserDirectory;
use authgate::config::AuthServiceConfig;
use authgate::state::AuthState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AuthServiceConfig::from_env()?;

    // Stand-in for the external user store: a directory seeded from
    // SEED_USER_* variables, or a single dev user when unset.
    let users = UserDirectory::seed(vec![(
        std::env::var("SEED_USER_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1),
        std::env::var("SEED_USER_EMAIL").unwrap_or_else(|_| "dev@example.com".into()),
        std::env::var("SEED_USER_PHONE").ok(),
        std::env::var("SEED_USER_PASSWORD").unwrap_or_else(|_| "dev-password".into()),
    )])?;

    let state = AuthState::init(&config, Arc::new(users))?;
    serve(build_auth_app(state), "8081").await
}
