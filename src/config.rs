use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Token signing configuration for the authorization service.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    pub issuer: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceConfig {
    pub jwt: JwtConfig,
}

impl AuthServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt = JwtConfig {
            private_key_path: std::env::var("JWT_PRIVATE_KEY_PATH")?.into(),
            public_key_path: std::env::var("JWT_PUBLIC_KEY_PATH")?.into(),
            issuer: std::env::var("JWT_TOKEN_ISSUER").unwrap_or_else(|_| "authgate".into()),
            access_ttl: Duration::from_secs(env_parse("JWT_ACCESS_TTL_SECS", 15 * 60)),
            refresh_ttl: Duration::from_secs(env_parse("JWT_REFRESH_TTL_SECS", 14 * 24 * 3600)),
        };
        Ok(Self { jwt })
    }
}

/// Outbound HTTP configuration for the resource service's validation calls.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceServiceConfig {
    pub auth_origin: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub max_idle_per_host: usize,
}

impl ResourceServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            auth_origin: std::env::var("AUTH_SERVICE_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:8081".into()),
            request_timeout: Duration::from_secs(env_parse("HTTP_TIMEOUT_SECS", 30)),
            connect_timeout: Duration::from_secs(env_parse("HTTP_CONNECT_TIMEOUT_SECS", 10)),
            max_idle_per_host: env_parse("HTTP_MAX_IDLE_PER_HOST", 8),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parse_falls_back_on_garbage() {
        std::env::set_var("AUTHGATE_TEST_TTL", "not-a-number");
        assert_eq!(env_parse("AUTHGATE_TEST_TTL", 42u64), 42);
        std::env::remove_var("AUTHGATE_TEST_TTL");
    }

    #[test]
    fn resource_config_has_defaults() {
        let cfg = ResourceServiceConfig::from_env().expect("config");
        assert!(cfg.auth_origin.starts_with("http"));
        assert!(cfg.request_timeout > Duration::ZERO);
    }
}
