use anyhow::Context;
use serde::Deserialize;

use crate::auth::secret;

/// Token policy. The secret is owned here and injected into the codec
/// and middleware, never reached for through a global.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Reads configuration from the environment. When `JWT_SECRET` is not
    /// set, a process-local secret is generated; tokens then do not survive
    /// a restart and cannot be shared across instances.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => secret::generate()?,
        };
        let jwt = JwtConfig {
            secret,
            token_ttl_hours: std::env::var("TOKEN_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(secret::DEFAULT_TOKEN_TTL_HOURS),
        };
        Ok(Self { database_url, jwt })
    }
}
