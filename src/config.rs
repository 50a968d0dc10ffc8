use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub database: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mongodb_uri = std::env::var("MONGODB_URI")?;
        let database = std::env::var("MONGODB_DB").unwrap_or_else(|_| "wellness".into());

        // An unset secret degrades to the empty string, which is still a
        // usable HMAC key; startup warns instead of failing.
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        if secret.is_empty() {
            warn!("JWT_SECRET is empty; tokens will be signed with a degenerate key");
        }

        let jwt = JwtConfig {
            secret,
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
        };
        Ok(Self {
            mongodb_uri,
            database,
            jwt,
        })
    }
}
