/**
 * Server Configuration
 *
 * Configuration is loaded once from environment variables at startup
 * (with `.env` support via dotenv in `main`). `DATABASE_URL` and
 * `JWT_SECRET` are required; startup fails without them. There is no
 * built-in fallback secret: the signing key is operator-supplied
 * configuration, never a hard-coded value.
 */

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
/// 10 hours, the access-token lifetime.
const DEFAULT_ACCESS_TTL_SECS: i64 = 10 * 60 * 60;
/// 24 hours, the refresh-token lifetime.
const DEFAULT_REFRESH_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for environment variable {0}")]
    Invalid(&'static str),
}

/// Process-wide server configuration, read-only after startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let port = optional_parsed("SERVER_PORT", DEFAULT_PORT)?;
        let access_ttl_secs = optional_parsed("JWT_ACCESS_TTL_SECS", DEFAULT_ACCESS_TTL_SECS)?;
        let refresh_ttl_secs = optional_parsed("JWT_REFRESH_TTL_SECS", DEFAULT_REFRESH_TTL_SECS)?;

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            access_ttl_secs,
            refresh_ttl_secs,
        })
    }
}

fn optional_parsed<T: std::str::FromStr>(
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}
