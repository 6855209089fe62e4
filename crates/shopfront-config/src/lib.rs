//! # Shopfront Config
//!
//! Configuration loaded from environment variables:
//!
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: bind address
//! - [`jwt`]: token signing secret, lifetime and leeway
//! - [`cors`]: allowed origins
//! - [`rate_limit`]: token-bucket limits for the auth endpoints
//!
//! ```ignore
//! use shopfront_config::{CorsConfig, DatabaseConfig, JwtConfig, RateLimitConfig, ServerConfig};
//!
//! let database = DatabaseConfig::from_env()?;
//! let jwt_config = JwtConfig::from_env();
//! let rate_limit_config = RateLimitConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;
pub mod server;

use thiserror::Error;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use rate_limit::{ClientIpKeyExtractor, RateLimitConfig};
pub use server::ServerConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Reads `name`, falling back to `default` when unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads `name`, distinguishing unset (`Ok(None)`) from unparsable (`Err`).
pub(crate) fn env_parse<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(None),
    }
}
