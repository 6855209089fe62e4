use std::env;

use crate::env_or;

pub const DEFAULT_SECRET: &str = "shopfront-dev-secret-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds
    pub access_token_expiry: i64,
    /// Clock skew tolerated on `exp`, in seconds
    pub leeway: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            access_token_expiry: 86_400,
            leeway: 0,
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET is not set, using the development default");
                defaults.secret
            }
        };

        Self {
            secret,
            access_token_expiry: env_or("JWT_ACCESS_EXPIRY", defaults.access_token_expiry),
            leeway: env_or("JWT_LEEWAY", defaults.leeway),
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}
