use sqlx::PgPool;

use shopfront_config::{CorsConfig, DatabaseConfig, JwtConfig, RateLimitConfig};
use shopfront_db::init_db_pool;

use crate::modules::items::store::ItemStore;

/// Everything a handler may touch, built once at start-up.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub items: ItemStore,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            db,
            jwt_config,
            cors_config: CorsConfig::default(),
            rate_limit_config: RateLimitConfig::default(),
            items: ItemStore::default(),
        }
    }

    pub fn with_cors_config(mut self, cors_config: CorsConfig) -> Self {
        self.cors_config = cors_config;
        self
    }

    pub fn with_rate_limit_config(mut self, rate_limit_config: RateLimitConfig) -> Self {
        self.rate_limit_config = rate_limit_config;
        self
    }
}

pub async fn init_app_state(database: &DatabaseConfig) -> anyhow::Result<AppState> {
    let db = init_db_pool(database).await?;

    Ok(AppState::new(db, JwtConfig::from_env())
        .with_cors_config(CorsConfig::from_env())
        .with_rate_limit_config(RateLimitConfig::from_env()))
}
