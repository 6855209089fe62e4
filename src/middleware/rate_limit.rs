//! Per-client token bucket on the auth endpoints.

use std::sync::Arc;

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::GovernorLayer;

use shopfront_config::{ClientIpKeyExtractor, RateLimitConfig};

pub type RateLimiterLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// `None` when rate limiting is disabled.
#[must_use]
pub fn auth_rate_limiter(config: &RateLimitConfig) -> Option<RateLimiterLayer> {
    let governor_config = config.auth_governor_config()?;
    tracing::debug!(
        per_second = config.auth_per_second,
        burst_size = config.auth_burst_size,
        "Auth rate limiter enabled"
    );
    Some(GovernorLayer::new(Arc::new(governor_config)))
}
