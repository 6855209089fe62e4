//! Token-bucket rate limiting for the auth endpoints.
//!
//! - `RATE_LIMIT_ENABLED`: default `true`
//! - `RATE_LIMIT_AUTH_PER_SECOND`: seconds between token replenishments (default 2)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket size (default 10)
//! - `RATE_LIMIT_TRUST_PROXY_HEADERS`: default `false`
//!
//! Clients are keyed by the socket peer address. Only when proxy headers are
//! trusted does the first `X-Forwarded-For` entry, then `X-Real-IP`, take
//! precedence; enable that only behind a proxy that overwrites them.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::extract::ConnectInfo;
use axum::http::Request;
use tower_governor::GovernorError;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::KeyExtractor;

use crate::env_or;

#[derive(Clone, Copy, Debug, Default)]
pub struct ClientIpKeyExtractor {
    pub trust_proxy_headers: bool,
}

impl ClientIpKeyExtractor {
    fn header_ip<T>(req: &Request<T>, name: &str) -> Option<IpAddr> {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.trust_proxy_headers {
            if let Some(ip) = Self::header_ip(req, "x-forwarded-for")
                .or_else(|| Self::header_ip(req, "x-real-ip"))
            {
                return Ok(ip);
            }
        }

        if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
            return Ok(addr.ip());
        }

        // No peer info (e.g. in-process tests): share one bucket.
        Ok(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub auth_per_second: u64,
    pub auth_burst_size: u32,
    pub trust_proxy_headers: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth_per_second: 2,
            auth_burst_size: 10,
            trust_proxy_headers: false,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_or("RATE_LIMIT_ENABLED", defaults.enabled),
            auth_per_second: env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second).max(1),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size).max(1),
            trust_proxy_headers: env_or(
                "RATE_LIMIT_TRUST_PROXY_HEADERS",
                defaults.trust_proxy_headers,
            ),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// `None` when the limiter is disabled or the quota is zero.
    #[must_use]
    pub fn auth_governor_config(
        &self,
    ) -> Option<GovernorConfig<ClientIpKeyExtractor, ::governor::middleware::NoOpMiddleware>> {
        if !self.enabled {
            return None;
        }

        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(ClientIpKeyExtractor {
                trust_proxy_headers: self.trust_proxy_headers,
            })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(headers: &[(&str, &str)]) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/auth/login");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.auth_per_second, 2);
        assert_eq!(config.auth_burst_size, 10);
        assert!(!config.trust_proxy_headers);
    }

    #[test]
    fn test_disabled_has_no_governor() {
        assert!(RateLimitConfig::disabled().auth_governor_config().is_none());
        assert!(RateLimitConfig::default().auth_governor_config().is_some());
    }

    const PROXIED: ClientIpKeyExtractor = ClientIpKeyExtractor {
        trust_proxy_headers: true,
    };

    fn with_peer(mut req: Request<Body>, peer: &str) -> Request<Body> {
        let addr: SocketAddr = peer.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        req
    }

    #[test]
    fn test_proxy_headers_ignored_by_default() {
        let extractor = ClientIpKeyExtractor::default();
        let peer = "192.0.2.9:5555".parse::<SocketAddr>().unwrap().ip();

        for spoofed in ["203.0.113.7", "203.0.113.8"] {
            let req = with_peer(
                request(&[("x-forwarded-for", spoofed), ("x-real-ip", spoofed)]),
                "192.0.2.9:5555",
            );
            assert_eq!(extractor.extract(&req).unwrap(), peer);
        }
    }

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let req = request(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1")]);
        let ip = PROXIED.extract(&req).unwrap();
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_real_ip_used_when_no_forwarded_for() {
        let req = request(&[("x-real-ip", "198.51.100.4")]);
        let ip = PROXIED.extract(&req).unwrap();
        assert_eq!(ip, "198.51.100.4".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_connect_info_fallback() {
        let req = with_peer(request(&[("x-forwarded-for", "not-an-ip")]), "192.0.2.9:5555");
        assert_eq!(
            PROXIED.extract(&req).unwrap(),
            "192.0.2.9".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_unknown_client_shares_unspecified_bucket() {
        let req = request(&[("x-forwarded-for", "203.0.113.7")]);
        assert_eq!(
            ClientIpKeyExtractor::default().extract(&req).unwrap(),
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        );
    }
}
