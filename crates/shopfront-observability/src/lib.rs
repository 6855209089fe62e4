//! Shopfront observability.
//!
//! - [`logging`]: tracing subscriber (console, rolling files, optional OTLP)
//!   and the per-request logging middleware
//! - [`metrics`]: Prometheus recorder, HTTP metrics middleware and business
//!   counters
//!
//! Everything is on by default. `OBSERVABILITY_ENABLED=false` reduces
//! logging to the console and turns metrics into no-ops.
//!
//! ```no_run
//! use shopfront_observability::{LoggingConfig, init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing(&LoggingConfig::from_env())?;
//!     // ... application code ...
//!     shutdown_tracer().await;
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use metrics_exporter_prometheus::PrometheusHandle;

pub use logging::{
    LoggingConfig, REQUEST_ID_HEADER, init_tracing, logging_middleware, shutdown_tracer,
};
pub use metrics::{
    init_metrics, is_observability_enabled, metrics_middleware, metrics_router, track_jwt_issued,
    track_order_created, track_user_login, track_user_registered,
};
