use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::{info, warn};

use shopfront::router::init_router;
use shopfront::state::init_app_state;
use shopfront_config::{DatabaseConfig, ServerConfig};
use shopfront_db::run_migrations;
use shopfront_observability::{
    LoggingConfig, init_metrics, init_tracing, metrics_router, shutdown_tracer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing(&LoggingConfig::from_env())?;

    let database = DatabaseConfig::from_env()?;
    let server = ServerConfig::from_env()?;

    let state = init_app_state(&database).await?;

    run_migrations(&state.db).await?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics()? {
        app = app.merge(metrics_router(handle));
    }

    let addr = server.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");
    info!("Swagger UI available at http://{addr}/swagger-ui");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
