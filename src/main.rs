use contrib_stats::{AppState, ServiceConfig, SnapshotSource, router};
use std::net::SocketAddr;
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = ServiceConfig::from_env()?;
    if fs::metadata(&config.data_dir).await.is_err() {
        warn!(
            "snapshot directory {} does not exist; account reports will be not found",
            config.data_dir.display()
        );
    }

    let source = SnapshotSource::new(config.data_dir.clone());
    let state = AppState::new(config.analyzer.clone(), source, config.cache_capacity);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        return std::future::pending().await;
    }
    info!("shutting down");
}
