mod api;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use explorer_core::ExplorerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::AppState;

const CONFIG_FILE: &str = "wenlan.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting wenlan server");
    let config = if Path::new(CONFIG_FILE).exists() {
        info!("loading explorer config from {CONFIG_FILE}");
        ExplorerConfig::from_file(CONFIG_FILE)
            .with_context(|| format!("failed to load explorer config from {CONFIG_FILE}"))?
    } else {
        info!("{CONFIG_FILE} not found, using defaults");
        ExplorerConfig::default()
    };

    info!(
        base_dir = %config.base_dir.display(),
        max_search_depth = config.max_search_depth,
        "explorer config loaded"
    );

    let listen_addr = config.listen_addr.clone();
    let state = Arc::new(AppState::new(config));
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(addr = %listener.local_addr()?, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received, stopping server");
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
