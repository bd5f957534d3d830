//! Coinbox entrypoint
//!
//! Loads configuration, wires the upstream adapters and serves the API.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use coinbox::aggregator::Aggregator;
use coinbox::config::AppConfig;
use coinbox::server::{create_router, AppState};
use coinbox::sources::BinanceSource;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    tracing::info!(config = %config.digest(), "Starting coinbox");

    let state = Arc::new(AppState {
        prices: Box::new(BinanceSource::new()),
        metadata: config.metadata_source()?,
        aggregator: Aggregator::new(config.prices.quote_suffix.clone()),
    });

    let router = create_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(addr = %addr, "🚀 Server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install shutdown handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
