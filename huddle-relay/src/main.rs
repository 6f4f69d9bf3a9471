use anyhow::{Context, Result};
use huddle_relay::{RelayConfig, RelayService, router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = RelayConfig::from_env()?;
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Relay listening on ws://{}/ws", config.bind_addr);

    axum::serve(listener, router(RelayService::new()))
        .await
        .context("Relay server stopped")
}
