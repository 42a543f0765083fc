use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use talking_animals::config::AppConfig;
use talking_animals::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let addr = config.socket_addr()?;

    let state = initialize_backend(&config)?;
    let app = create_router(state, &config.allowed_origin, config.static_directory.as_deref())?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
