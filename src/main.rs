//! Entry point for the payroll engine binary.
//!
//! Starts an HTTP server exposing the payroll API. The rate-table directory is
//! taken from `FOLHA_CONFIG_DIR` (default `./config/br2024`) and the bind
//! address from `FOLHA_BIND_ADDR` (default `127.0.0.1:3000`). Log filtering
//! follows `RUST_LOG`.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use folha_engine::api::{AppState, create_router};
use folha_engine::config::ConfigLoader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folha_engine=info")),
        )
        .init();

    let config_dir =
        std::env::var("FOLHA_CONFIG_DIR").unwrap_or_else(|_| "./config/br2024".to_string());
    let addr = std::env::var("FOLHA_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let loader = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading rate tables from {}", config_dir))?;
    let config = loader.into_config();
    info!(
        jurisdiction = %config.metadata().code,
        version = %config.metadata().version,
        "Rate tables loaded"
    );

    let router = create_router(AppState::in_memory(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
