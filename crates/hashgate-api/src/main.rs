//! # hashgate-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the hashstore gateway.
//! Binds to a configurable port (default 8080).

use hashgate_api::state::{AppConfig, AppState};
use hashgate_authz::{CnClient, CnConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let config = AppConfig::from_env();
    let layout = config.layout();

    let cn_config = CnConfig::from_env().map_err(|e| {
        tracing::error!("Coordinating-node configuration invalid: {e}");
        e
    })?;
    tracing::info!(
        store_root = %layout.root().display(),
        object_root = %layout.object_root().display(),
        cn = %cn_config.base_url,
        "hashstore gateway configured"
    );

    let cn = CnClient::new(cn_config).map_err(|e| {
        tracing::error!("Failed to create coordinating-node client: {e}");
        e
    })?;

    let state = AppState::new(layout, cn);
    let app = hashgate_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Hashgate API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
