//! sheetmerged - Tabular upload and merge server
//!
//! Accepts CSV/XLSX uploads into a flat directory and serves every stored
//! file merged into one JSON dataset.
//!
//! Usage:
//!   sheetmerged [--bind <addr>] [--upload-dir <path>] [--config <file.toml>]
//!
//! With no options it listens on 127.0.0.1:5000 and stores files in `uploads/`.

mod config;

use clap::Parser;
use sheetmerge_api::{create_router, AppState};
use sheetmerge_core::UploadStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Cli, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sheetmerged=info,sheetmerge_api=info,sheetmerge_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting sheetmerged");

    let cli = Cli::parse();
    let config = ServerConfig::from_cli(&cli)?;

    // Ensure the upload directory exists before the first request
    let store = UploadStore::new(&config.upload_dir);
    store.ensure_dir().await?;
    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        max_upload_bytes = config.max_upload_bytes,
        "Upload directory ready"
    );

    let state = AppState::new(store).with_max_upload_bytes(config.max_upload_bytes);
    let app = create_router(state);

    tracing::info!("Listening on http://{}", config.bind);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
