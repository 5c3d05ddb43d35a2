//! charades-server - Main entry point
//!
//! Loads the prompt catalog once, then serves the item REST endpoints, the
//! single-player session endpoints and the embedded UI.

use std::sync::Arc;

use anyhow::{Context, Result};
use charades_common::config::{load_optional_toml_config, ServiceConfig};
use charades_common::Catalog;
use charades_server::api::BuildInfo;
use charades_server::cli::Args;
use charades_server::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is resolved before tracing so the file can set the log level
    let file = load_optional_toml_config(args.config.as_deref())
        .context("Failed to load configuration file")?;
    let config = ServiceConfig::resolve(args.overrides(), file);

    let level = &config.log_level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("charades_server={level},charades_common={level},tower_http={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting charades-server {}", BuildInfo::CURRENT);

    // Any catalog problem aborts startup
    let catalog = match &config.data_dir {
        Some(dir) => Catalog::load_from_dir(dir)
            .with_context(|| format!("Failed to load catalog from {}", dir.display()))?,
        None => Catalog::load_bundled().context("Failed to load bundled catalog")?,
    };
    let counts = catalog.counts();
    info!(
        "✓ Catalog ready: {} movies, {} songs, {} dialogues",
        counts.movie, counts.song, counts.dialogue
    );

    let state = AppState::new(Arc::new(catalog));
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("charades-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
