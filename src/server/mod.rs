mod dto;
mod handlers;
mod router;
mod static_files;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use handlers::AppState;
use router::create_router;

/// Bind and run the HTTP server until interrupted
pub async fn serve(
    config: &Config,
    host: &str,
    port: u16,
    static_dir: PathBuf,
    open_browser: bool,
) -> Result<()> {
    let state = Arc::new(AppState {
        sources: config.cost_sources(),
        backlog_path: config.backlog_path(),
        history_days: config.snapshots.history_days,
    });

    if !static_dir.join("index.html").exists() {
        tracing::warn!(
            "No dashboard build found in {}, only /api routes will respond",
            static_dir.display()
        );
    }

    let app = create_router(state, &static_dir);
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;

    let url = format!("http://{}:{}", host, port);
    tracing::info!("Kit Control Panel API running on {}", url);
    if open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
