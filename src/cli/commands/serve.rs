use anyhow::Result;
use std::path::PathBuf;

use kit_panel::config::{expand_path, Config};
use kit_panel::server;

/// Start the dashboard server; flags override the `[server]` config section
pub async fn run(
    config: &Config,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let static_dir = static_dir
        .map(|d| expand_path(&d))
        .unwrap_or_else(|| config.static_dir());

    let sources = config.cost_sources();
    tracing::info!(
        "Watching {} agent(s) under {}, snapshots in {}",
        sources.roster.len(),
        sources.sessions_root.display(),
        sources.snapshots_root.display()
    );

    server::serve(config, &host, port, static_dir, open).await
}
