use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::usage::{AgentId, CostSources, DEFAULT_HISTORY_DAYS};

const APP_NAME: &str = "kit-panel";
const CONFIG_NAME: &str = "config";

/// Agents whose sessions are scanned when no roster is configured
const DEFAULT_ROSTER: &[&str] = &["main", "forge", "grid", "pulse", "scout", "pixel", "sage"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub agents: AgentsConfig,
    pub snapshots: SnapshotsConfig,
    pub backlog: BacklogConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    pub roster: Vec<AgentId>,
    /// Holds one `{agent}/sessions` directory per agent
    pub sessions_root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotsConfig {
    pub path: PathBuf,
    pub history_days: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacklogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built dashboard assets served for every non-API route
    pub static_dir: PathBuf,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            roster: DEFAULT_ROSTER.iter().map(|a| a.to_string()).collect(),
            sessions_root: openclaw_dir().join("agents"),
        }
    }
}

impl Default for SnapshotsConfig {
    fn default() -> Self {
        Self {
            path: openclaw_dir().join("cost-reports"),
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

impl Default for BacklogConfig {
    fn default() -> Self {
        Self {
            path: openclaw_dir().join("workspace").join("backlog.md"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            static_dir: PathBuf::from("dist"),
        }
    }
}

impl Config {
    /// Engine sources with `~` expanded
    pub fn cost_sources(&self) -> CostSources {
        CostSources {
            roster: self.agents.roster.clone(),
            sessions_root: expand_path(&self.agents.sessions_root),
            snapshots_root: expand_path(&self.snapshots.path),
        }
    }

    pub fn backlog_path(&self) -> PathBuf {
        expand_path(&self.backlog.path)
    }

    pub fn static_dir(&self) -> PathBuf {
        expand_path(&self.server.static_dir)
    }
}

/// `~/.openclaw`, where the agent fleet keeps its state
fn openclaw_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(".openclaw")
}

/// Expand a leading `~` in a configured path
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

/// Location of the config file in use
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
            .context("Failed to resolve config file path"),
    }
}

/// Load configuration, writing defaults on first run
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = config_path(explicit)?;
    let config: Config = confy::load_path(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let config = Config::default();
        assert_eq!(config.agents.roster.len(), 7);
        assert_eq!(config.agents.roster[0], "main");
        assert_eq!(config.snapshots.history_days, 7);
        assert_eq!(config.server.port, 3001);
        assert!(config.agents.sessions_root.ends_with(".openclaw/agents"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [agents]
            roster = ["main", "scout"]

            [server]
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(config.agents.roster, vec!["main", "scout"]);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.backlog.path.ends_with("workspace/backlog.md"));
    }

    #[test]
    fn test_cost_sources_expand_tilde() {
        let mut config = Config::default();
        config.agents.sessions_root = PathBuf::from("~/fleet/agents");
        config.snapshots.path = PathBuf::from("/srv/reports");

        let sources = config.cost_sources();
        assert!(!sources.sessions_root.starts_with("~"));
        assert!(sources.sessions_root.ends_with("fleet/agents"));
        assert_eq!(sources.snapshots_root, PathBuf::from("/srv/reports"));
        assert_eq!(sources.roster, config.agents.roster);
    }

    #[test]
    fn test_load_config_writes_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.server.port, 3001);
        assert!(path.exists());
    }
}
