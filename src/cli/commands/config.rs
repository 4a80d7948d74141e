use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::ConfigAction;
use kit_panel::config::{config_path, Config};

pub fn run(action: Option<ConfigAction>, config: &Config, explicit: Option<&Path>) -> Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let out = toml::to_string_pretty(config).context("Failed to serialize config")?;
            println!("{}", out);
        }
        ConfigAction::Path => {
            println!("{}", config_path(explicit)?.display());
        }
    }
    Ok(())
}
