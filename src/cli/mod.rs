pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kit-panel",
    about = "Cost telemetry for an agent fleet: live spend, daily history and backlog",
    version
)]
pub struct Cli {
    /// Path to config file (default: platform config dir, kit-panel/config.toml)
    #[arg(short, long, global = true, env = "KIT_PANEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard HTTP server
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Directory with the built dashboard
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Open the dashboard in a browser once listening
        #[arg(long)]
        open: bool,
    },

    /// Show live cost totals for today (UTC)
    Today {
        /// Aggregate another day instead (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show recent daily cost snapshots
    History {
        /// Number of most recent days
        #[arg(short, long)]
        days: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the backlog document
    Backlog {
        /// List sections only
        #[arg(short, long)]
        sections: bool,

        /// Print the markdown without rendering
        #[arg(long, conflicts_with = "sections")]
        raw: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
}
