mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::commands;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `--json` output stays pipeable
    let filter = if cli.verbose {
        EnvFilter::new("kit_panel=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kit_panel=info,warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = kit_panel::config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
            open,
        } => commands::serve::run(&config, host, port, static_dir, open).await?,
        Commands::Today { date, json } => commands::today::run(&config, date, json)?,
        Commands::History { days, json } => commands::history::run(&config, days, json)?,
        Commands::Backlog { sections, raw } => commands::backlog::run(&config, sections, raw)?,
        Commands::Config { action } => {
            commands::config::run(action, &config, cli.config.as_deref())?
        }
    }

    Ok(())
}
