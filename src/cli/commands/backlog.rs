use anyhow::{Context, Result};
use colored::Colorize;
use termimad::MadSkin;

use kit_panel::backlog::{read_backlog, split_sections};
use kit_panel::config::Config;

/// Print the backlog, rendered, raw, or as a section list
pub fn run(config: &Config, sections: bool, raw: bool) -> Result<()> {
    let content = read_backlog(&config.backlog_path()).context("Failed to load backlog")?;

    if raw {
        print!("{}", content);
        return Ok(());
    }

    if sections {
        println!("\n  {}", "Backlog Sections:".bold());
        for section in split_sections(&content) {
            let lines = section
                .content
                .lines()
                .filter(|l| !l.trim().is_empty())
                .count();
            if section.is_empty() {
                println!("    {} {}", section.name.cyan(), "(empty)".dimmed());
            } else {
                println!(
                    "    {} {}",
                    section.name.cyan(),
                    format!("{} lines", lines).dimmed()
                );
            }
        }
        println!();
        return Ok(());
    }

    MadSkin::default().print_text(&content);
    Ok(())
}
