use anyhow::{Context, Result};
use colored::Colorize;

use super::format_cost;
use kit_panel::config::Config;
use kit_panel::usage::clamp_history_days;

/// Print the most recent daily snapshots, oldest first
pub fn run(config: &Config, days: Option<usize>, json: bool) -> Result<()> {
    let days = clamp_history_days(days.unwrap_or(config.snapshots.history_days));
    let sources = config.cost_sources();
    let history = sources
        .history(days)
        .context("Failed to load cost history")?;

    if json {
        let out = serde_json::to_string_pretty(&history).context("Failed to serialize history")?;
        println!("{}", out);
        return Ok(());
    }

    println!(
        "\n{}",
        format!("  Cost History (last {} days)", days)
            .bold()
            .bright_yellow()
    );
    println!("{}", "  ─────────────────────────────".dimmed());

    if history.is_empty() {
        println!(
            "\n  {} {}",
            "No snapshots in".dimmed(),
            sources.snapshots_root.display().to_string().dimmed()
        );
        println!();
        return Ok(());
    }

    let max_cost = history
        .iter()
        .map(|d| d.total_cost())
        .fold(0.0_f64, f64::max);
    let week_total: f64 = history.iter().map(|d| d.total_cost()).sum();

    println!();
    for day in &history {
        let bar_len = if max_cost > 0.0 {
            ((day.total_cost() / max_cost) * 30.0).round() as usize
        } else {
            0
        };
        let bar: String = "\u{2588}".repeat(bar_len);
        println!(
            "  {} {:>10} {} {}",
            day.date.dimmed(),
            format_cost(day.total_cost()).bright_green(),
            bar.bright_yellow(),
            format!(
                "{} sessions, {} messages",
                day.sessions(),
                day.message_count()
            )
            .dimmed()
        );
    }

    println!(
        "\n  {} {}",
        "Total:".bold(),
        format_cost(week_total).bright_green()
    );
    println!();
    Ok(())
}
