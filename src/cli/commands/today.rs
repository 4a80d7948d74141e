use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;

use super::format_cost;
use kit_panel::config::Config;
use kit_panel::usage::{utc_today, CostBreakdown, DailyCostTotals};

/// Print live totals for `date` (default: today, UTC)
pub fn run(config: &Config, date: Option<NaiveDate>, json: bool) -> Result<()> {
    let sources = config.cost_sources();
    let totals = sources.today_costs(date.unwrap_or_else(utc_today));

    if json {
        let out = serde_json::to_string_pretty(&totals).context("Failed to serialize totals")?;
        println!("{}", out);
        return Ok(());
    }

    print_totals(&totals);
    Ok(())
}

fn print_totals(totals: &DailyCostTotals) {
    println!(
        "\n{}",
        format!("  Costs for {}", totals.date).bold().bright_yellow()
    );
    println!("{}", "  ─────────────────────────────".dimmed());
    println!(
        "\n  {} {} across {} messages",
        "Total:".bold(),
        format_cost(totals.total_cost).bright_green(),
        totals.message_count().to_string().bright_yellow()
    );

    if totals.by_agent.is_empty() {
        println!("\n  {}", "No costed messages yet.".dimmed());
        println!();
        return;
    }

    print_breakdown("By Agent:", &totals.by_agent);
    print_breakdown("By Model:", &totals.by_model);
    println!();
}

fn print_breakdown(title: &str, breakdown: &CostBreakdown) {
    println!("\n  {}", title.bold());
    for (name, aggregate) in breakdown.by_cost_desc() {
        println!(
            "    {} {} {}",
            format!("{:>24}", name).cyan(),
            format!("{:>10}", format_cost(aggregate.cost)).bright_green(),
            format!("{} messages", aggregate.message_count).dimmed()
        );
    }
}
