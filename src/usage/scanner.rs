use chrono::NaiveDate;
use futures_util::future::join_all;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

use super::types::*;

/// Result of decoding one session log line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Event(UsageEvent),
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    /// Not a JSON object, usually a partially written final line
    Malformed,
}

/// Counters for one agent's scan, reported at debug level
#[derive(Debug, Default, Clone, Copy)]
struct ScanStats {
    files: usize,
    lines: usize,
    skipped: usize,
    counted: usize,
}

/// Compute live cost totals for `day` across the roster.
///
/// Agents without a session directory contribute nothing. An agent whose
/// directory or files cannot be read is logged and contributes what could be read.
pub fn compute_today_costs(
    sessions_root: &Path,
    roster: &[AgentId],
    day: NaiveDate,
) -> DailyCostTotals {
    let mut totals = DailyCostTotals::empty(format_day(day));
    for agent in roster {
        totals.merge(&scan_agent(sessions_root, agent, day));
    }
    totals
}

/// Same fold as [`compute_today_costs`], one blocking worker per agent.
pub async fn compute_today_costs_concurrent(
    sessions_root: PathBuf,
    roster: Vec<AgentId>,
    day: NaiveDate,
) -> DailyCostTotals {
    let workers = roster.into_iter().map(|agent| {
        let root = sessions_root.clone();
        tokio::task::spawn_blocking(move || scan_agent(&root, &agent, day))
    });

    let mut totals = DailyCostTotals::empty(format_day(day));
    for partial in join_all(workers).await {
        match partial {
            Ok(partial) => totals.merge(&partial),
            Err(e) => tracing::warn!("Agent scan worker failed: {}", e),
        }
    }
    totals
}

/// Session directory of one agent: `{sessions_root}/{agent}/sessions`
pub fn agent_sessions_dir(sessions_root: &Path, agent: &str) -> Option<PathBuf> {
    let mut components = Path::new(agent).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(sessions_root.join(agent).join("sessions")),
        _ => None,
    }
}

/// Scan every session log of one agent into a partial total for `day`
pub fn scan_agent(sessions_root: &Path, agent: &str, day: NaiveDate) -> DailyCostTotals {
    let day_str = format_day(day);
    let mut totals = DailyCostTotals::empty(day_str.clone());

    let Some(sessions_dir) = agent_sessions_dir(sessions_root, agent) else {
        tracing::warn!("Ignoring agent with invalid name: {:?}", agent);
        return totals;
    };

    let files = match list_session_files(&sessions_dir) {
        Ok(files) => files,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return totals,
        Err(e) => {
            tracing::warn!(
                "Cannot list sessions for agent {} at {}: {}",
                agent,
                sessions_dir.display(),
                e
            );
            return totals;
        }
    };

    let mut stats = ScanStats::default();
    for path in files {
        stats.files += 1;
        if let Err(e) = scan_file(&path, agent, &day_str, &mut totals, &mut stats) {
            tracing::warn!("Failed to read session log {}: {}", path.display(), e);
        }
    }

    tracing::debug!(
        agent,
        files = stats.files,
        lines = stats.lines,
        skipped = stats.skipped,
        counted = stats.counted,
        "Scanned agent sessions"
    );
    totals
}

/// `.jsonl` files directly inside a session directory, symlinks followed
fn list_session_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("jsonl") {
            files.push(path);
        }
    }
    Ok(files)
}

/// Fold one session log into `totals`. Lines read before an I/O error are kept.
fn scan_file(
    path: &Path,
    agent: &str,
    day: &str,
    totals: &mut DailyCostTotals,
    stats: &mut ScanStats,
) -> std::io::Result<()> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    for line in reader.split(b'\n') {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        stats.lines += 1;

        match decode_line(&line) {
            LineOutcome::Event(event) => {
                if event.is_costed_message_on(day) {
                    totals.record(agent, &event);
                    stats.counted += 1;
                }
            }
            LineOutcome::Skip(SkipReason::Blank) => {}
            LineOutcome::Skip(SkipReason::Malformed) => stats.skipped += 1,
        }
    }
    Ok(())
}

/// Decode one session log line.
///
/// Any JSON object decodes to an event; fields that are missing or of the
/// wrong type are left empty so the filter step can reject them.
pub fn decode_line(line: &str) -> LineOutcome {
    let line = line.trim();
    if line.is_empty() {
        return LineOutcome::Skip(SkipReason::Blank);
    }

    let entry = match serde_json::from_str::<serde_json::Value>(line) {
        Ok(v) if v.is_object() => v,
        _ => return LineOutcome::Skip(SkipReason::Malformed),
    };

    let message = entry.get("message");
    let cost = message
        .and_then(|m| m.get("usage"))
        .and_then(|u| u.get("cost"))
        .filter(|c| is_present(c))
        .map(|c| {
            c.get("total")
                .and_then(|t| t.as_f64())
                .filter(|t| t.is_finite() && *t > 0.0)
                .unwrap_or(0.0)
        });

    LineOutcome::Event(UsageEvent {
        timestamp: entry
            .get("timestamp")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        kind: entry.get("type").and_then(|v| v.as_str()).map(str::to_string),
        cost,
        model: message
            .and_then(|m| m.get("model"))
            .and_then(|v| v.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or(UNKNOWN_MODEL)
            .to_string(),
    })
}

/// Whether a cost record counts as present (null, false, 0 and "" do not)
fn is_present(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// Format a calendar day as YYYY-MM-DD
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
