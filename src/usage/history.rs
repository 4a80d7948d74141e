use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use super::types::{CostHistory, DailySnapshot};
use crate::error::{CostError, Result};

/// Number of days the dashboard charts by default
pub const DEFAULT_HISTORY_DAYS: usize = 7;

/// Largest window a caller may request
pub const MAX_HISTORY_DAYS: usize = 31;

/// Window size requested from the CLI or the API, bounded to `1..=MAX_HISTORY_DAYS`
pub fn clamp_history_days(days: usize) -> usize {
    days.clamp(1, MAX_HISTORY_DAYS)
}

/// Load the most recent `max_days` daily snapshots, oldest first.
///
/// A missing snapshot directory is an empty history. A selected snapshot that
/// cannot be read or parsed fails the whole call.
pub fn load_history(snapshots_root: &Path, max_days: usize) -> Result<CostHistory> {
    let files = match select_snapshot_files(snapshots_root, max_days) {
        Ok(files) => files,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(CostError::ListSnapshots {
                path: snapshots_root.to_path_buf(),
                source,
            })
        }
    };

    let mut days = files
        .iter()
        .map(|path| read_snapshot(path))
        .collect::<Result<Vec<_>>>()?;

    days.sort_by(|a, b| a.date.cmp(&b.date));
    tracing::debug!(
        "Loaded {} snapshot(s) from {}",
        days.len(),
        snapshots_root.display()
    );
    Ok(days)
}

/// Parse one snapshot file
pub fn read_snapshot(path: &Path) -> Result<DailySnapshot> {
    let content = std::fs::read_to_string(path).map_err(|source| CostError::ReadSnapshot {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CostError::ParseSnapshot {
        path: path.to_path_buf(),
        source,
    })
}

/// The `max_days` most recent `.json` files in `dir`, newest first.
///
/// Files named after a date (`2026-02-09.json`, also `2026-2-9.json`) are ranked
/// by that date and ahead of anything else; remaining ties fall back to the
/// filename, descending.
fn select_snapshot_files(dir: &Path, max_days: usize) -> std::io::Result<Vec<PathBuf>> {
    let mut candidates: Vec<(Option<NaiveDate>, String, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let date = snapshot_date(&path);
        if date.is_none() {
            tracing::warn!("Snapshot file name is not a date: {}", name);
        }
        candidates.push((date, name, path));
    }

    candidates.sort_by(|a, b| (&b.0, &b.1).cmp(&(&a.0, &a.1)));
    Ok(candidates
        .into_iter()
        .take(max_days)
        .map(|(_, _, path)| path)
        .collect())
}

/// Date encoded in a snapshot's file stem
fn snapshot_date(path: &Path) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
}
