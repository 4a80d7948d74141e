use std::path::PathBuf;
use thiserror::Error;

/// Faults the engine reports to its caller.
///
/// Session logs never produce one of these: unreadable agents and lines are
/// skipped. Snapshots and the backlog are trusted artifacts, so a fault there
/// is surfaced.
#[derive(Error, Debug)]
pub enum CostError {
    #[error("Failed to list snapshot directory {}: {source}", path.display())]
    ListSnapshots {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read snapshot {}: {source}", path.display())]
    ReadSnapshot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot {}: {source}", path.display())]
    ParseSnapshot {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read backlog {}: {source}", path.display())]
    ReadBacklog {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CostError>;
