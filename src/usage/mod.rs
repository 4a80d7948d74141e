pub mod history;
pub mod scanner;
pub mod types;

use chrono::NaiveDate;
use std::path::PathBuf;

pub use history::{clamp_history_days, load_history, DEFAULT_HISTORY_DAYS, MAX_HISTORY_DAYS};
pub use scanner::{compute_today_costs, compute_today_costs_concurrent};
pub use types::{AgentId, CostAggregate, CostBreakdown, CostHistory, DailyCostTotals, DailySnapshot};

/// Where the engine reads cost data from
#[derive(Debug, Clone, PartialEq)]
pub struct CostSources {
    pub roster: Vec<AgentId>,
    /// Parent of the per-agent `{agent}/sessions` directories
    pub sessions_root: PathBuf,
    /// Directory of `YYYY-MM-DD.json` daily snapshots
    pub snapshots_root: PathBuf,
}

impl CostSources {
    pub fn today_costs(&self, day: NaiveDate) -> DailyCostTotals {
        compute_today_costs(&self.sessions_root, &self.roster, day)
    }

    pub async fn today_costs_concurrent(&self, day: NaiveDate) -> DailyCostTotals {
        compute_today_costs_concurrent(self.sessions_root.clone(), self.roster.clone(), day).await
    }

    pub fn history(&self, max_days: usize) -> crate::error::Result<CostHistory> {
        load_history(&self.snapshots_root, max_days)
    }
}

/// Current UTC calendar day
pub fn utc_today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
