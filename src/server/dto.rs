use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::backlog::Section;
use crate::usage::{CostHistory, DailyCostTotals};

/// Today's live totals as served to the dashboard
#[derive(Serialize)]
pub struct TodayCostsDto {
    #[serde(flatten)]
    pub totals: DailyCostTotals,
    pub timestamp: String,
}

/// Recent daily snapshots, oldest first
#[derive(Serialize)]
pub struct CostHistoryDto {
    pub days: CostHistory,
    pub timestamp: String,
}

/// Raw backlog markdown
#[derive(Serialize)]
pub struct BacklogDto {
    pub content: String,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct BacklogSectionDto {
    pub name: String,
    pub content: String,
    pub empty: bool,
}

impl From<Section> for BacklogSectionDto {
    fn from(section: Section) -> Self {
        let empty = section.is_empty();
        Self {
            name: section.name,
            content: section.content,
            empty,
        }
    }
}

#[derive(Serialize)]
pub struct BacklogSectionsDto {
    pub sections: Vec<BacklogSectionDto>,
    pub timestamp: String,
}

/// Error body for failed requests
#[derive(Serialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Query parameters of the history endpoint
#[derive(Deserialize, Default)]
pub struct HistoryQuery {
    pub days: Option<usize>,
}

/// Response timestamp in the dashboard's format (`2026-02-09T10:00:00.000Z`)
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
