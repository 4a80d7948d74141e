use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of an agent from the configured roster
pub type AgentId = String;

/// Model bucket used when a message does not name its model
pub const UNKNOWN_MODEL: &str = "unknown";

/// A single billable occurrence decoded from one session log line
#[derive(Debug, Clone, PartialEq)]
pub struct UsageEvent {
    pub timestamp: Option<String>,
    /// Entry discriminator (`type` on disk)
    pub kind: Option<String>,
    /// Cost of the message, `None` when the entry has no usage/cost record
    pub cost: Option<f64>,
    pub model: String,
}

impl UsageEvent {
    /// Whether this event is a costed message that happened on `day` (YYYY-MM-DD)
    pub fn is_costed_message_on(&self, day: &str) -> bool {
        self.kind.as_deref() == Some("message")
            && self.cost.is_some()
            && self
                .timestamp
                .as_deref()
                .is_some_and(|ts| ts.starts_with(day))
    }
}

/// Running cost and message count for one agent or model
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostAggregate {
    pub cost: f64,
    #[serde(rename = "messages")]
    pub message_count: u64,
}

impl CostAggregate {
    /// Add one message worth `cost`
    pub fn record(&mut self, cost: f64) {
        self.cost += cost;
        self.message_count += 1;
    }

    /// Fold another aggregate into this one. `CostAggregate::default()` is the identity.
    pub fn merge(&mut self, other: &CostAggregate) {
        self.cost += other.cost;
        self.message_count += other.message_count;
    }
}

/// Aggregates grouped by a dimension value (agent name or model name)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostBreakdown(BTreeMap<String, CostAggregate>);

impl CostBreakdown {
    /// Bucket for `key`, created empty if it does not exist yet
    pub fn upsert(&mut self, key: &str) -> &mut CostAggregate {
        self.0.entry(key.to_string()).or_default()
    }

    pub fn merge(&mut self, other: &CostBreakdown) {
        for (key, aggregate) in &other.0 {
            self.upsert(key).merge(aggregate);
        }
    }

    pub fn get(&self, key: &str) -> Option<&CostAggregate> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CostAggregate)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_cost(&self) -> f64 {
        self.0.values().map(|a| a.cost).sum()
    }

    pub fn total_messages(&self) -> u64 {
        self.0.values().map(|a| a.message_count).sum()
    }

    /// Entries ordered by cost, highest first
    pub fn by_cost_desc(&self) -> Vec<(&String, &CostAggregate)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| {
            b.1.cost
                .partial_cmp(&a.1.cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries
    }
}

/// Live cost totals for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCostTotals {
    pub date: String,
    pub total_cost: f64,
    pub by_agent: CostBreakdown,
    pub by_model: CostBreakdown,
}

impl DailyCostTotals {
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            total_cost: 0.0,
            by_agent: CostBreakdown::default(),
            by_model: CostBreakdown::default(),
        }
    }

    /// Attribute one costed message to `agent` and to the event's model
    pub fn record(&mut self, agent: &str, event: &UsageEvent) {
        let cost = event.cost.unwrap_or(0.0);
        self.total_cost += cost;
        self.by_agent.upsert(agent).record(cost);
        self.by_model.upsert(&event.model).record(cost);
    }

    /// Fold a partial result for the same day into this one
    pub fn merge(&mut self, other: &DailyCostTotals) {
        self.total_cost += other.total_cost;
        self.by_agent.merge(&other.by_agent);
        self.by_model.merge(&other.by_model);
    }

    pub fn message_count(&self) -> u64 {
        self.by_agent.total_messages()
    }
}

/// A pre-aggregated daily report written by the batch reporting job.
///
/// Only `date` is interpreted (it orders the history). Every other field is
/// kept as written and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub date: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl DailySnapshot {
    /// `totalCost`, 0 when absent or not a number
    pub fn total_cost(&self) -> f64 {
        self.fields
            .get("totalCost")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    /// `sessions`, 0 when absent or not a count
    pub fn sessions(&self) -> u64 {
        self.fields
            .get("sessions")
            .and_then(|v| v.as_u64())
            .unwrap_or(0)
    }

    /// Messages summed over `byAgent`, reading `messages` or `messageCount`
    pub fn message_count(&self) -> u64 {
        let Some(by_agent) = self.fields.get("byAgent").and_then(|v| v.as_object()) else {
            return 0;
        };
        by_agent
            .values()
            .filter_map(|entry| {
                entry
                    .get("messages")
                    .or_else(|| entry.get("messageCount"))
                    .and_then(|v| v.as_u64())
            })
            .sum()
    }
}

/// Daily snapshots in ascending date order
pub type CostHistory = Vec<DailySnapshot>;
