pub mod backlog;
pub mod config;
pub mod history;
pub mod serve;
pub mod today;

/// Dollar amount as shown on the dashboard
pub(crate) fn format_cost(cost: f64) -> String {
    format!("${:.4}", cost)
}
