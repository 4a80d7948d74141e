//! Cost telemetry for an agent fleet.
//!
//! [`usage`] scans per-agent session logs into live daily totals and reads the
//! precomputed daily snapshots; [`backlog`] splits the backlog document into
//! sections; [`server`] exposes both over HTTP for the dashboard.

pub mod backlog;
pub mod config;
pub mod error;
pub mod server;
pub mod usage;
