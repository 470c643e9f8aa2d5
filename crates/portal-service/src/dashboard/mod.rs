//! Dashboard counters.

pub mod service;

pub use service::{DashboardService, DashboardSummary, StatusCount};
