//! Spending insights and next-month forecast for the dashboard.

pub mod service;
pub mod types;


pub use service::{FORECAST_MONTHS, FORECAST_WEIGHTS, InsightService};
pub use types::{CategorySpend, Insight, InsightKind};
