//! Dashboard totals, expense breakdown and time series.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::AnalyticsService;
pub use types::{
    CategoryMonthPoint, CategoryShare, CategoryTotal, DailyPoint, DashboardTotals, MonthlyPoint,
};
