//! Monthly budget tracking: spend percentage, over-budget flag, health.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::BudgetError;
pub use service::BudgetService;
pub use types::{BudgetHealth, BudgetHistoryPoint, BudgetUsage};
