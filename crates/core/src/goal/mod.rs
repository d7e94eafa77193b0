//! Savings goals: progress toward a target amount.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::GoalError;
pub use service::GoalService;
pub use types::GoalProgress;
