//! Goal error types.

use thiserror::Error;

/// Goal validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GoalError {
    /// Target must be greater than zero.
    #[error("Target amount must be greater than zero")]
    NonPositiveTarget,

    /// Contributions must be greater than zero.
    #[error("Contribution must be greater than zero")]
    NonPositiveContribution,

    /// Goal name is blank.
    #[error("Goal name is required")]
    EmptyName,
}
