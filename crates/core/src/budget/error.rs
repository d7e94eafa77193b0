//! Budget error types.

use thiserror::Error;

/// Budget-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// Limit cannot be negative.
    #[error("Budget limit cannot be negative")]
    NegativeLimit,

    /// Budgets only apply to expense categories.
    #[error("Budgets can only be set on expense categories")]
    NotAnExpenseCategory,
}
