//! Transaction error types.

use thiserror::Error;

/// Transaction validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// Amount must be greater than zero.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// The user has no category of the requested type.
    #[error("No {0} category available")]
    NoCategory(super::types::TransactionKind),

    /// Category type does not match the transaction type.
    #[error("Category type does not match transaction type {0}")]
    CategoryTypeMismatch(super::types::TransactionKind),
}
