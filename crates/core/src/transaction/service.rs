//! Transaction validation and recurring-bill grouping.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::error::TransactionError;
use super::types::{DEFAULT_PAYMENT_MODE, RecurringKey};

/// Transaction service for business logic.
pub struct TransactionService;

impl TransactionService {
    /// Validates an amount.
    pub fn validate_amount(amount: Decimal) -> Result<(), TransactionError> {
        if amount <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveAmount);
        }
        Ok(())
    }

    /// Trimmed payment mode, falling back to [`DEFAULT_PAYMENT_MODE`].
    #[must_use]
    pub fn payment_mode(mode: Option<&str>) -> String {
        mode.map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_PAYMENT_MODE)
            .to_string()
    }

    /// Keeps the first occurrence of each recurring bill.
    ///
    /// Callers pass occurrences newest first, so the survivor of each group is
    /// the latest one.
    #[must_use]
    pub fn distinct_recurring<T, F>(occurrences: Vec<T>, key: F) -> Vec<T>
    where
        F: Fn(&T) -> RecurringKey,
    {
        let mut seen = HashSet::new();
        occurrences
            .into_iter()
            .filter(|item| seen.insert(key(item)))
            .collect()
    }
}
