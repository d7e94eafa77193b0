//! Budget data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Health classification of a budget for the current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    /// No positive limit is set.
    Unbudgeted,
    /// Spending is comfortably below the limit.
    OnTrack,
    /// Spending is above the near-limit threshold but not over.
    NearLimit,
    /// Spending exceeds the limit.
    OverBudget,
}

/// Spend against a monthly limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetUsage {
    /// Monthly ceiling.
    pub limit: Decimal,
    /// Amount spent this month.
    pub spent: Decimal,
    /// `limit − spent`, negative when over.
    pub remaining: Decimal,
    /// `spent / limit × 100`, 0 when `limit ≤ 0`.
    pub percentage: Decimal,
    /// `spent > limit && limit > 0`.
    pub is_over: bool,
    /// Health classification.
    pub health: BudgetHealth,
}

/// Total spend versus total budget for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetHistoryPoint {
    /// Month key, `YYYY-MM`.
    pub month: String,
    /// Display label, e.g. "Mar 2024".
    pub label: String,
    /// Sum of all category limits.
    pub budget: Decimal,
    /// Total expense for the month.
    pub spent: Decimal,
    /// `spent / budget × 100`, 0 when `budget ≤ 0`.
    pub percentage: Decimal,
    /// `spent > budget && budget > 0`.
    pub is_over: bool,
}
