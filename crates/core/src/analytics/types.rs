//! Analytics data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income, expense and their difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    /// Total income.
    pub income: Decimal,
    /// Total expense.
    pub expense: Decimal,
    /// `income − expense`.
    pub balance: Decimal,
}

/// Aggregated spend of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Category color.
    pub color: String,
    /// Summed amount.
    pub total: Decimal,
}

/// One slice of the expense pie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Category name.
    pub category: String,
    /// Category color.
    pub color: String,
    /// Summed amount.
    pub total: Decimal,
    /// Percent of all expense.
    pub share: Decimal,
}

/// Expense per category for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMonthPoint {
    /// Month key, `YYYY-MM`.
    pub month: String,
    /// Display label.
    pub label: String,
    /// Category name to total.
    pub totals: BTreeMap<String, Decimal>,
}

/// Total for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Day.
    pub date: NaiveDate,
    /// Summed amount.
    pub total: Decimal,
}

/// Total for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Month key, `YYYY-MM`.
    pub month: String,
    /// Display label.
    pub label: String,
    /// Summed amount.
    pub total: Decimal,
}
