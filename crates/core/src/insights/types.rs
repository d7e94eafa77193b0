//! Insight data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Severity of an insight, as rendered by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// Spending rose sharply.
    Warning,
    /// Spending fell noticeably.
    Success,
    /// Neutral observation.
    Info,
}

/// A short observation about the user's spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// Severity.
    #[serde(rename = "type")]
    pub kind: InsightKind,
    /// Headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Supporting figure: percent delta for spikes, amount for the top category.
    pub value: Decimal,
}

/// Total spent in one category over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpend {
    /// Category name.
    pub category: String,
    /// Amount spent.
    pub total: Decimal,
}
