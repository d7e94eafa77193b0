//! Transaction data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment mode used when none is given.
pub const DEFAULT_PAYMENT_MODE: &str = "Cash";

/// Direction of money flow. Shared by transactions and categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money in.
    Income,
    /// Money out.
    Expense,
}

impl TransactionKind {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {s}")),
        }
    }
}

/// Identity of a recurring bill: occurrences sharing this key are one bill.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecurringKey {
    /// Free-text note.
    pub note: Option<String>,
    /// Category id.
    pub category_id: Uuid,
    /// Amount per occurrence.
    pub amount: Decimal,
    /// Direction.
    pub kind: TransactionKind,
}
