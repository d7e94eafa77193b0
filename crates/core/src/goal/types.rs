//! Goal data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived progress toward a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Percent of target saved, capped at 100.
    pub progress_percent: Decimal,
    /// Amount still needed, never negative.
    pub remaining: Decimal,
    /// True once the target is reached.
    pub is_achieved: bool,
}
