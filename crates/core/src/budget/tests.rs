//! Property-based tests for budget module.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::{BudgetService, DEFAULT_NEAR_LIMIT_PERCENT};
use super::types::BudgetHealth;

proptest! {
    /// A non-positive limit never reports over-budget and always yields 0%.
    #[test]
    fn test_non_positive_limit(
        limit in -1_000_000i64..=0,
        spent in 0i64..1_000_000_000,
    ) {
        let usage = BudgetService::evaluate(
            Decimal::from(limit),
            Decimal::from(spent),
            DEFAULT_NEAR_LIMIT_PERCENT,
        );

        prop_assert!(!usage.is_over);
        prop_assert_eq!(usage.percentage, Decimal::ZERO);
        prop_assert_eq!(usage.health, BudgetHealth::Unbudgeted);
    }

    /// is_over holds exactly when spent > limit > 0.
    #[test]
    fn test_is_over_definition(
        limit in 1i64..1_000_000_000,
        spent in 0i64..2_000_000_000,
    ) {
        let limit = Decimal::from(limit);
        let spent = Decimal::from(spent);

        let usage = BudgetService::evaluate(limit, spent, DEFAULT_NEAR_LIMIT_PERCENT);
        prop_assert_eq!(usage.is_over, spent > limit);
        prop_assert_eq!(usage.health == BudgetHealth::OverBudget, spent > limit);
    }

    /// percentage = spent / limit × 100 for positive limits.
    #[test]
    fn test_percentage_formula(
        limit in 1i64..1_000_000_000,
        spent in 0i64..1_000_000_000,
    ) {
        let limit = Decimal::from(limit);
        let spent = Decimal::from(spent);

        let expected = (spent / limit * dec!(100)).round_dp(2);
        let usage = BudgetService::evaluate(limit, spent, DEFAULT_NEAR_LIMIT_PERCENT);
        prop_assert_eq!(usage.percentage, expected);
        prop_assert_eq!(usage.remaining, limit - spent);
    }
}
