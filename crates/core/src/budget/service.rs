//! Budget service for usage evaluation and validation.

use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{BudgetHealth, BudgetHistoryPoint, BudgetUsage};
use crate::period::MonthPeriod;

/// Default utilization percentage above which a budget is near its limit.
pub const DEFAULT_NEAR_LIMIT_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Percentage of the limit spent. Zero when the limit is not positive.
    #[must_use]
    pub fn percentage(spent: Decimal, limit: Decimal) -> Decimal {
        if limit <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            spent / limit * Decimal::ONE_HUNDRED
        }
    }

    /// True when spend exceeds a positive limit.
    #[must_use]
    pub fn is_over(spent: Decimal, limit: Decimal) -> bool {
        limit > Decimal::ZERO && spent > limit
    }

    /// Evaluates spend against a limit.
    ///
    /// `near_limit_percent` is the utilization above which a budget that is
    /// not yet over is reported as [`BudgetHealth::NearLimit`].
    #[must_use]
    pub fn evaluate(limit: Decimal, spent: Decimal, near_limit_percent: Decimal) -> BudgetUsage {
        let percentage = Self::percentage(spent, limit);
        let is_over = Self::is_over(spent, limit);

        let health = if limit <= Decimal::ZERO {
            BudgetHealth::Unbudgeted
        } else if is_over {
            BudgetHealth::OverBudget
        } else if percentage > near_limit_percent {
            BudgetHealth::NearLimit
        } else {
            BudgetHealth::OnTrack
        };

        BudgetUsage {
            limit,
            spent,
            remaining: limit - spent,
            percentage: percentage.round_dp(2),
            is_over,
            health,
        }
    }

    /// Builds month-by-month spend against the combined budget.
    ///
    /// `monthly_spend` pairs each month with its total expense; months are
    /// reported in the order given.
    #[must_use]
    pub fn history(
        monthly_spend: &[(MonthPeriod, Decimal)],
        total_budget: Decimal,
    ) -> Vec<BudgetHistoryPoint> {
        monthly_spend
            .iter()
            .map(|(month, spent)| BudgetHistoryPoint {
                month: month.to_string(),
                label: month.label(),
                budget: total_budget,
                spent: *spent,
                percentage: Self::percentage(*spent, total_budget).round_dp(2),
                is_over: Self::is_over(*spent, total_budget),
            })
            .collect()
    }

    /// Validates a new limit.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeLimit` if the limit is negative.
    pub fn validate_limit(limit: Decimal) -> Result<(), BudgetError> {
        if limit < Decimal::ZERO {
            return Err(BudgetError::NegativeLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usage_on_track() {
        let usage = BudgetService::evaluate(dec!(1000), dec!(500), DEFAULT_NEAR_LIMIT_PERCENT);

        assert_eq!(usage.percentage, dec!(50));
        assert_eq!(usage.remaining, dec!(500));
        assert!(!usage.is_over);
        assert_eq!(usage.health, BudgetHealth::OnTrack);
    }

    #[test]
    fn test_usage_near_limit() {
        let usage = BudgetService::evaluate(dec!(1000), dec!(850), DEFAULT_NEAR_LIMIT_PERCENT);
        assert_eq!(usage.health, BudgetHealth::NearLimit);

        let exactly = BudgetService::evaluate(dec!(1000), dec!(800), DEFAULT_NEAR_LIMIT_PERCENT);
        assert_eq!(exactly.health, BudgetHealth::OnTrack);
    }

    #[test]
    fn test_usage_over_budget() {
        let usage = BudgetService::evaluate(dec!(1000), dec!(1200), DEFAULT_NEAR_LIMIT_PERCENT);

        assert_eq!(usage.percentage, dec!(120));
        assert_eq!(usage.remaining, dec!(-200));
        assert!(usage.is_over);
        assert_eq!(usage.health, BudgetHealth::OverBudget);
    }

    #[test]
    fn test_spent_equal_to_limit_is_not_over() {
        let usage = BudgetService::evaluate(dec!(1000), dec!(1000), DEFAULT_NEAR_LIMIT_PERCENT);
        assert!(!usage.is_over);
        assert_eq!(usage.health, BudgetHealth::NearLimit);
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(BudgetService::percentage(dec!(0), dec!(0)), Decimal::ZERO);

        let usage = BudgetService::evaluate(dec!(0), dec!(300), DEFAULT_NEAR_LIMIT_PERCENT);
        assert_eq!(usage.percentage, Decimal::ZERO);
        assert!(!usage.is_over);
        assert_eq!(usage.health, BudgetHealth::Unbudgeted);
    }

    #[test]
    fn test_percentage_rounded() {
        let usage = BudgetService::evaluate(dec!(300), dec!(100), DEFAULT_NEAR_LIMIT_PERCENT);
        assert_eq!(usage.percentage, dec!(33.33));
    }

    #[test]
    fn test_history() {
        let months = MonthPeriod { year: 2024, month: 3 }.trailing(2);
        let history = BudgetService::history(
            &[(months[0], dec!(900)), (months[1], dec!(1100))],
            dec!(1000),
        );

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].month, "2024-02");
        assert_eq!(history[0].label, "Feb 2024");
        assert_eq!(history[0].percentage, dec!(90));
        assert!(!history[0].is_over);
        assert!(history[1].is_over);
    }

    #[test]
    fn test_validate_limit() {
        assert!(BudgetService::validate_limit(dec!(0)).is_ok());
        assert_eq!(
            BudgetService::validate_limit(dec!(-1)),
            Err(BudgetError::NegativeLimit)
        );
    }
}
