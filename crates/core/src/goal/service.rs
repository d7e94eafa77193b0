//! Goal progress and contribution rules.

use rust_decimal::Decimal;

use super::error::GoalError;
use super::types::GoalProgress;

/// Goal service for business logic.
pub struct GoalService;

impl GoalService {
    /// Progress of `current` toward `target`.
    ///
    /// A non-positive target reports 0% and is never achieved.
    #[must_use]
    pub fn progress(current: Decimal, target: Decimal) -> GoalProgress {
        if target <= Decimal::ZERO {
            return GoalProgress {
                progress_percent: Decimal::ZERO,
                remaining: Decimal::ZERO,
                is_achieved: false,
            };
        }

        let percent = (current / target * Decimal::ONE_HUNDRED)
            .min(Decimal::ONE_HUNDRED)
            .max(Decimal::ZERO);

        GoalProgress {
            progress_percent: percent.round_dp(2),
            remaining: (target - current).max(Decimal::ZERO),
            is_achieved: current >= target,
        }
    }

    /// Validates a new goal.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::EmptyName` or `GoalError::NonPositiveTarget`.
    pub fn validate_new(name: &str, target: Decimal) -> Result<(), GoalError> {
        if name.trim().is_empty() {
            return Err(GoalError::EmptyName);
        }
        if target <= Decimal::ZERO {
            return Err(GoalError::NonPositiveTarget);
        }
        Ok(())
    }

    /// Checks that a contribution adds money.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::NonPositiveContribution` if `amount <= 0`.
    pub fn validate_contribution(amount: Decimal) -> Result<(), GoalError> {
        if amount <= Decimal::ZERO {
            return Err(GoalError::NonPositiveContribution);
        }
        Ok(())
    }

    /// Applies a contribution, returning the new saved amount.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::NonPositiveContribution` if `amount <= 0`.
    pub fn contribute(current: Decimal, amount: Decimal) -> Result<Decimal, GoalError> {
        Self::validate_contribution(amount)?;
        Ok(current + amount)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_progress_partial() {
        let p = GoalService::progress(dec!(2500), dec!(10000));
        assert_eq!(p.progress_percent, dec!(25));
        assert_eq!(p.remaining, dec!(7500));
        assert!(!p.is_achieved);
    }

    #[test]
    fn test_progress_capped() {
        let p = GoalService::progress(dec!(12000), dec!(10000));
        assert_eq!(p.progress_percent, dec!(100));
        assert_eq!(p.remaining, Decimal::ZERO);
        assert!(p.is_achieved);
    }

    #[test]
    fn test_zero_target() {
        let p = GoalService::progress(dec!(500), Decimal::ZERO);
        assert_eq!(p.progress_percent, Decimal::ZERO);
        assert!(!p.is_achieved);
    }

    #[test]
    fn test_contribute() {
        assert_eq!(GoalService::contribute(dec!(100), dec!(50)), Ok(dec!(150)));
        assert_eq!(
            GoalService::contribute(dec!(100), dec!(0)),
            Err(GoalError::NonPositiveContribution)
        );
        assert_eq!(
            GoalService::contribute(dec!(100), dec!(-5)),
            Err(GoalError::NonPositiveContribution)
        );
    }

    #[test]
    fn test_validate_new() {
        assert!(GoalService::validate_new("Laptop", dec!(80000)).is_ok());
        assert_eq!(GoalService::validate_new("  ", dec!(1)), Err(GoalError::EmptyName));
        assert_eq!(
            GoalService::validate_new("Trip", dec!(0)),
            Err(GoalError::NonPositiveTarget)
        );
    }
}
