//! Property-based tests for goal module.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::GoalService;

proptest! {
    /// Progress always lies in [0, 100] and remaining is never negative.
    #[test]
    fn test_progress_bounds(
        current in 0i64..1_000_000_000,
        target in 1i64..1_000_000_000,
    ) {
        let p = GoalService::progress(Decimal::from(current), Decimal::from(target));

        prop_assert!(p.progress_percent >= Decimal::ZERO);
        prop_assert!(p.progress_percent <= Decimal::ONE_HUNDRED);
        prop_assert!(p.remaining >= Decimal::ZERO);
        prop_assert_eq!(p.is_achieved, current >= target);
    }

    /// Positive contributions strictly increase the saved amount.
    #[test]
    fn test_contribution_increases(
        current in 0i64..1_000_000_000,
        amount in 1i64..1_000_000,
    ) {
        let next = GoalService::contribute(Decimal::from(current), Decimal::from(amount)).unwrap();
        prop_assert!(next > Decimal::from(current));
    }
}
