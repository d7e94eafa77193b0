//! Property-based tests for loan module.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::LoanService;
use super::types::LoanTerms;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 3, 10).unwrap()
}

proptest! {
    /// With a zero rate the installment is exactly principal / tenure.
    #[test]
    fn test_zero_rate_installment(
        principal in 1i64..100_000_000,
        tenure in 1u32..=600,
    ) {
        let terms = LoanTerms {
            principal: Decimal::from(principal),
            annual_rate: Decimal::ZERO,
            tenure_months: tenure,
            start_date: start(),
        };

        let emi = LoanService::monthly_payment(&terms).unwrap();
        prop_assert_eq!(emi, Decimal::from(principal) / Decimal::from(tenure));
    }

    /// A positive rate always costs more than the interest-free installment.
    #[test]
    fn test_interest_increases_installment(
        principal in 1_000i64..10_000_000,
        rate_bp in 1i64..3_000,
        tenure in 1u32..=360,
    ) {
        let free = LoanTerms {
            principal: Decimal::from(principal),
            annual_rate: Decimal::ZERO,
            tenure_months: tenure,
            start_date: start(),
        };
        let charged = LoanTerms { annual_rate: Decimal::new(rate_bp, 2), ..free.clone() };

        let free_emi = LoanService::monthly_payment(&free).unwrap();
        let charged_emi = LoanService::monthly_payment(&charged).unwrap();
        prop_assert!(charged_emi > free_emi);
    }

    /// Elapsed months always lie within [0, tenure].
    #[test]
    fn test_elapsed_clamped(
        offset_days in 0u64..40_000,
        before in any::<bool>(),
        tenure in 0u32..=600,
    ) {
        let as_of = if before {
            start().checked_sub_days(Days::new(offset_days)).unwrap()
        } else {
            start().checked_add_days(Days::new(offset_days)).unwrap()
        };

        let months = LoanService::months_elapsed(start(), as_of, tenure);
        prop_assert!(months <= tenure);
        if before {
            prop_assert_eq!(months, 0);
        }
    }

    /// Progress never decreases as time passes and is 100 exactly at full tenure.
    #[test]
    fn test_progress_monotonic(
        principal in 1_000i64..10_000_000,
        rate_bp in 0i64..3_000,
        tenure in 1u32..=120,
        first in 0u64..5_000,
        step in 0u64..1_000,
    ) {
        let terms = LoanTerms {
            principal: Decimal::from(principal),
            annual_rate: Decimal::new(rate_bp, 2),
            tenure_months: tenure,
            start_date: start(),
        };
        let earlier = start().checked_add_days(Days::new(first)).unwrap();
        let later = earlier.checked_add_days(Days::new(step)).unwrap();

        let a = LoanService::progress(&terms, earlier).unwrap();
        let b = LoanService::progress(&terms, later).unwrap();
        prop_assert!(b.progress_percent >= a.progress_percent);
        prop_assert!(a.progress_percent <= Decimal::ONE_HUNDRED);

        if b.months_paid == tenure {
            prop_assert_eq!(b.progress_percent, Decimal::ONE_HUNDRED);
        } else {
            prop_assert!(b.progress_percent < Decimal::ONE_HUNDRED);
        }
    }

    /// Schedule rows add up, the balance only clears on the last installment
    /// and every payment stays within a cent or two of the EMI.
    #[test]
    fn test_schedule_rows_consistent(
        principal in 1_000i64..10_000_000,
        rate_bp in 0i64..=9_999,
        tenure in 1u32..=600,
    ) {
        let terms = LoanTerms {
            principal: Decimal::from(principal),
            annual_rate: Decimal::new(rate_bp, 2),
            tenure_months: tenure,
            start_date: start(),
        };
        let emi = LoanService::monthly_payment(&terms).unwrap().round_dp(2);
        let rows = LoanService::schedule(&terms).unwrap();
        let last = rows.len() - 1;
        let cents = Decimal::new(2, 2);

        prop_assert_eq!(rows.len(), tenure as usize);
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.payment, row.interest + row.principal);
            prop_assert!(row.principal >= Decimal::ZERO);
            prop_assert!((row.payment - emi).abs() <= cents);
            if i < last {
                prop_assert!(row.balance > Decimal::ZERO);
            }
        }
        prop_assert_eq!(rows[last].balance, Decimal::ZERO);

        let principal_sum: Decimal = rows.iter().map(|r| r.principal).sum();
        prop_assert_eq!(principal_sum, Decimal::from(principal));
    }
}
