//! Property-based tests for analytics module.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::AnalyticsService;
use super::types::CategoryTotal;

proptest! {
    /// Shares of a non-empty breakdown sum to roughly 100 and are ordered.
    #[test]
    fn test_breakdown_shares(amounts in prop::collection::vec(1i64..1_000_000, 1..10)) {
        let totals = amounts
            .iter()
            .enumerate()
            .map(|(i, a)| CategoryTotal {
                category: format!("c{i}"),
                color: "#ffffff".to_string(),
                total: Decimal::from(*a),
            })
            .collect();

        let shares = AnalyticsService::expense_breakdown(totals);
        let sum: Decimal = shares.iter().map(|s| s.share).sum();

        prop_assert!((sum - Decimal::ONE_HUNDRED).abs() <= Decimal::new(1, 1));
        prop_assert!(shares.windows(2).all(|w| w[0].total >= w[1].total));
    }

    /// Daily series always has exactly `days` points ending on `end`.
    #[test]
    fn test_daily_series_length(days in 1u32..120, offset in 0u32..3_000) {
        let end = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Days::new(u64::from(offset));
        let series = AnalyticsService::daily_series(&[], end, days);

        prop_assert_eq!(series.len(), days as usize);
        prop_assert_eq!(series.last().map(|p| p.date), Some(end));
        prop_assert!(series.iter().all(|p| p.total.is_zero()));
    }
}
