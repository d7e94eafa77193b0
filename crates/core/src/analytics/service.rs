//! Aggregate post-processing for dashboard and analytics endpoints.
//!
//! Repositories return sparse rows (only periods that have data); the
//! functions here zero-fill and order them for charting.

use std::collections::{BTreeMap, HashMap};

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use super::types::{
    CategoryMonthPoint, CategoryShare, CategoryTotal, DailyPoint, DashboardTotals, MonthlyPoint,
};
use crate::period::MonthPeriod;

/// Analytics service.
pub struct AnalyticsService;

impl AnalyticsService {
    /// Income, expense and balance.
    #[must_use]
    pub fn totals(income: Decimal, expense: Decimal) -> DashboardTotals {
        DashboardTotals {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// Pie slices sorted by total, largest first.
    #[must_use]
    pub fn expense_breakdown(totals: Vec<CategoryTotal>) -> Vec<CategoryShare> {
        let grand_total: Decimal = totals.iter().map(|t| t.total).sum();

        let mut shares: Vec<CategoryShare> = totals
            .into_iter()
            .map(|t| CategoryShare {
                share: if grand_total.is_zero() {
                    Decimal::ZERO
                } else {
                    (t.total / grand_total * Decimal::ONE_HUNDRED).round_dp(2)
                },
                category: t.category,
                color: t.color,
                total: t.total,
            })
            .collect();

        shares.sort_by(|a, b| b.total.cmp(&a.total));
        shares
    }

    /// Daily totals for the `days` days ending on `end`, oldest first.
    #[must_use]
    pub fn daily_series(rows: &[(NaiveDate, Decimal)], end: NaiveDate, days: u32) -> Vec<DailyPoint> {
        let by_day: HashMap<NaiveDate, Decimal> = rows.iter().copied().collect();

        (0..days)
            .rev()
            .filter_map(|back| end.checked_sub_days(Days::new(u64::from(back))))
            .map(|date| DailyPoint {
                date,
                total: by_day.get(&date).copied().unwrap_or_default(),
            })
            .collect()
    }

    /// Monthly totals for the `months` months ending with `current`, oldest first.
    #[must_use]
    pub fn monthly_series(
        rows: &[(MonthPeriod, Decimal)],
        current: MonthPeriod,
        months: u32,
    ) -> Vec<MonthlyPoint> {
        let by_month: HashMap<MonthPeriod, Decimal> = rows.iter().copied().collect();

        current
            .trailing(months)
            .into_iter()
            .map(|month| MonthlyPoint {
                month: month.to_string(),
                label: month.label(),
                total: by_month.get(&month).copied().unwrap_or_default(),
            })
            .collect()
    }

    /// Per-month, per-category totals for the `months` months ending with `current`.
    ///
    /// Every month lists every category seen anywhere in the window, with 0
    /// where it had no spend.
    #[must_use]
    pub fn category_monthly(
        rows: &[(MonthPeriod, String, Decimal)],
        current: MonthPeriod,
        months: u32,
    ) -> Vec<CategoryMonthPoint> {
        let window = current.trailing(months);
        let zeroes: BTreeMap<String, Decimal> = rows
            .iter()
            .filter(|(month, _, _)| window.contains(month))
            .map(|(_, category, _)| (category.clone(), Decimal::ZERO))
            .collect();

        let mut points: Vec<CategoryMonthPoint> = window
            .iter()
            .map(|month| CategoryMonthPoint {
                month: month.to_string(),
                label: month.label(),
                totals: zeroes.clone(),
            })
            .collect();

        for (month, category, total) in rows {
            if let Some(idx) = window.iter().position(|m| m == month)
                && let Some(slot) = points[idx].totals.get_mut(category)
            {
                *slot += *total;
            }
        }

        points
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn total(category: &str, amount: Decimal) -> CategoryTotal {
        CategoryTotal {
            category: category.to_string(),
            color: "#000000".to_string(),
            total: amount,
        }
    }

    #[test]
    fn test_totals_balance() {
        let t = AnalyticsService::totals(dec!(50000), dec!(32000.50));
        assert_eq!(t.balance, dec!(17999.50));

        let negative = AnalyticsService::totals(dec!(100), dec!(250));
        assert_eq!(negative.balance, dec!(-150));
    }

    #[test]
    fn test_expense_breakdown_sorted_with_share() {
        let shares = AnalyticsService::expense_breakdown(vec![
            total("Food", dec!(250)),
            total("Rent", dec!(500)),
            total("Fun", dec!(250)),
        ]);

        let names: Vec<&str> = shares.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food", "Fun"]);
        assert_eq!(shares[0].share, dec!(50));
        assert_eq!(shares[1].share, dec!(25));
    }

    #[test]
    fn test_expense_breakdown_zero_total() {
        let shares = AnalyticsService::expense_breakdown(vec![total("Food", Decimal::ZERO)]);
        assert_eq!(shares[0].share, Decimal::ZERO);
        assert!(AnalyticsService::expense_breakdown(vec![]).is_empty());
    }

    #[test]
    fn test_daily_series_zero_filled() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let feb_29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        let series = AnalyticsService::daily_series(&[(feb_29, dec!(1200))], end, 4);
        let totals: Vec<Decimal> = series.iter().map(|p| p.total).collect();

        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        assert_eq!(series[3].date, end);
        assert_eq!(totals, vec![dec!(0), dec!(1200), dec!(0), dec!(0)]);
    }

    #[test]
    fn test_monthly_series() {
        let current = MonthPeriod { year: 2024, month: 2 };
        let series = AnalyticsService::monthly_series(
            &[(MonthPeriod { year: 2023, month: 12 }, dec!(900))],
            current,
            3,
        );

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].month, "2023-12");
        assert_eq!(series[0].total, dec!(900));
        assert_eq!(series[2].total, Decimal::ZERO);
    }

    #[test]
    fn test_category_monthly_pivot() {
        let current = MonthPeriod { year: 2024, month: 3 };
        let feb = MonthPeriod { year: 2024, month: 2 };
        let rows = vec![
            (feb, "Food".to_string(), dec!(300)),
            (current, "Rent".to_string(), dec!(1000)),
            (MonthPeriod { year: 2023, month: 1 }, "Old".to_string(), dec!(5)),
        ];

        let points = AnalyticsService::category_monthly(&rows, current, 2);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].totals.len(), 2);
        assert_eq!(points[0].totals["Food"], dec!(300));
        assert_eq!(points[0].totals["Rent"], Decimal::ZERO);
        assert_eq!(points[1].totals["Rent"], dec!(1000));
        assert!(!points[1].totals.contains_key("Old"));
    }
}
