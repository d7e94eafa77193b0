//! Month-over-month insights and weighted-average forecasting.

use rust_decimal::Decimal;

use crate::period::MonthPeriod;

use super::types::{CategorySpend, Insight, InsightKind};

/// Forecast weights, most recent month first.
pub const FORECAST_WEIGHTS: [Decimal; 3] = [
    Decimal::from_parts(5, 0, 0, false, 1),
    Decimal::from_parts(3, 0, 0, false, 1),
    Decimal::from_parts(2, 0, 0, false, 1),
];

/// Number of months the forecast looks back over, current month included.
pub const FORECAST_MONTHS: u32 = 3;

/// Ratio above which this month's spend counts as a spike (110%).
const SPIKE_RATIO: Decimal = Decimal::from_parts(110, 0, 0, false, 2);

/// Ratio below which this month's spend counts as a drop (90%).
const DROP_RATIO: Decimal = Decimal::from_parts(90, 0, 0, false, 2);

/// Insight generation for the dashboard.
pub struct InsightService;

impl InsightService {
    /// Compares this month's spend to last month's.
    ///
    /// Emits a warning when spend rose by more than 10%, a success when it
    /// fell by more than 10%, and nothing otherwise or when last month had no
    /// spend.
    #[must_use]
    pub fn month_over_month(this_month: Decimal, last_month: Decimal) -> Option<Insight> {
        if last_month <= Decimal::ZERO {
            return None;
        }

        let delta = ((this_month - last_month) / last_month * Decimal::ONE_HUNDRED).round_dp(2);

        if this_month > last_month * SPIKE_RATIO {
            Some(Insight {
                kind: InsightKind::Warning,
                title: "Spending spike".to_string(),
                message: format!(
                    "You have spent {}% more than last month.",
                    delta.round_dp(1)
                ),
                value: delta,
            })
        } else if this_month < last_month * DROP_RATIO {
            Some(Insight {
                kind: InsightKind::Success,
                title: "Spending down".to_string(),
                message: format!(
                    "You have spent {}% less than last month. Nice work!",
                    delta.abs().round_dp(1)
                ),
                value: delta,
            })
        } else {
            None
        }
    }

    /// Surfaces the highest-spending category. Ties go to the earliest entry.
    #[must_use]
    pub fn top_category(spends: &[CategorySpend]) -> Option<Insight> {
        let top = spends
            .iter()
            .filter(|s| s.total > Decimal::ZERO)
            .fold(None::<&CategorySpend>, |best, s| match best {
                Some(b) if b.total >= s.total => Some(b),
                _ => Some(s),
            })?;

        Some(Insight {
            kind: InsightKind::Info,
            title: "Top spending category".to_string(),
            message: format!(
                "{} is your biggest expense this month at {}.",
                top.category,
                top.total.round_dp(2)
            ),
            value: top.total,
        })
    }

    /// All insights for the current month, spike first.
    #[must_use]
    pub fn generate(
        this_month: Decimal,
        last_month: Decimal,
        category_spends: &[CategorySpend],
    ) -> Vec<Insight> {
        Self::month_over_month(this_month, last_month)
            .into_iter()
            .chain(Self::top_category(category_spends))
            .collect()
    }

    /// Monthly totals feeding [`Self::forecast`], most recent first.
    ///
    /// Covers the [`FORECAST_MONTHS`] months ending at `current`. Months
    /// missing from `monthly` count as zero; only months before
    /// `first_activity` are left out, so a brand-new user is not averaged
    /// against empty history. No activity at all yields an empty window.
    #[must_use]
    pub fn forecast_window(
        monthly: &[(MonthPeriod, Decimal)],
        current: MonthPeriod,
        first_activity: Option<MonthPeriod>,
    ) -> Vec<Decimal> {
        let Some(first) = first_activity else {
            return Vec::new();
        };

        current
            .trailing(FORECAST_MONTHS)
            .into_iter()
            .rev()
            .filter(|month| *month >= first)
            .map(|month| {
                monthly
                    .iter()
                    .find(|(m, _)| *m == month)
                    .map_or(Decimal::ZERO, |(_, total)| *total)
            })
            .collect()
    }

    /// Weighted average of up to the last three monthly totals.
    ///
    /// `recent_first` lists monthly totals with the most recent month first;
    /// only the first three are used. The result is normalized by the sum of
    /// the weights actually applied, so a single month forecasts itself.
    #[must_use]
    pub fn forecast(recent_first: &[Decimal]) -> Decimal {
        let (weighted, weight_sum) = recent_first
            .iter()
            .zip(FORECAST_WEIGHTS.iter())
            .fold((Decimal::ZERO, Decimal::ZERO), |(acc, ws), (total, w)| {
                (acc + total * w, ws + w)
            });

        if weight_sum.is_zero() {
            Decimal::ZERO
        } else {
            weighted / weight_sum
        }
    }
}
