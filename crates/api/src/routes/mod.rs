//! API route definitions.

use axum::{Router, middleware};
use fintrack_core::period::MonthPeriod;
use fintrack_db::repositories::DateRange;
use serde::Deserialize;

use crate::{AppState, middleware::auth::auth_middleware};

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod goals;
pub mod health;
pub mod loans;
pub mod recurring;
pub mod transactions;

/// Longest month window accepted by series endpoints.
const MAX_MONTHS: u32 = 36;

/// `?months=` query parameter of month series endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MonthsQuery {
    /// Number of months ending with the current one.
    pub months: Option<u32>,
}

impl MonthsQuery {
    /// The requested month count, or `default`, clamped to `1..=36`.
    #[must_use]
    pub fn months_or(&self, default: u32) -> u32 {
        self.months.unwrap_or(default).clamp(1, MAX_MONTHS)
    }
}

/// Date range covering the `months` months ending with `current`.
pub(crate) fn month_window(current: MonthPeriod, months: u32) -> DateRange {
    let first = current.trailing(months).first().copied().unwrap_or(current);
    DateRange {
        from: first.start_date(),
        to: current.end_date_exclusive(),
    }
}

/// Routes that need no token.
pub fn public_routes() -> Router<AppState> {
    Router::new().merge(health::routes()).merge(auth::routes())
}

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(categories::routes())
        .merge(transactions::routes())
        .merge(recurring::routes())
        .merge(budgets::routes())
        .merge(goals::routes())
        .merge(loans::routes())
        .merge(dashboard::routes())
        .merge(analytics::routes())
        .merge(admin::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().merge(public_routes()).merge(protected_routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[case(None, 6, 6)]
    #[case(Some(0), 6, 1)]
    #[case(Some(12), 6, 12)]
    #[case(Some(120), 6, 36)]
    fn test_months_clamped(#[case] months: Option<u32>, #[case] default: u32, #[case] expected: u32) {
        assert_eq!(MonthsQuery { months }.months_or(default), expected);
    }

    #[test]
    fn test_month_window_spans_year_boundary() {
        let window = month_window(MonthPeriod { year: 2024, month: 2 }, 3);
        assert_eq!(window.from, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(window.to, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
