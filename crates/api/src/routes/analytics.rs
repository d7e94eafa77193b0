//! Analytics and income series routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{Days, Utc};
use serde::Deserialize;

use super::{MonthsQuery, month_window};
use crate::{ApiResult, AppState, middleware::AuthUser};
use fintrack_core::analytics::{
    AnalyticsService, CategoryMonthPoint, CategoryShare, DailyPoint, MonthlyPoint,
};
use fintrack_core::period::MonthPeriod;
use fintrack_db::entities::sea_orm_active_enums::TransactionType;
use fintrack_db::repositories::DateRange;
use fintrack_db::AnalyticsRepository;

const DEFAULT_CATEGORY_MONTHS: u32 = 6;
const DEFAULT_INCOME_MONTHS: u32 = 12;
const DEFAULT_DAYS: u32 = 30;
const MAX_DAYS: u32 = 366;

/// Creates the analytics routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(expense_breakdown))
        .route("/analytics/category-monthly", get(category_monthly))
        .route("/income/daily", get(income_daily))
        .route("/income/monthly", get(income_monthly))
}

/// Query parameters for daily series.
#[derive(Debug, Default, Deserialize)]
pub struct DaysQuery {
    /// Number of days ending today.
    pub days: Option<u32>,
}

impl DaysQuery {
    fn days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_DAYS).clamp(1, MAX_DAYS)
    }
}

/// GET /analytics - Expense share per category over all time.
async fn expense_breakdown(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<CategoryShare>>> {
    let totals = AnalyticsRepository::new((*state.db).clone())
        .expense_by_category(user.user_id(), None)
        .await?;
    Ok(Json(AnalyticsService::expense_breakdown(totals)))
}

/// GET /analytics/category-monthly - Expense per category for each month.
async fn category_monthly(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<MonthsQuery>,
) -> ApiResult<Json<Vec<CategoryMonthPoint>>> {
    let current = MonthPeriod::containing(Utc::now().date_naive());
    let months = query.months_or(DEFAULT_CATEGORY_MONTHS);

    let rows = AnalyticsRepository::new((*state.db).clone())
        .monthly_expense_by_category(user.user_id(), month_window(current, months))
        .await?;
    Ok(Json(AnalyticsService::category_monthly(&rows, current, months)))
}

/// GET /income/daily - Income per day, oldest first.
async fn income_daily(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DaysQuery>,
) -> ApiResult<Json<Vec<DailyPoint>>> {
    let today = Utc::now().date_naive();
    let days = query.days();
    let range = DateRange {
        from: today
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .unwrap_or(today),
        to: today.checked_add_days(Days::new(1)).unwrap_or(today),
    };

    let rows = AnalyticsRepository::new((*state.db).clone())
        .daily_totals(user.user_id(), TransactionType::Income, range)
        .await?;
    Ok(Json(AnalyticsService::daily_series(&rows, today, days)))
}

/// GET /income/monthly - Income per month, oldest first.
async fn income_monthly(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<MonthsQuery>,
) -> ApiResult<Json<Vec<MonthlyPoint>>> {
    let current = MonthPeriod::containing(Utc::now().date_naive());
    let months = query.months_or(DEFAULT_INCOME_MONTHS);

    let rows = AnalyticsRepository::new((*state.db).clone())
        .monthly_totals(
            user.user_id(),
            TransactionType::Income,
            month_window(current, months),
        )
        .await?;
    Ok(Json(AnalyticsService::monthly_series(&rows, current, months)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, 30)]
    #[case(Some(0), 1)]
    #[case(Some(7), 7)]
    #[case(Some(10_000), 366)]
    fn test_days_clamped(#[case] days: Option<u32>, #[case] expected: u32) {
        assert_eq!(DaysQuery { days }.days(), expected);
    }
}
