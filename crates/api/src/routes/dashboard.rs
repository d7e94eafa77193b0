//! Dashboard route.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{month_window, transactions::RECENT_LIMIT};
use crate::{ApiResult, AppState, middleware::AuthUser};
use fintrack_core::analytics::{AnalyticsService, DashboardTotals};
use fintrack_core::insights::{CategorySpend, FORECAST_MONTHS, Insight, InsightService};
use fintrack_core::period::MonthPeriod;
use fintrack_db::entities::sea_orm_active_enums::TransactionType;
use fintrack_db::repositories::TransactionWithCategory;
use fintrack_db::{AnalyticsRepository, TransactionRepository};

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// Window the dashboard totals cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardPeriod {
    /// The current calendar month.
    #[default]
    Month,
    /// Every transaction on record.
    All,
}

/// Query parameters for the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Totals window, `month` by default.
    #[serde(default)]
    pub period: DashboardPeriod,
}

/// Dashboard payload.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Income, expense and balance.
    pub totals: DashboardTotals,
    /// Latest transactions.
    pub recent_transactions: Vec<TransactionWithCategory>,
    /// Spending insights for this month.
    pub insights: Vec<Insight>,
    /// Expected expense next month.
    pub forecast: Decimal,
}

/// GET /dashboard - Totals, recent activity, insights and forecast.
async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardResponse>> {
    let user_id = user.user_id();
    let analytics = AnalyticsRepository::new((*state.db).clone());
    let current = MonthPeriod::containing(Utc::now().date_naive());

    let range = match query.period {
        DashboardPeriod::Month => Some(current.into()),
        DashboardPeriod::All => None,
    };
    let (income, expense) = analytics.totals(user_id, range).await?;

    let recent_transactions = TransactionRepository::new((*state.db).clone())
        .recent(user_id, RECENT_LIMIT)
        .await?;

    let insights = insights(&analytics, user_id, current).await?;
    let forecast = forecast(&analytics, user_id, current).await?;

    Ok(Json(DashboardResponse {
        totals: AnalyticsService::totals(income, expense),
        recent_transactions,
        insights,
        forecast: forecast.round_dp(2),
    }))
}

async fn insights(
    analytics: &AnalyticsRepository,
    user_id: Uuid,
    current: MonthPeriod,
) -> ApiResult<Vec<Insight>> {
    let (_, this_month) = analytics.totals(user_id, Some(current.into())).await?;
    let (_, last_month) = analytics
        .totals(user_id, Some(current.previous().into()))
        .await?;

    let spends: Vec<CategorySpend> = analytics
        .expense_by_category(user_id, Some(current.into()))
        .await?
        .into_iter()
        .map(|c| CategorySpend {
            category: c.category,
            total: c.total,
        })
        .collect();

    Ok(InsightService::generate(this_month, last_month, &spends))
}

/// Weighted forecast over the last three months, most recent first.
///
/// Months without expense count as zero once the user has any activity.
async fn forecast(
    analytics: &AnalyticsRepository,
    user_id: Uuid,
    current: MonthPeriod,
) -> ApiResult<Decimal> {
    let monthly = analytics
        .monthly_totals(
            user_id,
            TransactionType::Expense,
            month_window(current, FORECAST_MONTHS),
        )
        .await?;
    let first_activity = analytics
        .first_transaction_date(user_id)
        .await?
        .map(MonthPeriod::containing);

    let recent_first = InsightService::forecast_window(&monthly, current, first_activity);
    Ok(InsightService::forecast(&recent_first))
}
