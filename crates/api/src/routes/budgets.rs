//! Budget routes.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::{MonthsQuery, month_window};
use crate::{ApiError, ApiResult, AppState, middleware::AuthUser};
use fintrack_core::budget::{BudgetError, BudgetHistoryPoint, BudgetService, BudgetUsage};
use fintrack_core::period::MonthPeriod;
use fintrack_db::entities::{categories, sea_orm_active_enums::TransactionType};
use fintrack_db::{AnalyticsRepository, BudgetRepository, CategoryRepository};

const DEFAULT_HISTORY_MONTHS: u32 = 6;

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(set_budget))
        .route("/budgets/history", get(budget_history))
}

/// Request body for setting a category limit.
#[derive(Debug, Deserialize, Validate)]
pub struct SetBudgetRequest {
    /// Category ID.
    pub category_id: Option<Uuid>,
    /// Category name, used when no ID is given.
    #[validate(length(min = 1, max = 50))]
    pub category_name: Option<String>,
    /// Monthly limit.
    pub limit: Decimal,
}

/// A category's limit and this month's spend against it.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Category ID.
    pub category_id: Uuid,
    /// Category name.
    pub category: String,
    /// Category color.
    pub color: String,
    /// Category icon.
    pub icon: String,
    /// Usage figures.
    #[serde(flatten)]
    pub usage: BudgetUsage,
}

/// GET /budgets - Every expense category with this month's usage.
async fn list_budgets(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<BudgetResponse>>> {
    let month = MonthPeriod::containing(Utc::now().date_naive());
    let rows = AnalyticsRepository::new((*state.db).clone())
        .budget_usage(user.user_id(), month.into())
        .await?;

    let budgets = rows
        .into_iter()
        .map(|row| BudgetResponse {
            usage: BudgetService::evaluate(row.limit, row.spent, state.budget.near_limit_percent),
            category_id: row.category_id,
            category: row.category,
            color: row.color,
            icon: row.icon,
        })
        .collect();

    Ok(Json(budgets))
}

/// POST /budgets - Set or replace the monthly limit of an expense category.
async fn set_budget(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SetBudgetRequest>,
) -> ApiResult<Json<BudgetResponse>> {
    payload.validate()?;
    BudgetService::validate_limit(payload.limit)?;

    let user_id = user.user_id();
    let category = find_category(&state, user_id, &payload).await?;
    if category.category_type != TransactionType::Expense {
        return Err(BudgetError::NotAnExpenseCategory.into());
    }

    let budget = BudgetRepository::new((*state.db).clone())
        .upsert(user_id, category.id, payload.limit)
        .await?;

    let month = MonthPeriod::containing(Utc::now().date_naive());
    let spent = AnalyticsRepository::new((*state.db).clone())
        .category_expense(user_id, category.id, month.into())
        .await?;

    info!(
        user_id = %user_id,
        category = %category.name,
        limit = %budget.amount,
        "Budget set"
    );

    Ok(Json(BudgetResponse {
        usage: BudgetService::evaluate(budget.amount, spent, state.budget.near_limit_percent),
        category_id: category.id,
        category: category.name,
        color: category.color,
        icon: category.icon,
    }))
}

async fn find_category(
    state: &AppState,
    user_id: Uuid,
    payload: &SetBudgetRequest,
) -> ApiResult<categories::Model> {
    let repo = CategoryRepository::new((*state.db).clone());

    let found = match (payload.category_id, payload.category_name.as_deref()) {
        (Some(id), _) => repo.find(user_id, id).await?,
        (None, Some(name)) => {
            repo.find_by_name(user_id, name.trim(), TransactionType::Expense)
                .await?
        }
        (None, None) => {
            return Err(ApiError::validation(
                "Either category_id or category_name is required",
            ));
        }
    };

    found.ok_or_else(|| ApiError::not_found("Category not found"))
}

/// GET /budgets/history - Total spend against the combined budget per month.
async fn budget_history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<MonthsQuery>,
) -> ApiResult<Json<Vec<BudgetHistoryPoint>>> {
    let user_id = user.user_id();
    let current = MonthPeriod::containing(Utc::now().date_naive());
    let months = query.months_or(DEFAULT_HISTORY_MONTHS);

    let total_budget = BudgetRepository::new((*state.db).clone())
        .total_limit(user_id)
        .await?;
    let rows = AnalyticsRepository::new((*state.db).clone())
        .monthly_totals(user_id, TransactionType::Expense, month_window(current, months))
        .await?;

    let by_month: HashMap<MonthPeriod, Decimal> = rows.into_iter().collect();
    let monthly_spend: Vec<(MonthPeriod, Decimal)> = current
        .trailing(months)
        .into_iter()
        .map(|m| (m, by_month.get(&m).copied().unwrap_or_default()))
        .collect();

    Ok(Json(BudgetService::history(&monthly_spend, total_budget)))
}
