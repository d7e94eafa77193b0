//! Transaction routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{ApiResult, AppState, middleware::AuthUser};
use fintrack_core::category::resolve_category;
use fintrack_core::transaction::{TransactionKind, TransactionService};
use fintrack_db::repositories::{CreateTransactionInput, TransactionWithCategory};
use fintrack_db::{CategoryRepository, TransactionRepository};
use fintrack_shared::types::{PageRequest, PageResponse};

/// Number of transactions shown on the dashboard.
pub const RECENT_LIMIT: u64 = 5;

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/recent", get(recent_transactions))
        .route("/transactions/{id}", delete(delete_transaction))
}

/// Request body for recording a transaction.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    /// Positive amount.
    pub amount: Decimal,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Category name, used when `category_id` does not resolve.
    #[validate(length(max = 50))]
    pub category: Option<String>,
    /// Category ID.
    pub category_id: Option<Uuid>,
    /// Booking date; today when absent.
    pub date: Option<NaiveDate>,
    /// Payment mode; "Cash" when absent.
    #[validate(length(max = 50))]
    pub payment_mode: Option<String>,
    /// Free-text note.
    #[validate(length(max = 500))]
    pub note: Option<String>,
    /// Marks the transaction as a recurring bill.
    #[serde(default)]
    pub is_recurring: bool,
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
    /// Filter by `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
}

impl ListTransactionsQuery {
    fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
        .normalized()
    }
}

/// POST /transactions - Record a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> ApiResult<(StatusCode, Json<TransactionWithCategory>)> {
    payload.validate()?;
    TransactionService::validate_amount(payload.amount)?;

    let user_id = user.user_id();
    let candidates = CategoryRepository::new((*state.db).clone())
        .refs(user_id, payload.kind)
        .await?;
    let category = resolve_category(
        &candidates,
        payload.kind,
        payload.category_id,
        payload.category.as_deref(),
    )?;

    let note = payload
        .note
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let created = TransactionRepository::new((*state.db).clone())
        .create(
            user_id,
            CreateTransactionInput {
                category_id: category.id,
                amount: payload.amount,
                transaction_type: payload.kind.into(),
                transaction_date: payload.date.unwrap_or_else(|| Utc::now().date_naive()),
                payment_mode: TransactionService::payment_mode(payload.payment_mode.as_deref()),
                note,
                is_recurring: payload.is_recurring,
            },
        )
        .await?;

    info!(
        user_id = %user_id,
        transaction_id = %created.id,
        kind = %payload.kind,
        category = %created.category_name,
        "Transaction recorded"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /transactions - Newest-first page of transactions.
async fn list_transactions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> ApiResult<Json<PageResponse<TransactionWithCategory>>> {
    let page = query.page_request();
    let (rows, total) = TransactionRepository::new((*state.db).clone())
        .list(user.user_id(), query.kind.map(Into::into), page)
        .await?;

    Ok(Json(PageResponse::new(rows, page.page, page.per_page, total)))
}

/// GET /transactions/recent - Latest transactions for the dashboard.
async fn recent_transactions(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<TransactionWithCategory>>> {
    let rows = TransactionRepository::new((*state.db).clone())
        .recent(user.user_id(), RECENT_LIMIT)
        .await?;
    Ok(Json(rows))
}

/// DELETE /transactions/{id} - Delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    TransactionRepository::new((*state.db).clone())
        .delete(user.user_id(), id)
        .await?;

    info!(user_id = %user.user_id(), transaction_id = %id, "Transaction deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults_and_clamps() {
        let query = ListTransactionsQuery {
            page: None,
            per_page: Some(500),
            kind: None,
        };
        let page = query.page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 100);
    }

    #[test]
    fn test_create_request_accepts_string_amount() {
        let request: CreateTransactionRequest = serde_json::from_str(
            r#"{"amount":"499.99","type":"expense","category":"Food","date":"2024-03-01"}"#,
        )
        .unwrap();

        assert_eq!(request.amount, Decimal::new(49999, 2));
        assert_eq!(request.kind, TransactionKind::Expense);
        assert!(!request.is_recurring);
        assert!(request.validate().is_ok());
    }
}
