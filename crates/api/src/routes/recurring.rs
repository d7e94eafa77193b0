//! Recurring bill routes.
//!
//! A recurring bill is any transaction flagged `is_recurring`. Its latest
//! occurrence serves as the template for the next one.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{ApiResult, AppState, middleware::AuthUser};
use fintrack_db::TransactionRepository;
use fintrack_db::repositories::TransactionWithCategory;

/// Creates the recurring bill routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recurring", get(list_recurring))
        .route("/recurring/{id}", delete(stop_recurring))
        .route("/recurring/{id}/process", post(process_recurring))
}

/// Optional body for processing a bill.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessRecurringRequest {
    /// Booking date of the new occurrence; today when absent.
    pub date: Option<NaiveDate>,
}

/// Response after stopping a bill.
#[derive(Debug, Serialize)]
pub struct StopRecurringResponse {
    /// Number of occurrences that were unflagged.
    pub stopped: u64,
}

/// GET /recurring - One template per recurring bill.
async fn list_recurring(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<TransactionWithCategory>>> {
    let templates = TransactionRepository::new((*state.db).clone())
        .recurring_templates(user.user_id())
        .await?;
    Ok(Json(templates))
}

/// POST /recurring/{id}/process - Record this period's occurrence of a bill.
async fn process_recurring(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<ProcessRecurringRequest>>,
) -> ApiResult<(StatusCode, Json<TransactionWithCategory>)> {
    let Json(request) = payload.unwrap_or_default();
    let on = request.date.unwrap_or_else(|| Utc::now().date_naive());

    let created = TransactionRepository::new((*state.db).clone())
        .process_recurring(user.user_id(), id, on)
        .await?;

    info!(
        user_id = %user.user_id(),
        template_id = %id,
        transaction_id = %created.id,
        "Recurring bill processed"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /recurring/{id} - Stop a recurring bill. Past occurrences are kept.
async fn stop_recurring(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<StopRecurringResponse>> {
    let stopped = TransactionRepository::new((*state.db).clone())
        .stop_recurring(user.user_id(), id)
        .await?;

    info!(user_id = %user.user_id(), template_id = %id, stopped, "Recurring bill stopped");
    Ok(Json(StopRecurringResponse { stopped }))
}
