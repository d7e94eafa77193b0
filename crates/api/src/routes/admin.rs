//! Admin routes.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{ApiResult, AppState, middleware::AdminUser};
use fintrack_db::{TransactionRepository, UserRepository};

/// Creates the admin routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/admin/stats", get(stats))
}

/// Platform-wide counters.
#[derive(Debug, Serialize)]
pub struct AdminStats {
    /// Registered users, verified or not.
    pub total_users: u64,
    /// Transactions across all users.
    pub total_transactions: u64,
}

/// GET /admin/stats - Platform counters. Admins only.
async fn stats(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<AdminStats>> {
    let total_users = UserRepository::new((*state.db).clone()).count().await?;
    let total_transactions = TransactionRepository::new((*state.db).clone())
        .count_all()
        .await?;

    Ok(Json(AdminStats {
        total_users,
        total_transactions,
    }))
}
