//! Savings goal routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{ApiResult, AppState, middleware::AuthUser};
use fintrack_core::goal::{GoalProgress, GoalService};
use fintrack_db::GoalRepository;
use fintrack_db::entities::goals;
use fintrack_db::repositories::CreateGoalInput;

/// Creates the goal routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/{id}", delete(delete_goal))
        .route("/goals/{id}/contributions", post(add_contribution))
}

/// Request body for creating a goal.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGoalRequest {
    /// Goal name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Amount to save.
    pub target_amount: Decimal,
    /// Optional target date.
    pub deadline: Option<NaiveDate>,
}

/// Request body for a contribution.
#[derive(Debug, Deserialize)]
pub struct ContributionRequest {
    /// Amount added to the goal.
    pub amount: Decimal,
}

/// Goal with derived progress.
#[derive(Debug, Serialize)]
pub struct GoalResponse {
    /// Goal ID.
    pub id: Uuid,
    /// Goal name.
    pub name: String,
    /// Amount to save.
    pub target_amount: Decimal,
    /// Amount saved so far.
    pub current_amount: Decimal,
    /// Optional target date.
    pub deadline: Option<NaiveDate>,
    /// Progress figures.
    #[serde(flatten)]
    pub progress: GoalProgress,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<goals::Model> for GoalResponse {
    fn from(goal: goals::Model) -> Self {
        Self {
            progress: GoalService::progress(goal.current_amount, goal.target_amount),
            id: goal.id,
            name: goal.name,
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            deadline: goal.deadline,
            created_at: goal.created_at,
        }
    }
}

/// GET /goals - Goals, newest first.
async fn list_goals(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<GoalResponse>>> {
    let goals = GoalRepository::new((*state.db).clone())
        .list(user.user_id())
        .await?;
    Ok(Json(goals.into_iter().map(GoalResponse::from).collect()))
}

/// POST /goals - Create a goal with nothing saved yet.
async fn create_goal(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateGoalRequest>,
) -> ApiResult<(StatusCode, Json<GoalResponse>)> {
    payload.validate()?;
    GoalService::validate_new(&payload.name, payload.target_amount)?;

    let goal = GoalRepository::new((*state.db).clone())
        .create(
            user.user_id(),
            CreateGoalInput {
                name: payload.name.trim().to_string(),
                target_amount: payload.target_amount,
                deadline: payload.deadline,
            },
        )
        .await?;

    info!(user_id = %user.user_id(), goal_id = %goal.id, "Goal created");
    Ok((StatusCode::CREATED, Json(goal.into())))
}

/// POST /goals/{id}/contributions - Add money to a goal.
async fn add_contribution(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContributionRequest>,
) -> ApiResult<Json<GoalResponse>> {
    GoalService::validate_contribution(payload.amount)?;

    let goal = GoalRepository::new((*state.db).clone())
        .add_contribution(user.user_id(), id, payload.amount)
        .await?;

    info!(
        user_id = %user.user_id(),
        goal_id = %id,
        amount = %payload.amount,
        "Goal contribution added"
    );
    Ok(Json(goal.into()))
}

/// DELETE /goals/{id} - Delete a goal.
async fn delete_goal(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    GoalRepository::new((*state.db).clone())
        .delete(user.user_id(), id)
        .await?;

    info!(user_id = %user.user_id(), goal_id = %id, "Goal deleted");
    Ok(StatusCode::NO_CONTENT)
}
