//! Category routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{ApiResult, AppState, middleware::AuthUser};
use fintrack_core::transaction::TransactionKind;
use fintrack_db::CategoryRepository;
use fintrack_db::entities::categories;
use fintrack_db::repositories::CreateCategoryInput;

const DEFAULT_COLOR: &str = "#64748b";
const DEFAULT_ICON: &str = "🏷️";

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", delete(delete_category))
}

/// Request body for creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Display name.
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    /// Hex color, e.g. `#f97316`.
    #[validate(length(equal = 7))]
    pub color: Option<String>,
    /// Emoji icon.
    #[validate(length(min = 1, max = 16))]
    pub icon: Option<String>,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Category as returned to clients.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Hex color.
    pub color: String,
    /// Emoji icon.
    pub icon: String,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Seeded at verification.
    pub is_default: bool,
}

impl From<categories::Model> for CategoryResponse {
    fn from(c: categories::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            color: c.color,
            icon: c.icon,
            kind: c.category_type.into(),
            is_default: c.is_default,
        }
    }
}

/// GET /categories - List the user's categories.
async fn list_categories(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let rows = CategoryRepository::new((*state.db).clone())
        .list(user.user_id())
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /categories - Create a category.
async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    payload.validate()?;

    let category = CategoryRepository::new((*state.db).clone())
        .create(
            user.user_id(),
            CreateCategoryInput {
                name: payload.name,
                color: payload.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
                icon: payload.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
                category_type: payload.kind.into(),
            },
        )
        .await?;

    info!(user_id = %user.user_id(), category_id = %category.id, "Category created");
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// DELETE /categories/{id} - Delete an unused category.
async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    CategoryRepository::new((*state.db).clone())
        .delete(user.user_id(), id)
        .await?;

    info!(user_id = %user.user_id(), category_id = %id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
