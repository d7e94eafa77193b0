//! Savings goal repository.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};
use uuid::Uuid;

use crate::entities::goals;

/// Error types for goal operations.
#[derive(Debug, thiserror::Error)]
pub enum GoalError {
    /// Goal not found for this user.
    #[error("Goal not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a goal.
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    /// Goal name.
    pub name: String,
    /// Amount to save.
    pub target_amount: Decimal,
    /// Optional target date.
    pub deadline: Option<NaiveDate>,
}

/// Goal repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct GoalRepository {
    db: DatabaseConnection,
}

impl GoalRepository {
    /// Creates a new goal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// A user's goals, newest first.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<goals::Model>, DbErr> {
        goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id))
            .order_by_desc(goals::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Finds one of a user's goals.
    pub async fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<goals::Model>, DbErr> {
        goals::Entity::find_by_id(id)
            .filter(goals::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Creates a goal with nothing saved yet.
    pub async fn create(&self, user_id: Uuid, input: CreateGoalInput) -> Result<goals::Model, DbErr> {
        let now = Utc::now().into();
        let goal = goals::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name),
            target_amount: Set(input.target_amount),
            current_amount: Set(Decimal::ZERO),
            deadline: Set(input.deadline),
            created_at: Set(now),
            updated_at: Set(now),
        };

        goal.insert(&self.db).await
    }

    /// Adds `amount` to the saved total in a single UPDATE.
    pub async fn add_contribution(
        &self,
        user_id: Uuid,
        id: Uuid,
        amount: Decimal,
    ) -> Result<goals::Model, GoalError> {
        let result = goals::Entity::update_many()
            .col_expr(
                goals::Column::CurrentAmount,
                Expr::col(goals::Column::CurrentAmount).add(amount),
            )
            .filter(goals::Column::Id.eq(id))
            .filter(goals::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(GoalError::NotFound(id));
        }

        self.find(user_id, id).await?.ok_or(GoalError::NotFound(id))
    }

    /// Deletes one of a user's goals.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), GoalError> {
        let result = goals::Entity::delete_many()
            .filter(goals::Column::Id.eq(id))
            .filter(goals::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(GoalError::NotFound(id));
        }
        Ok(())
    }
}
