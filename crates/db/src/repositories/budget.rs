//! Budget repository: one monthly limit per `(user, category)`.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, sea_query::OnConflict,
};
use uuid::Uuid;

use crate::entities::budgets;

/// Budget repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets the limit for a category, inserting or replacing it.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        amount: Decimal,
    ) -> Result<budgets::Model, DbErr> {
        let now = Utc::now().into();
        let budget = budgets::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            category_id: Set(category_id),
            amount: Set(amount),
            created_at: Set(now),
            updated_at: Set(now),
        };

        budgets::Entity::insert(budget)
            .on_conflict(
                OnConflict::columns([budgets::Column::UserId, budgets::Column::CategoryId])
                    .update_columns([budgets::Column::Amount, budgets::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
    }

    /// All limits of a user.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<budgets::Model>, DbErr> {
        budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
    }

    /// Sum of all of a user's limits.
    pub async fn total_limit(&self, user_id: Uuid) -> Result<Decimal, DbErr> {
        Ok(self.list(user_id).await?.iter().map(|b| b.amount).sum())
    }
}
