//! Category repository for database operations.

use chrono::Utc;
use fintrack_core::category::{CategoryRef, DEFAULT_CATEGORIES};
use fintrack_core::transaction::TransactionKind;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, sea_query::OnConflict,
};
use uuid::Uuid;

use crate::entities::{categories, sea_orm_active_enums::TransactionType, transactions};

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Category not found for this user.
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    /// Same name and type already exists.
    #[error("Category '{0}' already exists")]
    Duplicate(String),

    /// Transactions still reference the category.
    #[error("Category is used by {0} transaction(s)")]
    InUse(u64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Display name.
    pub name: String,
    /// Hex color.
    pub color: String,
    /// Emoji icon.
    pub icon: String,
    /// Direction.
    pub category_type: TransactionType,
}

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All categories of a user ordered by type, then name.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<categories::Model>, DbErr> {
        categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .order_by_asc(categories::Column::CategoryType)
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
    }

    /// Categories of one type in creation order.
    ///
    /// Creation order makes the first entry the fallback for transactions
    /// that name no resolvable category.
    pub async fn list_by_type(
        &self,
        user_id: Uuid,
        category_type: TransactionType,
    ) -> Result<Vec<categories::Model>, DbErr> {
        categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .filter(categories::Column::CategoryType.eq(category_type))
            .order_by_asc(categories::Column::CreatedAt)
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
    }

    /// Lightweight references used for category resolution.
    pub async fn refs(&self, user_id: Uuid, kind: TransactionKind) -> Result<Vec<CategoryRef>, DbErr> {
        let rows = self.list_by_type(user_id, kind.into()).await?;
        Ok(rows
            .into_iter()
            .map(|c| CategoryRef {
                id: c.id,
                name: c.name,
                kind: c.category_type.into(),
            })
            .collect())
    }

    /// Finds a user's category by ID.
    pub async fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<categories::Model>, DbErr> {
        categories::Entity::find_by_id(id)
            .filter(categories::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Finds a user's category by name (case-insensitive) and type.
    pub async fn find_by_name(
        &self,
        user_id: Uuid,
        name: &str,
        category_type: TransactionType,
    ) -> Result<Option<categories::Model>, DbErr> {
        let wanted = name.trim().to_lowercase();
        let rows = self.list_by_type(user_id, category_type).await?;
        Ok(rows.into_iter().find(|c| c.name.to_lowercase() == wanted))
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::Duplicate` when the user already has a category
    /// with the same name and type.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateCategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        let name = input.name.trim().to_string();
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(name.clone()),
            color: Set(input.color),
            icon: Set(input.icon),
            category_type: Set(input.category_type),
            is_default: Set(false),
            created_at: Set(Utc::now().into()),
        };

        category.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => CategoryError::Duplicate(name),
            _ => CategoryError::Database(e),
        })
    }

    /// Deletes a category that no transaction references.
    ///
    /// Budgets on the category are removed with it.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), CategoryError> {
        if self.find(user_id, id).await?.is_none() {
            return Err(CategoryError::NotFound(id));
        }

        let in_use = transactions::Entity::find()
            .filter(transactions::Column::CategoryId.eq(id))
            .count(&self.db)
            .await?;
        if in_use > 0 {
            return Err(CategoryError::InUse(in_use));
        }

        categories::Entity::delete_many()
            .filter(categories::Column::Id.eq(id))
            .filter(categories::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Inserts the default categories, skipping any the user already has.
    ///
    /// Returns the number of categories inserted.
    pub async fn seed_defaults(&self, user_id: Uuid) -> Result<u64, DbErr> {
        let now = Utc::now();
        let models = DEFAULT_CATEGORIES.iter().enumerate().map(|(i, c)| {
            // Offset timestamps so creation order follows the default list.
            let created_at = now + chrono::Duration::milliseconds(i64::try_from(i).unwrap_or(0));
            categories::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                name: Set(c.name.to_string()),
                color: Set(c.color.to_string()),
                icon: Set(c.icon.to_string()),
                category_type: Set(c.kind.into()),
                is_default: Set(true),
                created_at: Set(created_at.into()),
            }
        });

        categories::Entity::insert_many(models)
            .on_conflict(
                OnConflict::columns([
                    categories::Column::UserId,
                    categories::Column::Name,
                    categories::Column::CategoryType,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
    }
}
