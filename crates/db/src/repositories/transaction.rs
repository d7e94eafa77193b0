//! Transaction repository for database operations.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use fintrack_core::transaction::{RecurringKey, TransactionService};
use fintrack_shared::types::PageRequest;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
    sea_query::Expr,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{categories, sea_orm_active_enums::TransactionType, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found for this user.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a transaction. The category is already resolved.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Resolved category.
    pub category_id: Uuid,
    /// Positive amount.
    pub amount: Decimal,
    /// Direction.
    pub transaction_type: TransactionType,
    /// Booking date.
    pub transaction_date: NaiveDate,
    /// Payment mode.
    pub payment_mode: String,
    /// Free-text note.
    pub note: Option<String>,
    /// Recurring bill flag.
    pub is_recurring: bool,
}

/// Transaction joined with its category.
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct TransactionWithCategory {
    /// Transaction ID.
    pub id: Uuid,
    /// Amount.
    pub amount: Decimal,
    /// Direction.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Booking date.
    #[serde(rename = "date")]
    pub transaction_date: NaiveDate,
    /// Payment mode.
    pub payment_mode: String,
    /// Free-text note.
    pub note: Option<String>,
    /// Recurring bill flag.
    pub is_recurring: bool,
    /// Category ID.
    pub category_id: Uuid,
    /// Category name.
    #[serde(rename = "category")]
    pub category_name: String,
    /// Category color.
    pub category_color: String,
    /// Category icon.
    pub category_icon: String,
    /// Insert time.
    pub created_at: DateTime<FixedOffset>,
}

impl TransactionWithCategory {
    fn recurring_key(&self) -> RecurringKey {
        RecurringKey {
            note: self.note.clone(),
            category_id: self.category_id,
            amount: self.amount,
            kind: self.transaction_type.into(),
        }
    }
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn joined(user_id: Uuid) -> Select<transactions::Entity> {
        transactions::Entity::find()
            .select_only()
            .columns([
                transactions::Column::Id,
                transactions::Column::Amount,
                transactions::Column::TransactionType,
                transactions::Column::TransactionDate,
                transactions::Column::PaymentMode,
                transactions::Column::Note,
                transactions::Column::IsRecurring,
                transactions::Column::CategoryId,
                transactions::Column::CreatedAt,
            ])
            .column_as(categories::Column::Name, "category_name")
            .column_as(categories::Column::Color, "category_color")
            .column_as(categories::Column::Icon, "category_icon")
            .join(JoinType::InnerJoin, transactions::Relation::Categories.def())
            .filter(transactions::Column::UserId.eq(user_id))
    }

    /// Inserts a transaction and returns it with its category.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateTransactionInput,
    ) -> Result<TransactionWithCategory, TransactionError> {
        let now = Utc::now().into();
        let txn = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            category_id: Set(input.category_id),
            amount: Set(input.amount),
            transaction_type: Set(input.transaction_type),
            transaction_date: Set(input.transaction_date),
            payment_mode: Set(input.payment_mode),
            note: Set(input.note),
            is_recurring: Set(input.is_recurring),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = txn.insert(&self.db).await?;
        self.find(user_id, inserted.id)
            .await?
            .ok_or(TransactionError::NotFound(inserted.id))
    }

    /// Finds one of a user's transactions.
    pub async fn find(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<TransactionWithCategory>, DbErr> {
        Self::joined(user_id)
            .filter(transactions::Column::Id.eq(id))
            .into_model::<TransactionWithCategory>()
            .one(&self.db)
            .await
    }

    /// Newest-first page of transactions, optionally filtered by type.
    ///
    /// Returns the rows and the total count before paging.
    pub async fn list(
        &self,
        user_id: Uuid,
        transaction_type: Option<TransactionType>,
        page: PageRequest,
    ) -> Result<(Vec<TransactionWithCategory>, u64), DbErr> {
        let mut count_query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));
        let mut query = Self::joined(user_id);

        if let Some(kind) = transaction_type {
            count_query = count_query.filter(transactions::Column::TransactionType.eq(kind));
            query = query.filter(transactions::Column::TransactionType.eq(kind));
        }

        let total = count_query.count(&self.db).await?;
        let rows = query
            .order_by_desc(transactions::Column::TransactionDate)
            .order_by_desc(transactions::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .into_model::<TransactionWithCategory>()
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// The `limit` most recent transactions.
    pub async fn recent(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<TransactionWithCategory>, DbErr> {
        Self::joined(user_id)
            .order_by_desc(transactions::Column::TransactionDate)
            .order_by_desc(transactions::Column::CreatedAt)
            .limit(limit)
            .into_model::<TransactionWithCategory>()
            .all(&self.db)
            .await
    }

    /// Deletes one of a user's transactions.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), TransactionError> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id))
            .filter(transactions::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound(id));
        }
        Ok(())
    }

    /// One entry per recurring bill: the latest occurrence of each
    /// `(note, category, amount, type)` group.
    pub async fn recurring_templates(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TransactionWithCategory>, DbErr> {
        let occurrences = Self::joined(user_id)
            .filter(transactions::Column::IsRecurring.eq(true))
            .order_by_desc(transactions::Column::TransactionDate)
            .order_by_desc(transactions::Column::CreatedAt)
            .into_model::<TransactionWithCategory>()
            .all(&self.db)
            .await?;

        Ok(TransactionService::distinct_recurring(
            occurrences,
            TransactionWithCategory::recurring_key,
        ))
    }

    /// Records a new occurrence of a recurring bill dated `on`.
    pub async fn process_recurring(
        &self,
        user_id: Uuid,
        id: Uuid,
        on: NaiveDate,
    ) -> Result<TransactionWithCategory, TransactionError> {
        let template = self
            .find(user_id, id)
            .await?
            .filter(|t| t.is_recurring)
            .ok_or(TransactionError::NotFound(id))?;

        self.create(
            user_id,
            CreateTransactionInput {
                category_id: template.category_id,
                amount: template.amount,
                transaction_type: template.transaction_type,
                transaction_date: on,
                payment_mode: template.payment_mode,
                note: template.note,
                is_recurring: true,
            },
        )
        .await
    }

    /// Stops a recurring bill by clearing the flag on every occurrence.
    ///
    /// Returns the number of occurrences updated.
    pub async fn stop_recurring(&self, user_id: Uuid, id: Uuid) -> Result<u64, TransactionError> {
        let template = self
            .find(user_id, id)
            .await?
            .filter(|t| t.is_recurring)
            .ok_or(TransactionError::NotFound(id))?;

        let note_filter = match &template.note {
            Some(note) => transactions::Column::Note.eq(note.clone()),
            None => transactions::Column::Note.is_null(),
        };

        let result = transactions::Entity::update_many()
            .col_expr(transactions::Column::IsRecurring, Expr::value(false))
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::IsRecurring.eq(true))
            .filter(transactions::Column::CategoryId.eq(template.category_id))
            .filter(transactions::Column::Amount.eq(template.amount))
            .filter(transactions::Column::TransactionType.eq(template.transaction_type))
            .filter(note_filter)
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Total number of transactions across all users.
    pub async fn count_all(&self) -> Result<u64, DbErr> {
        transactions::Entity::find().count(&self.db).await
    }
}
