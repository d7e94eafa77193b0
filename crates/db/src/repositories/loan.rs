//! Loan repository. Only the terms are stored; progress is derived on read.

use chrono::{NaiveDate, Utc};
use fintrack_core::loan::LoanTerms;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::loans;

/// Error types for loan operations.
#[derive(Debug, thiserror::Error)]
pub enum LoanError {
    /// Loan not found for this user.
    #[error("Loan not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a loan.
#[derive(Debug, Clone)]
pub struct CreateLoanInput {
    /// Loan name.
    pub name: String,
    /// Amount borrowed.
    pub principal: Decimal,
    /// Annual rate in percent.
    pub annual_rate: Decimal,
    /// Term in months.
    pub tenure_months: u32,
    /// First installment reference date.
    pub start_date: NaiveDate,
}

impl From<&loans::Model> for LoanTerms {
    fn from(loan: &loans::Model) -> Self {
        Self {
            principal: loan.principal,
            annual_rate: loan.annual_rate,
            tenure_months: u32::try_from(loan.tenure_months).unwrap_or(0),
            start_date: loan.start_date,
        }
    }
}

/// Loan repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct LoanRepository {
    db: DatabaseConnection,
}

impl LoanRepository {
    /// Creates a new loan repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// A user's loans, newest first.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<loans::Model>, DbErr> {
        loans::Entity::find()
            .filter(loans::Column::UserId.eq(user_id))
            .order_by_desc(loans::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Finds one of a user's loans.
    pub async fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<loans::Model>, DbErr> {
        loans::Entity::find_by_id(id)
            .filter(loans::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Stores loan terms.
    pub async fn create(&self, user_id: Uuid, input: CreateLoanInput) -> Result<loans::Model, DbErr> {
        let now = Utc::now().into();
        let loan = loans::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name),
            principal: Set(input.principal),
            annual_rate: Set(input.annual_rate),
            tenure_months: Set(i32::try_from(input.tenure_months).unwrap_or(i32::MAX)),
            start_date: Set(input.start_date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        loan.insert(&self.db).await
    }

    /// Deletes one of a user's loans.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), LoanError> {
        let result = loans::Entity::delete_many()
            .filter(loans::Column::Id.eq(id))
            .filter(loans::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(LoanError::NotFound(id));
        }
        Ok(())
    }
}
