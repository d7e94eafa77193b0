//! One-time passcode repository.

use chrono::{DateTime, Utc};
use fintrack_core::auth::MAX_OTP_ATTEMPTS;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
    sea_query::{Expr, SimpleExpr},
};
use uuid::Uuid;

use crate::entities::otp_codes;

/// Passcode repository.
#[derive(Debug, Clone)]
pub struct OtpRepository {
    db: DatabaseConnection,
}

impl OtpRepository {
    /// Creates a new passcode repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new code digest for `contact`, invalidating older pending codes.
    pub async fn create(
        &self,
        contact: &str,
        code_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<otp_codes::Model, DbErr> {
        self.invalidate_pending(contact).await?;

        let otp = otp_codes::ActiveModel {
            id: Set(Uuid::new_v4()),
            contact: Set(contact.to_string()),
            code_hash: Set(code_hash.to_string()),
            expires_at: Set(expires_at.into()),
            consumed_at: Set(None),
            failed_attempts: Set(0),
            created_at: Set(Utc::now().into()),
        };

        otp.insert(&self.db).await
    }

    /// Newest unconsumed code for `contact`.
    pub async fn find_latest_pending(
        &self,
        contact: &str,
    ) -> Result<Option<otp_codes::Model>, DbErr> {
        otp_codes::Entity::find()
            .filter(otp_codes::Column::Contact.eq(contact))
            .filter(otp_codes::Column::ConsumedAt.is_null())
            .order_by_desc(otp_codes::Column::CreatedAt)
            .one(&self.db)
            .await
    }

    /// Marks a code as used.
    pub async fn consume(&self, id: Uuid) -> Result<(), DbErr> {
        otp_codes::Entity::update_many()
            .col_expr(otp_codes::Column::ConsumedAt, Expr::value(Utc::now()))
            .filter(otp_codes::Column::Id.eq(id))
            .filter(otp_codes::Column::ConsumedAt.is_null())
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Counts a wrong guess against a pending code.
    ///
    /// The increment is a single `UPDATE`; the guess that reaches
    /// `MAX_OTP_ATTEMPTS` also consumes the code. Returns the updated row, or
    /// `None` if the code was no longer pending.
    pub async fn record_failed_attempt(
        &self,
        id: Uuid,
    ) -> Result<Option<otp_codes::Model>, DbErr> {
        let limit = i32::try_from(MAX_OTP_ATTEMPTS).unwrap_or(i32::MAX);
        let consumed_at: SimpleExpr = Expr::case(
            Expr::col(otp_codes::Column::FailedAttempts).gte(limit - 1),
            Expr::value(Utc::now()),
        )
        .finally(Expr::col(otp_codes::Column::ConsumedAt))
        .into();

        let updated = otp_codes::Entity::update_many()
            .col_expr(
                otp_codes::Column::FailedAttempts,
                Expr::col(otp_codes::Column::FailedAttempts).add(1),
            )
            .col_expr(otp_codes::Column::ConsumedAt, consumed_at)
            .filter(otp_codes::Column::Id.eq(id))
            .filter(otp_codes::Column::ConsumedAt.is_null())
            .exec_with_returning(&self.db)
            .await?;

        Ok(updated.into_iter().next())
    }

    /// Consumes every pending code for `contact`.
    pub async fn invalidate_pending(&self, contact: &str) -> Result<u64, DbErr> {
        let result = otp_codes::Entity::update_many()
            .col_expr(otp_codes::Column::ConsumedAt, Expr::value(Utc::now()))
            .filter(otp_codes::Column::Contact.eq(contact))
            .filter(otp_codes::Column::ConsumedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
