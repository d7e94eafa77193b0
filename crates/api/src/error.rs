//! HTTP error type.
//!
//! Every handler returns [`ApiResult`]. Domain, repository and validation
//! errors convert into [`ApiError`], which renders as
//! `{"error": <code>, "message": <text>}` with the matching status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fintrack_core::auth::{ContactError, OtpError, PasswordError};
use fintrack_core::budget::BudgetError;
use fintrack_core::goal::GoalError as GoalRuleError;
use fintrack_core::loan::LoanError as LoanRuleError;
use fintrack_core::transaction::TransactionError as TransactionRuleError;
use fintrack_db::repositories::{
    CategoryError, GoalError, LoanError, TransactionError, UserError,
};
use fintrack_shared::{AppError, JwtError};
use sea_orm::DbErr;
use serde_json::json;
use validator::ValidationErrors;

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by handlers.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub AppError);

impl ApiError {
    /// 400 with a message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// 404 with a message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    /// 401 with a message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }

    /// 403 with a message.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self(AppError::Forbidden(message.into()))
    }

    /// 500; the message is logged, never returned.
    pub fn internal(message: impl Into<String>) -> Self {
        Self(AppError::Internal(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_internal() {
            tracing::error!(error = %self.0, "Request failed");
            "An internal error occurred".to_string()
        } else {
            match &self.0 {
                AppError::Unauthorized(m)
                | AppError::Forbidden(m)
                | AppError::NotFound(m)
                | AppError::Validation(m)
                | AppError::Conflict(m)
                | AppError::Database(m)
                | AppError::Internal(m) => m.clone(),
            }
        };

        let body = json!({
            "error": self.0.error_code(),
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::AlreadyRegistered => Self(AppError::Conflict(err.to_string())),
            UserError::NotFound(_) => Self::not_found(err.to_string()),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) => Self::not_found(err.to_string()),
            CategoryError::Duplicate(_) | CategoryError::InUse(_) => {
                Self(AppError::Conflict(err.to_string()))
            }
            CategoryError::Database(e) => e.into(),
        }
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_) => Self::not_found(err.to_string()),
            TransactionError::Database(e) => e.into(),
        }
    }
}

impl From<GoalError> for ApiError {
    fn from(err: GoalError) -> Self {
        match err {
            GoalError::NotFound(_) => Self::not_found(err.to_string()),
            GoalError::Database(e) => e.into(),
        }
    }
}

impl From<LoanError> for ApiError {
    fn from(err: LoanError) -> Self {
        match err {
            LoanError::NotFound(_) => Self::not_found(err.to_string()),
            LoanError::Database(e) => e.into(),
        }
    }
}

impl From<LoanRuleError> for ApiError {
    fn from(err: LoanRuleError) -> Self {
        match err {
            LoanRuleError::Overflow => Self::internal(err.to_string()),
            _ => Self::validation(err.to_string()),
        }
    }
}

impl From<GoalRuleError> for ApiError {
    fn from(err: GoalRuleError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<TransactionRuleError> for ApiError {
    fn from(err: TransactionRuleError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<OtpError> for ApiError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::Malformed => Self::validation(err.to_string()),
            OtpError::Mismatch
            | OtpError::Expired
            | OtpError::Consumed
            | OtpError::TooManyAttempts => Self::unauthorized(err.to_string()),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooShort => Self::validation(err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;
    use uuid::Uuid;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let (status, body) = render(ApiError::validation("Amount must be greater than zero")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Amount must be greater than zero");
    }

    #[tokio::test]
    async fn test_database_error_is_sanitized() {
        let (status, body) = render(DbErr::Custom("relation users does not exist".into()).into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[rstest]
    #[case(CategoryError::InUse(3).into(), StatusCode::CONFLICT)]
    #[case(CategoryError::NotFound(Uuid::nil()).into(), StatusCode::NOT_FOUND)]
    #[case(UserError::AlreadyRegistered.into(), StatusCode::CONFLICT)]
    #[case(OtpError::Expired.into(), StatusCode::UNAUTHORIZED)]
    #[case(OtpError::Malformed.into(), StatusCode::BAD_REQUEST)]
    #[case(OtpError::TooManyAttempts.into(), StatusCode::UNAUTHORIZED)]
    #[case(LoanRuleError::ZeroTenure.into(), StatusCode::BAD_REQUEST)]
    #[case(GoalRuleError::NonPositiveContribution.into(), StatusCode::BAD_REQUEST)]
    #[tokio::test]
    async fn test_status_mapping(#[case] err: ApiError, #[case] expected: StatusCode) {
        let (status, _) = render(err).await;
        assert_eq!(status, expected);
    }
}
