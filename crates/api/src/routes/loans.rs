//! Loan routes. Repayment figures are recomputed from the stored terms on
//! every read.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{ApiError, ApiResult, AppState, middleware::AuthUser};
use fintrack_core::loan::{AmortizationRow, LoanProgress, LoanService, LoanTerms};
use fintrack_db::LoanRepository;
use fintrack_db::entities::loans;
use fintrack_db::repositories::CreateLoanInput;

/// Creates the loan routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/loans", get(list_loans).post(create_loan))
        .route("/loans/{id}", delete(delete_loan))
        .route("/loans/{id}/schedule", get(loan_schedule))
}

/// Request body for creating a loan.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLoanRequest {
    /// Loan name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Amount borrowed.
    pub principal: Decimal,
    /// Annual interest rate in percent.
    pub annual_rate: Decimal,
    /// Number of monthly installments.
    pub tenure_months: u32,
    /// Disbursement date.
    pub start_date: NaiveDate,
}

/// Loan terms with repayment progress as of today.
#[derive(Debug, Serialize)]
pub struct LoanResponse {
    /// Loan ID.
    pub id: Uuid,
    /// Loan name.
    pub name: String,
    /// Amount borrowed.
    pub principal: Decimal,
    /// Annual interest rate in percent.
    pub annual_rate: Decimal,
    /// Number of monthly installments.
    pub tenure_months: i32,
    /// Disbursement date.
    pub start_date: NaiveDate,
    /// Derived repayment figures.
    #[serde(flatten)]
    pub progress: LoanProgress,
}

impl LoanResponse {
    fn build(loan: loans::Model, as_of: NaiveDate) -> ApiResult<Self> {
        let progress = LoanService::progress(&LoanTerms::from(&loan), as_of)?.rounded();
        Ok(Self {
            id: loan.id,
            name: loan.name,
            principal: loan.principal,
            annual_rate: loan.annual_rate,
            tenure_months: loan.tenure_months,
            start_date: loan.start_date,
            progress,
        })
    }
}

/// GET /loans - Loans with progress as of today.
async fn list_loans(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<LoanResponse>>> {
    let today = Utc::now().date_naive();
    let loans = LoanRepository::new((*state.db).clone())
        .list(user.user_id())
        .await?;

    let loans = loans
        .into_iter()
        .map(|loan| LoanResponse::build(loan, today))
        .collect::<ApiResult<Vec<_>>>()?;
    Ok(Json(loans))
}

/// POST /loans - Record a loan.
async fn create_loan(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateLoanRequest>,
) -> ApiResult<(StatusCode, Json<LoanResponse>)> {
    payload.validate()?;
    let terms = LoanTerms::new(
        payload.principal,
        payload.annual_rate,
        payload.tenure_months,
        payload.start_date,
    )?;
    LoanService::monthly_payment(&terms)?;

    let loan = LoanRepository::new((*state.db).clone())
        .create(
            user.user_id(),
            CreateLoanInput {
                name: payload.name.trim().to_string(),
                principal: terms.principal,
                annual_rate: terms.annual_rate,
                tenure_months: terms.tenure_months,
                start_date: terms.start_date,
            },
        )
        .await?;

    info!(user_id = %user.user_id(), loan_id = %loan.id, "Loan created");
    let response = LoanResponse::build(loan, Utc::now().date_naive())?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /loans/{id}/schedule - Full amortization schedule.
async fn loan_schedule(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<AmortizationRow>>> {
    let loan = LoanRepository::new((*state.db).clone())
        .find(user.user_id(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Loan not found: {id}")))?;

    Ok(Json(LoanService::schedule(&LoanTerms::from(&loan))?))
}

/// DELETE /loans/{id} - Delete a loan.
async fn delete_loan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    LoanRepository::new((*state.db).clone())
        .delete(user.user_id(), id)
        .await?;

    info!(user_id = %user.user_id(), loan_id = %id, "Loan deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn loan() -> loans::Model {
        let now = Utc::now().into();
        loans::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Car".to_string(),
            principal: dec!(120000),
            annual_rate: dec!(12),
            tenure_months: 12,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_loan_response_progress() {
        let as_of = NaiveDate::from_ymd_opt(2024, 7, 20).unwrap();
        let response = LoanResponse::build(loan(), as_of).unwrap();

        assert_eq!(response.progress.monthly_payment, dec!(10661.85));
        assert_eq!(response.progress.months_paid, 6);
        assert_eq!(response.progress.months_remaining, 6);
    }

    #[test]
    fn test_create_request_validation() {
        let request = CreateLoanRequest {
            name: String::new(),
            principal: dec!(1000),
            annual_rate: dec!(10),
            tenure_months: 12,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert!(request.validate().is_err());
    }
}
