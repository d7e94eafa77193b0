//! Loan data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LoanError;

/// Highest annual interest rate (percent) accepted for a loan.
pub const MAX_ANNUAL_RATE: Decimal = Decimal::ONE_HUNDRED;

/// Longest tenure accepted for a loan (50 years).
pub const MAX_TENURE_MONTHS: u32 = 600;

/// Terms of an amortizing loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Decimal,
    /// Annual interest rate in percent (12 means 12% p.a.).
    pub annual_rate: Decimal,
    /// Number of monthly installments.
    pub tenure_months: u32,
    /// Date the loan was disbursed.
    pub start_date: NaiveDate,
}

impl LoanTerms {
    /// Creates validated loan terms.
    ///
    /// # Errors
    ///
    /// Returns a `LoanError` if any term is out of range.
    pub fn new(
        principal: Decimal,
        annual_rate: Decimal,
        tenure_months: u32,
        start_date: NaiveDate,
    ) -> Result<Self, LoanError> {
        let terms = Self {
            principal,
            annual_rate,
            tenure_months,
            start_date,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Checks that the terms are within accepted ranges.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), LoanError> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanError::NonPositivePrincipal);
        }
        if self.annual_rate < Decimal::ZERO {
            return Err(LoanError::NegativeRate);
        }
        if self.annual_rate > MAX_ANNUAL_RATE {
            return Err(LoanError::RateTooHigh(self.annual_rate));
        }
        if self.tenure_months == 0 {
            return Err(LoanError::ZeroTenure);
        }
        if self.tenure_months > MAX_TENURE_MONTHS {
            return Err(LoanError::TenureTooLong(self.tenure_months));
        }
        Ok(())
    }

    /// Monthly interest rate as a fraction (`annual_rate / 12 / 100`).
    #[must_use]
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate / Decimal::from(12) / Decimal::ONE_HUNDRED
    }
}

/// Repayment progress of a loan as of a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanProgress {
    /// Fixed monthly installment.
    pub monthly_payment: Decimal,
    /// Sum of all scheduled installments.
    pub total_payable: Decimal,
    /// Interest component of the total payable.
    pub total_interest: Decimal,
    /// Installments due so far, clamped to `[0, tenure]`.
    pub months_paid: u32,
    /// Installments still to come.
    pub months_remaining: u32,
    /// `months_paid × monthly_payment`.
    pub amount_paid: Decimal,
    /// `total_payable − amount_paid`.
    pub amount_remaining: Decimal,
    /// `amount_paid / total_payable × 100`.
    pub progress_percent: Decimal,
}

impl LoanProgress {
    /// Rounds every monetary field and the percentage to 2 decimal places.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            monthly_payment: self.monthly_payment.round_dp(2),
            total_payable: self.total_payable.round_dp(2),
            total_interest: self.total_interest.round_dp(2),
            months_paid: self.months_paid,
            months_remaining: self.months_remaining,
            amount_paid: self.amount_paid.round_dp(2),
            amount_remaining: self.amount_remaining.round_dp(2),
            progress_percent: self.progress_percent.round_dp(2),
        }
    }
}

/// One installment of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Installment number, starting at 1.
    pub installment: u32,
    /// Due date of the installment.
    pub due_date: NaiveDate,
    /// Installment amount.
    pub payment: Decimal,
    /// Interest portion.
    pub interest: Decimal,
    /// Principal portion.
    pub principal: Decimal,
    /// Outstanding principal after this installment.
    pub balance: Decimal,
}
