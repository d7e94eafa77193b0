//! Loan error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Loan validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoanError {
    /// Principal must be greater than zero.
    #[error("Principal must be greater than zero")]
    NonPositivePrincipal,

    /// Interest rate cannot be negative.
    #[error("Interest rate cannot be negative")]
    NegativeRate,

    /// Interest rate above the accepted ceiling.
    #[error("Interest rate {0}% exceeds the maximum of {max}%", max = super::types::MAX_ANNUAL_RATE)]
    RateTooHigh(Decimal),

    /// Tenure must be at least one month.
    #[error("Tenure must be at least one month")]
    ZeroTenure,

    /// Tenure above the accepted ceiling.
    #[error("Tenure of {0} months exceeds the maximum of {max} months", max = super::types::MAX_TENURE_MONTHS)]
    TenureTooLong(u32),

    /// Compounding overflowed decimal range.
    #[error("Loan terms overflow decimal precision")]
    Overflow,
}
