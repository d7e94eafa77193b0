//! Loan amortization: fixed monthly installment (EMI) and repayment progress.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::LoanError;
pub use service::LoanService;
pub use types::{AmortizationRow, LoanProgress, LoanTerms};
