//! Income/expense transactions and their validation rules.

pub mod error;
pub mod service;
pub mod types;

pub use error::TransactionError;
pub use service::TransactionService;
pub use types::{DEFAULT_PAYMENT_MODE, RecurringKey, TransactionKind};
