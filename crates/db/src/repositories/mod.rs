//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every query on user-owned data is scoped by `user_id`.

pub mod analytics;
pub mod budget;
pub mod category;
pub mod goal;
pub mod loan;
pub mod otp;
pub mod transaction;
pub mod user;

pub use analytics::{AnalyticsRepository, CategoryBudgetRow, DateRange};
pub use budget::BudgetRepository;
pub use category::{CategoryError, CategoryRepository, CreateCategoryInput};
pub use goal::{CreateGoalInput, GoalError, GoalRepository};
pub use loan::{CreateLoanInput, LoanError, LoanRepository};
pub use otp::OtpRepository;
pub use transaction::{
    CreateTransactionInput, TransactionError, TransactionRepository, TransactionWithCategory,
};
pub use user::{RegisterUserInput, UserError, UserRepository};
