//! Categories: default set and resolution of the category a transaction
//! is filed under.

mod defaults;
mod resolve;

pub use defaults::{DEFAULT_CATEGORIES, DefaultCategory};
pub use resolve::{CategoryRef, resolve_category};
