//! `SeaORM` active enums mapped to PostgreSQL enum types.

use fintrack_core::transaction::TransactionKind;
use fintrack_shared::ContactType as SharedContactType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `contact_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "contact_type")]
pub enum ContactType {
    /// E-mail address.
    #[sea_orm(string_value = "email")]
    Email,
    /// Mobile number.
    #[sea_orm(string_value = "mobile")]
    Mobile,
}

/// `transaction_type` enum, shared by categories and transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
pub enum TransactionType {
    /// Money in.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money out.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<SharedContactType> for ContactType {
    fn from(value: SharedContactType) -> Self {
        match value {
            SharedContactType::Email => Self::Email,
            SharedContactType::Mobile => Self::Mobile,
        }
    }
}

impl From<ContactType> for SharedContactType {
    fn from(value: ContactType) -> Self {
        match value {
            ContactType::Email => Self::Email,
            ContactType::Mobile => Self::Mobile,
        }
    }
}

impl From<TransactionKind> for TransactionType {
    fn from(value: TransactionKind) -> Self {
        match value {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

impl From<TransactionType> for TransactionKind {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
        }
    }
}
