//! Core business logic for Fintrack.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `loan` - EMI and repayment progress
//! - `budget` - Budget usage, health and history
//! - `insights` - Month-over-month insights and spend forecast
//! - `goal` - Savings goal progress
//! - `analytics` - Totals, expense breakdown and time series
//! - `category` - Default categories and category resolution
//! - `transaction` - Transaction validation and recurring bills
//! - `auth` - Password hashing, one-time passcodes, contact validation
//! - `period` - Calendar months

pub mod analytics;
pub mod auth;
pub mod budget;
pub mod category;
pub mod goal;
pub mod insights;
pub mod loan;
pub mod period;
pub mod transaction;
