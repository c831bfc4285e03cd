//! Core data models for the expense tracker
//!
//! This module contains the data structures that represent the tracking
//! domain: expenses, money amounts and report periods.

pub mod expense;
pub mod money;
pub mod period;

pub use expense::{Expense, ExpenseUpdate, ExpenseValidationError, DATE_FORMAT};
pub use money::{Money, MoneyParseError};
pub use period::ReportPeriod;
