//! Expense CLI - a personal expense tracker for the terminal
//!
//! This library records, edits, filters and summarizes expenses kept in a
//! CSV file. The binary wraps it in a numbered interactive menu.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Expenses, money amounts and report periods
//! - `storage`: The in-memory `ExpenseStore` and its CSV backing file
//! - `audit`: Audit logging of every mutation
//! - `reports`: Per-date spending reports
//! - `display`: Terminal formatting
//! - `cli`: The interactive shell
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_cli::storage::ExpenseStore;
//!
//! let mut store = ExpenseStore::new();
//! store.load("expenses.csv")?;
//! store.add("42.50", "2025-06-15", "food", "dinner")?;
//! store.save("expenses.csv")?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
