//! Storage layer for the expense tracker
//!
//! Provides the in-memory `ExpenseStore` and the CSV backing file it is
//! loaded from and saved to.

pub mod file_io;
pub mod store;

pub use file_io::{read_expenses, write_expenses_atomic};
pub use store::{ExpenseStore, LoadOutcome};
