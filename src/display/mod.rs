//! Display formatting for terminal output
//!
//! Renders expenses as aligned register rows for the interactive shell, and
//! the audit log as a change history.

pub mod audit;
pub mod expense;

pub use audit::format_audit_history;
pub use expense::{format_expense_register, format_expense_row, truncate};
