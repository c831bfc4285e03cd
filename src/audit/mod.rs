//! Audit logging for the expense tracker
//!
//! Every add, update and delete is appended to a line-delimited JSON log
//! with the expense as it was before and after the change.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_cli::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! logger.log(&AuditEntry::created(0, &expense))?;
//! logger.log(&AuditEntry::updated(0, &before, &after))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
