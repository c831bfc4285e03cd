//! Audit history display
//!
//! Renders recent audit log entries, oldest first.

use crate::audit::AuditEntry;

/// Format audit entries one per line, or a notice when there are none
pub fn format_audit_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No changes recorded in the audit log.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output
}
