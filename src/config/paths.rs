//! Path management for the expense tracker
//!
//! Everything lives next to the backing file:
//!
//! - `<dir>/expenses.csv`: the backing file (name chosen by the user)
//! - `<dir>/expense-cli.json`: optional settings
//! - `<dir>/<stem>.audit.log`: audit log

use std::path::{Path, PathBuf};

/// Default backing file name, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "expenses.csv";

/// Settings file name, placed beside the backing file
pub const SETTINGS_FILE: &str = "expense-cli.json";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    data_file: PathBuf,
}

impl Default for ExpensePaths {
    fn default() -> Self {
        Self::for_data_file(DEFAULT_DATA_FILE)
    }
}

impl ExpensePaths {
    /// Create paths anchored on the given backing file
    pub fn for_data_file(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// The backing CSV file
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Directory holding the backing file
    pub fn base_dir(&self) -> PathBuf {
        match self.data_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir().join(SETTINGS_FILE)
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        let stem = self
            .data_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "expenses".to_string());
        self.base_dir().join(format!("{}.audit.log", stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        let paths = ExpensePaths::default();

        assert_eq!(paths.data_file(), Path::new("expenses.csv"));
        assert_eq!(paths.base_dir(), PathBuf::from("."));
        assert_eq!(paths.settings_file(), PathBuf::from("./expense-cli.json"));
        assert_eq!(paths.audit_log(), PathBuf::from("./expenses.audit.log"));
    }

    #[test]
    fn test_paths_follow_data_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::for_data_file(temp_dir.path().join("2025.csv"));

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("expense-cli.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("2025.audit.log"));
    }
}
