//! Configuration module for the expense tracker
//!
//! This module provides:
//! - Resolution of the backing file, settings file and audit log paths
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::Settings;
