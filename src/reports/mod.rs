//! Reports module for the expense tracker
//!
//! Provides the per-date spending report for a daily, weekly or monthly period.

pub mod period_report;

pub use period_report::PeriodReport;
