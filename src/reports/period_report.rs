//! Period Report
//!
//! Totals spending per date over the expenses a report period includes.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Money, ReportPeriod, DATE_FORMAT};
use crate::storage::ExpenseStore;

/// Spending per date for one period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodReport {
    /// Period the report covers
    pub period: ReportPeriod,
    /// Date the period is measured from
    pub today: NaiveDate,
    /// Total spent per date; dates without spending are absent
    pub totals: BTreeMap<NaiveDate, Money>,
}

impl PeriodReport {
    /// Generate a report for `period` as of `today`
    pub fn generate(store: &ExpenseStore, period: ReportPeriod, today: NaiveDate) -> Self {
        Self {
            period,
            today,
            totals: store.report(period, today),
        }
    }

    /// True if no expense falls in the period
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Total across all dates
    pub fn grand_total(&self) -> Money {
        self.totals.values().sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        if self.is_empty() {
            return "No expenses found for the selected time period.\n".to_string();
        }

        let mut output = String::new();
        output.push_str(&format!(
            "{} report as of {}\n",
            capitalize(self.period.as_str()),
            self.today.format(DATE_FORMAT)
        ));
        output.push_str(&"=".repeat(40));
        output.push('\n');

        for (date, total) in &self.totals {
            output.push_str(&format!(
                "Date: {}, Total Expense: {:>12}\n",
                date.format(DATE_FORMAT),
                total.format_with_symbol(currency_symbol)
            ));
        }

        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "Grand total: {}\n",
            self.grand_total().format_with_symbol(currency_symbol)
        ));

        output
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
