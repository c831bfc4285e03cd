//! Expense display formatting
//!
//! Provides utilities for formatting expenses as register rows.

use crate::models::{Expense, DATE_FORMAT};

const CATEGORY_WIDTH: usize = 15;
const DESCRIPTION_WIDTH: usize = 30;

/// Format a single expense as a register row, prefixed by its index
pub fn format_expense_row(index: usize, expense: &Expense, currency_symbol: &str) -> String {
    format!(
        "{:>5}  {}  {:<cat$}  {:>12}  {}",
        index,
        expense.date.format(DATE_FORMAT),
        truncate(&expense.category, CATEGORY_WIDTH),
        expense.amount.format_with_symbol(currency_symbol),
        truncate(&expense.description, DESCRIPTION_WIDTH),
        cat = CATEGORY_WIDTH
    )
    .trim_end()
    .to_string()
}

/// Format `(index, expense)` pairs as a register with a header and total
pub fn format_expense_register<'a, I>(rows: I, currency_symbol: &str) -> String
where
    I: IntoIterator<Item = (usize, &'a Expense)>,
{
    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:10}  {:<cat$}  {:>12}  {}\n",
        "Index",
        "Date",
        "Category",
        "Amount",
        "Description",
        cat = CATEGORY_WIDTH
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    let mut total = crate::models::Money::zero();
    let mut count = 0;
    for (index, expense) in rows {
        output.push_str(&format_expense_row(index, expense, currency_symbol));
        output.push('\n');
        total += &expense.amount;
        count += 1;
    }

    output.push_str(&"-".repeat(80));
    output.push('\n');
    output.push_str(&format!(
        "{} expense(s), total {}\n",
        count,
        total.format_with_symbol(currency_symbol)
    ));

    output
}

/// Truncate a string to at most `max_len` characters, marking the cut with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn expense(cents: i64, category: &str, description: &str) -> Expense {
        Expense::new(
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            category,
            description,
        )
    }

    #[test]
    fn test_format_expense_row() {
        let formatted = format_expense_row(3, &expense(5000, "food", "Test Store"), "$");
        assert!(formatted.starts_with("    3  2025-01-15  food"));
        assert!(formatted.contains("$50.00"));
        assert!(formatted.ends_with("Test Store"));
    }

    #[test]
    fn test_format_register_totals() {
        let a = expense(1000, "food", "a");
        let b = expense(250, "bus", "b");
        let formatted = format_expense_register(vec![(0, &a), (1, &b)], "€");

        assert!(formatted.contains("Index"));
        assert!(formatted.contains("€2.50"));
        assert!(formatted.contains("2 expense(s), total €12.50"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10), "Short");
        assert_eq!(truncate("A very long string", 10), "A very ...");
        assert_eq!(truncate("Crème brûlée au café", 8), "Crème...");
        assert_eq!(truncate("abcdef", 2), "..");
    }
}
