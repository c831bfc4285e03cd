//! Expense model
//!
//! Represents a single recorded outflow: an amount, the day it happened,
//! a category label and a free-form description.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Date format used for input, display and the backing file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Amount spent (always positive)
    pub amount: Money,

    /// Day of the expense
    pub date: NaiveDate,

    /// Category label, matched exactly when filtering
    #[serde(default)]
    pub category: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        amount: Money,
        date: NaiveDate,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            date,
            category: category.into(),
            description: description.into(),
        }
    }

    /// Build an expense from user-entered text, validating amount and date
    pub fn parse(
        amount: &str,
        date: &str,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ExpenseValidationError> {
        let expense = Self::new(parse_amount(amount)?, parse_date(date)?, category, description);
        expense.validate()?;
        Ok(expense)
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount.clone()));
        }
        Ok(())
    }

    /// Apply a partial update, returning the updated copy
    ///
    /// `self` is never modified, so a failure on any field leaves the
    /// original untouched.
    pub fn with_update(&self, update: &ExpenseUpdate) -> Result<Self, ExpenseValidationError> {
        let mut updated = self.clone();

        if let Some(amount) = non_blank(&update.amount) {
            updated.amount = parse_amount(amount)?;
        }
        if let Some(date) = non_blank(&update.date) {
            updated.date = parse_date(date)?;
        }
        if let Some(category) = non_blank(&update.category) {
            updated.category = category.to_string();
        }
        if let Some(description) = non_blank(&update.description) {
            updated.description = description.to_string();
        }

        updated.validate()?;
        Ok(updated)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date.format(DATE_FORMAT),
            self.amount,
            self.category,
            self.description
        )
    }
}

/// Fields to change on an existing expense; `None` or blank leaves a field as is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseUpdate {
    pub amount: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl ExpenseUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new amount
    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    /// Set a new date
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set a new category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set a new description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        [&self.amount, &self.date, &self.category, &self.description]
            .iter()
            .all(|field| non_blank(field).is_none())
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Parse a positive amount
pub fn parse_amount(s: &str) -> Result<Money, ExpenseValidationError> {
    let amount =
        Money::parse(s).map_err(|e| ExpenseValidationError::InvalidAmount(e.to_string()))?;
    if !amount.is_positive() {
        return Err(ExpenseValidationError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, ExpenseValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ExpenseValidationError::InvalidDate(s.trim().to_string()))
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    InvalidAmount(String),
    NonPositiveAmount(Money),
    InvalidDate(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount(reason) => write!(f, "{}", reason),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be positive (got {})", amount.to_decimal_string())
            }
            Self::InvalidDate(s) => write!(f, "Invalid date '{}', expected YYYY-MM-DD", s),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch() -> Expense {
        Expense::new(
            Money::from_cents(1250),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            "food",
            "lunch",
        )
    }

    #[test]
    fn test_parse_valid() {
        let expense = Expense::parse("12.50", "2025-03-14", "food", "lunch").unwrap();
        assert_eq!(expense, lunch());
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert!(matches!(
            Expense::parse("0", "2025-03-14", "food", ""),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));
        assert!(matches!(
            Expense::parse("-3", "2025-03-14", "food", ""),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        assert!(matches!(
            Expense::parse("3", "14/03/2025", "food", ""),
            Err(ExpenseValidationError::InvalidDate(_))
        ));
        assert!(matches!(
            Expense::parse("3", "2025-02-30", "food", ""),
            Err(ExpenseValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_with_update_applies_supplied_fields() {
        let update = ExpenseUpdate::new().amount("20").category("dining");
        let updated = lunch().with_update(&update).unwrap();

        assert_eq!(updated.amount, Money::from_cents(2000));
        assert_eq!(updated.category, "dining");
        assert_eq!(updated.date, lunch().date);
        assert_eq!(updated.description, "lunch");
    }

    #[test]
    fn test_with_update_blank_fields_are_ignored() {
        let update = ExpenseUpdate::new().amount("").description("  ");
        assert!(update.is_empty());
        assert_eq!(lunch().with_update(&update).unwrap(), lunch());
    }

    #[test]
    fn test_with_update_fails_as_a_whole() {
        let original = lunch();
        let update = ExpenseUpdate::new().category("dining").date("not-a-date");
        assert!(original.with_update(&update).is_err());
        assert_eq!(original, lunch());
    }

    #[test]
    fn test_display() {
        assert_eq!(lunch().to_string(), "2025-03-14 $12.50 [food] lunch");
    }
}
