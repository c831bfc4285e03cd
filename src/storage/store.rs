//! In-memory expense store backed by a CSV file
//!
//! Expenses are kept in insertion order and addressed by position. The
//! backing file is only touched by `load` and `save`.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseUpdate, Money, ReportPeriod};

use super::file_io::{read_expenses, write_expenses_atomic};

/// What `ExpenseStore::load` found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file existed and this many expenses were read
    Loaded(usize),
    /// The file does not exist yet; the store is empty
    NoPriorData,
}

/// Ordered collection of expenses
#[derive(Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    dirty: bool,
    audit: Option<AuditLogger>,
    warnings: Vec<String>,
}

impl ExpenseStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every mutation in the given audit log
    pub fn with_audit_logger(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Number of stored expenses
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// True if no expenses are stored
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// True if the store changed since the last load or save
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Get the expense at `index`
    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    /// All expenses in storage order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Drain warnings raised while writing the audit log
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    /// Validate and append a new expense from user-entered text
    ///
    /// Returns the index of the new expense. Nothing is appended on error.
    pub fn add(
        &mut self,
        amount: &str,
        date: &str,
        category: &str,
        description: &str,
    ) -> ExpenseResult<usize> {
        let expense = Expense::parse(amount, date, category, description)
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;
        self.push(expense)
    }

    /// Append an already-built expense
    pub fn push(&mut self, expense: Expense) -> ExpenseResult<usize> {
        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let index = self.expenses.len();
        self.audit_entry(AuditEntry::created(index, &expense));
        self.expenses.push(expense);
        self.dirty = true;
        Ok(index)
    }

    /// Iterate over `(index, expense)` pairs in storage order
    ///
    /// Returns `None` when the store holds no expenses.
    pub fn list(&self) -> Option<impl Iterator<Item = (usize, &Expense)> + '_> {
        if self.expenses.is_empty() {
            None
        } else {
            Some(self.expenses.iter().enumerate())
        }
    }

    /// Remove and return the expense at `index`
    ///
    /// Later expenses move down by one position.
    pub fn delete_at(&mut self, index: usize) -> ExpenseResult<Expense> {
        if index >= self.expenses.len() {
            return Err(ExpenseError::out_of_range(index, self.expenses.len()));
        }

        let removed = self.expenses.remove(index);
        self.dirty = true;
        self.audit_entry(AuditEntry::deleted(index, &removed));
        Ok(removed)
    }

    /// Apply a partial update to the expense at `index`
    ///
    /// Either every supplied field is applied or none is.
    pub fn update_at(&mut self, index: usize, update: &ExpenseUpdate) -> ExpenseResult<&Expense> {
        let len = self.expenses.len();
        let updated = self
            .expenses
            .get(index)
            .ok_or_else(|| ExpenseError::out_of_range(index, len))?
            .with_update(update)
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if updated != self.expenses[index] {
            let entry = AuditEntry::updated(index, &self.expenses[index], &updated);
            self.audit_entry(entry);
            self.expenses[index] = updated;
            self.dirty = true;
        }

        Ok(&self.expenses[index])
    }

    /// Iterate over `(index, expense)` pairs whose category equals `category` exactly
    pub fn filter_by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = (usize, &'a Expense)> + 'a {
        self.expenses
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.category == category)
    }

    /// Sum amounts per date for the expenses `period` includes on `today`
    ///
    /// Dates without matching expenses are absent from the result.
    pub fn report(&self, period: ReportPeriod, today: NaiveDate) -> BTreeMap<NaiveDate, Money> {
        self.expenses
            .iter()
            .filter(|e| period.includes(e.date, today))
            .fold(BTreeMap::new(), |mut totals, e| {
                *totals.entry(e.date).or_insert_with(Money::zero) += &e.amount;
                totals
            })
    }

    /// `report` relative to the local calendar date
    pub fn report_today(&self, period: ReportPeriod) -> BTreeMap<NaiveDate, Money> {
        self.report(period, chrono::Local::now().date_naive())
    }

    /// Write every expense to `path`, replacing its contents
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> ExpenseResult<()> {
        write_expenses_atomic(path, &self.expenses)?;
        self.dirty = false;
        Ok(())
    }

    /// Replace the stored expenses with the contents of `path`
    ///
    /// A missing file empties the store and is not an error. On error the
    /// store keeps its current contents.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> ExpenseResult<LoadOutcome> {
        let outcome = match read_expenses(path)? {
            Some(expenses) => {
                let count = expenses.len();
                self.expenses = expenses;
                LoadOutcome::Loaded(count)
            }
            None => {
                self.expenses.clear();
                LoadOutcome::NoPriorData
            }
        };
        self.dirty = false;
        Ok(outcome)
    }

    fn audit_entry(&mut self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                self.warnings.push(format!("Audit log not updated: {}", e));
            }
        }
    }
}
