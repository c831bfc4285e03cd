//! CSV file I/O with atomic writes
//!
//! Reads and writes the backing file: a header row
//! `amount,date,category,description` followed by one row per expense.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::models::{expense, Expense};

/// Column names of the backing file, in order
pub const HEADER: [&str; 4] = ["amount", "date", "category", "description"];

/// One row of the backing file as text
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExpenseRow {
    amount: String,
    date: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_decimal_string(),
            date: expense.date.format(expense::DATE_FORMAT).to_string(),
            category: expense.category.clone(),
            description: expense.description.clone(),
        }
    }
}

impl ExpenseRow {
    fn into_expense(self, line: u64) -> Result<Expense, ExpenseError> {
        let parse_error = |message: String| ExpenseError::Parse { line, message };

        let amount = expense::parse_amount(&self.amount).map_err(|e| parse_error(e.to_string()))?;
        let date = expense::parse_date(&self.date).map_err(|e| parse_error(e.to_string()))?;

        Ok(Expense::new(amount, date, self.category, self.description))
    }
}

/// Read expenses from a CSV file
///
/// Returns `Ok(None)` if the file does not exist.
pub fn read_expenses<P: AsRef<Path>>(path: P) -> Result<Option<Vec<Expense>>, ExpenseError> {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ExpenseError::Io(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .clone();

    if !headers.is_empty() {
        for column in HEADER {
            if !headers.iter().any(|h| h == column) {
                return Err(ExpenseError::Parse {
                    line: 1,
                    message: format!("Missing '{}' column in header", column),
                });
            }
        }
    }

    let mut expenses = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let row: ExpenseRow = record
            .deserialize(Some(&headers))
            .map_err(|e| ExpenseError::Parse {
                line,
                message: e.to_string(),
            })?;

        expenses.push(row.into_expense(line)?);
    }

    Ok(Some(expenses))
}

/// Write expenses to a CSV file atomically (write to temp, then rename)
///
/// The target is either completely rewritten or not modified at all.
pub fn write_expenses_atomic<P: AsRef<Path>>(
    path: P,
    expenses: &[Expense],
) -> Result<(), ExpenseError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);

    let result = write_rows(&temp_path, expenses).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| {
            ExpenseError::Io(format!("Failed to replace {}: {}", path.display(), e))
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_rows(path: &Path, expenses: &[Expense]) -> Result<(), ExpenseError> {
    let file = File::create(path)
        .map_err(|e| ExpenseError::Io(format!("Failed to create {}: {}", path.display(), e)))?;

    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    // Written explicitly so an empty store still gets a header row
    writer
        .write_record(HEADER)
        .map_err(|e| csv_error(path, e))?;

    for expense in expenses {
        let row = ExpenseRow::from(expense);
        writer
            .write_record([&row.amount, &row.date, &row.category, &row.description])
            .map_err(|e| csv_error(path, e))?;
    }

    let mut inner = writer
        .into_inner()
        .map_err(|e| ExpenseError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;
    inner
        .flush()
        .map_err(|e| ExpenseError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;
    inner
        .get_ref()
        .sync_all()
        .map_err(|e| ExpenseError::Io(format!("Failed to sync {}: {}", path.display(), e)))?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn csv_error(path: &Path, err: csv::Error) -> ExpenseError {
    let line = err.position().map(|p| p.line());
    match (err.kind(), line) {
        (csv::ErrorKind::Io(_), _) => {
            ExpenseError::Io(format!("Failed to access {}: {}", path.display(), err))
        }
        (_, Some(line)) => ExpenseError::Parse {
            line,
            message: err.to_string(),
        },
        (_, None) => ExpenseError::Parse {
            line: 0,
            message: err.to_string(),
        },
    }
}
