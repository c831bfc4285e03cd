//! Menu-driven read-eval loop
//!
//! Every action reports its own errors and returns to the menu; only a
//! failure to write output ends the loop early.

use std::io::{BufRead, Write};
use std::str::FromStr;

use chrono::NaiveDate;

use crate::config::{ExpensePaths, Settings};
use crate::display::{format_expense_register, format_expense_row};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseUpdate, ReportPeriod, DATE_FORMAT};
use crate::reports::PeriodReport;
use crate::storage::ExpenseStore;

/// The eight menu actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Delete,
    Update,
    Filter,
    Report,
    Save,
    Exit,
}

impl MenuChoice {
    /// All choices in menu order
    pub const ALL: [MenuChoice; 8] = [
        Self::Add,
        Self::View,
        Self::Delete,
        Self::Update,
        Self::Filter,
        Self::Report,
        Self::Save,
        Self::Exit,
    ];

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Add => "Add Expense",
            Self::View => "View Expenses",
            Self::Delete => "Delete Expense",
            Self::Update => "Update Expense",
            Self::Filter => "Filter by Category",
            Self::Report => "Generate Report",
            Self::Save => "Save Expenses",
            Self::Exit => "Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| {
                ExpenseError::Validation("Invalid choice. Please try again.".to_string())
            })
    }
}

/// Interactive session over one store and its backing file
pub struct Shell<R, W> {
    store: ExpenseStore,
    paths: ExpensePaths,
    settings: Settings,
    input: R,
    output: W,
    today: Option<NaiveDate>,
    save_on_exit: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a shell around an already-loaded store
    pub fn new(
        store: ExpenseStore,
        paths: ExpensePaths,
        settings: Settings,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            paths,
            settings,
            input,
            output,
            today: None,
            save_on_exit: true,
        }
    }

    /// Use a fixed date instead of the local clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Skip the automatic save on exit until the user saves explicitly
    ///
    /// Used when the backing file failed to load, so its contents are not
    /// overwritten by accident.
    pub fn without_save_on_exit(mut self) -> Self {
        self.save_on_exit = false;
        self
    }

    /// Consume the shell, returning the store and output
    pub fn into_parts(self) -> (ExpenseStore, W) {
        (self.store, self.output)
    }

    /// Run until the user exits or input ends, then save
    ///
    /// A failed save on Exit is reported and the menu is shown again. Returns
    /// an error only if input or output fails.
    pub fn run(&mut self) -> ExpenseResult<()> {
        loop {
            self.print_menu()?;
            let Some(answer) = self.prompt("Choose an option: ")? else {
                writeln!(self.output)?;
                if !self.exit()? {
                    writeln!(self.output, "Input ended; unsaved changes were discarded.")?;
                    self.output.flush()?;
                }
                return Ok(());
            };

            let choice = match answer.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(e) => {
                    self.report_error(&e)?;
                    continue;
                }
            };

            if choice == MenuChoice::Exit {
                if self.exit()? {
                    return Ok(());
                }
                continue;
            }

            if let Err(e) = self.dispatch(choice) {
                self.report_error(&e)?;
            }
            self.flush_warnings()?;
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> ExpenseResult<()> {
        match choice {
            MenuChoice::Add => self.add(),
            MenuChoice::View => self.view(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::Update => self.update(),
            MenuChoice::Filter => self.filter(),
            MenuChoice::Report => self.report(),
            MenuChoice::Save => self.save(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn print_menu(&mut self) -> ExpenseResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Expense Tracker Menu:")?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, choice.label())?;
        }
        Ok(())
    }

    fn add(&mut self) -> ExpenseResult<()> {
        let Some(amount) = self.prompt("Enter amount: ")? else {
            return Ok(());
        };
        let Some(date) = self.prompt("Enter date (YYYY-MM-DD, blank for today): ")? else {
            return Ok(());
        };
        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(());
        };
        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(());
        };

        let date = if date.is_empty() {
            self.today().format(DATE_FORMAT).to_string()
        } else {
            date
        };

        let index = self.store.add(&amount, &date, &category, &description)?;
        let row = self.row(index);
        writeln!(self.output, "Added expense:")?;
        writeln!(self.output, "{}", row)?;
        Ok(())
    }

    fn view(&mut self) -> ExpenseResult<()> {
        let rendered = self
            .store
            .list()
            .map(|rows| format_expense_register(rows, &self.settings.currency_symbol));

        match rendered {
            Some(register) => write!(self.output, "{}", register)?,
            None => writeln!(self.output, "No expenses recorded.")?,
        }
        Ok(())
    }

    fn delete(&mut self) -> ExpenseResult<()> {
        let Some(index) = self.prompt_index("Enter expense index to delete: ")? else {
            return Ok(());
        };

        let removed = self.store.delete_at(index)?;
        let row = format_expense_row(index, &removed, &self.settings.currency_symbol);
        writeln!(self.output, "Deleted expense:")?;
        writeln!(self.output, "{}", row)?;
        Ok(())
    }

    fn update(&mut self) -> ExpenseResult<()> {
        let Some(index) = self.prompt_index("Enter expense index to update: ")? else {
            return Ok(());
        };
        if self.store.get(index).is_none() {
            return Err(ExpenseError::out_of_range(index, self.store.len()));
        }

        let mut update = ExpenseUpdate::new();
        update.amount = self.prompt("Enter new amount (or leave blank): ")?;
        update.date = self.prompt("Enter new date (YYYY-MM-DD) (or leave blank): ")?;
        update.category = self.prompt("Enter new category (or leave blank): ")?;
        update.description = self.prompt("Enter new description (or leave blank): ")?;

        if update.is_empty() {
            writeln!(self.output, "Nothing to update.")?;
            return Ok(());
        }

        self.store.update_at(index, &update)?;
        let row = self.row(index);
        writeln!(self.output, "Expense updated:")?;
        writeln!(self.output, "{}", row)?;
        Ok(())
    }

    fn filter(&mut self) -> ExpenseResult<()> {
        let Some(category) = self.prompt("Enter category to filter: ")? else {
            return Ok(());
        };

        let mut matches = self.store.filter_by_category(&category).peekable();
        let rendered = if matches.peek().is_some() {
            Some(format_expense_register(matches, &self.settings.currency_symbol))
        } else {
            None
        };

        match rendered {
            Some(register) => write!(self.output, "{}", register)?,
            None => writeln!(self.output, "No expenses found for category: {}", category)?,
        }
        Ok(())
    }

    fn report(&mut self) -> ExpenseResult<()> {
        let Some(answer) = self.prompt("Enter report period (daily, weekly, monthly): ")? else {
            return Ok(());
        };
        let period = answer
            .parse::<ReportPeriod>()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let report = PeriodReport::generate(&self.store, period, self.today());
        write!(
            self.output,
            "{}",
            report.format_terminal(&self.settings.currency_symbol)
        )?;
        Ok(())
    }

    fn save(&mut self) -> ExpenseResult<()> {
        self.store.save(self.paths.data_file())?;
        self.save_on_exit = true;
        writeln!(
            self.output,
            "Expenses saved to {}.",
            self.paths.data_file().display()
        )?;
        Ok(())
    }

    /// Save if needed and say goodbye; `false` if the save failed
    fn exit(&mut self) -> ExpenseResult<bool> {
        if self.save_on_exit {
            if let Err(e) = self.save() {
                self.report_error(&e)?;
                writeln!(
                    self.output,
                    "Expenses were not saved. Fix the problem and choose Exit again."
                )?;
                return Ok(false);
            }
        } else {
            writeln!(
                self.output,
                "{} was not loaded; skipping automatic save.",
                self.paths.data_file().display()
            )?;
        }
        writeln!(self.output, "Exiting application.")?;
        self.output.flush()?;
        Ok(true)
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn row(&self, index: usize) -> String {
        self.store
            .get(index)
            .map(|e| format_expense_row(index, e, &self.settings.currency_symbol))
            .unwrap_or_default()
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> ExpenseResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_index(&mut self, label: &str) -> ExpenseResult<Option<usize>> {
        match self.prompt(label)? {
            Some(answer) => answer
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ExpenseError::Validation(format!("Invalid index '{}'", answer))),
            None => Ok(None),
        }
    }

    fn report_error(&mut self, err: &ExpenseError) -> ExpenseResult<()> {
        writeln!(self.output, "Error: {}", err)?;
        Ok(())
    }

    fn flush_warnings(&mut self) -> ExpenseResult<()> {
        for warning in self.store.take_warnings() {
            writeln!(self.output, "Warning: {}", warning)?;
        }
        Ok(())
    }
}
