use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use expense_cli::audit::AuditLogger;
use expense_cli::cli::Shell;
use expense_cli::config::{paths::DEFAULT_DATA_FILE, ExpensePaths, Settings};
use expense_cli::display::format_audit_history;
use expense_cli::storage::{ExpenseStore, LoadOutcome};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "Record, edit, filter and summarize your expenses from an interactive \
                  menu. Expenses are kept in a CSV file that is saved on exit."
)]
struct Cli {
    /// CSV file holding your expenses (created on first save)
    #[arg(default_value = DEFAULT_DATA_FILE)]
    file: PathBuf,

    /// Print the last N changes from the audit log and exit
    #[arg(long, value_name = "N")]
    history: Option<usize>,

    /// Write the settings file next to FILE (keeping current values) and exit
    #[arg(long)]
    init_settings: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = ExpensePaths::for_data_file(cli.file);

    let loaded_settings = Settings::load_or_create(&paths);

    if cli.init_settings {
        // A malformed file is reported rather than replaced with defaults
        let settings = loaded_settings.context("Failed to read existing settings file")?;
        settings
            .save(&paths)
            .context("Failed to write settings file")?;
        println!("Settings written to {}.", paths.settings_file().display());
        return Ok(());
    }

    let settings = loaded_settings.unwrap_or_else(|e| {
        eprintln!("Warning: {}. Using default settings.", e);
        Settings::default()
    });

    if let Some(count) = cli.history {
        let entries = AuditLogger::new(paths.audit_log())
            .read_recent(count)
            .context("Failed to read audit log")?;
        print!("{}", format_audit_history(&entries));
        return Ok(());
    }

    let mut store = ExpenseStore::new();
    if settings.audit_enabled {
        store = store.with_audit_logger(AuditLogger::new(paths.audit_log()));
    }

    let loaded = match store.load(paths.data_file()) {
        Ok(LoadOutcome::Loaded(count)) => {
            println!(
                "Loaded {} expense(s) from {}.",
                count,
                paths.data_file().display()
            );
            true
        }
        Ok(LoadOutcome::NoPriorData) => {
            println!("No previous data found. Starting with an empty list.");
            true
        }
        Err(e) => {
            println!("Error loading {}: {}", paths.data_file().display(), e);
            println!("Starting with an empty list; it will only be written if you save.");
            false
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(store, paths, settings, stdin.lock(), stdout.lock());
    if !loaded {
        shell = shell.without_save_on_exit();
    }

    shell.run().context("Expense tracker stopped with an error")?;

    Ok(())
}
