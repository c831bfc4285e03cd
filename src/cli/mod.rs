//! Interactive command shell
//!
//! A numbered menu that reads answers from any `BufRead` and prints to any
//! `Write`, driving an `ExpenseStore`.

pub mod shell;

pub use shell::{MenuChoice, Shell};
