//! Report period representation
//!
//! A period decides which expenses a report includes, relative to "today".

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of days back a weekly report reaches (inclusive)
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// Which expenses a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// Expenses dated today
    Daily,
    /// Expenses dated at most seven days before today
    Weekly,
    /// Expenses in today's calendar month
    Monthly,
}

impl ReportPeriod {
    /// Check whether an expense dated `date` belongs in a report made on `today`
    ///
    /// The weekly window has no upper bound: future-dated expenses count.
    pub fn includes(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::Daily => date == today,
            Self::Weekly => (today - date).num_days() <= WEEKLY_WINDOW_DAYS,
            Self::Monthly => date.year() == today.year() && date.month() == today.month(),
        }
    }

    /// Lowercase name as typed at the prompt
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Self::Daily),
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            _ => Err(PeriodParseError(s.trim().to_string())),
        }
    }
}

/// Error for unrecognized period names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(pub String);

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown report period '{}', expected daily, weekly or monthly",
            self.0
        )
    }
}

impl std::error::Error for PeriodParseError {}
