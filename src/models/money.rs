//! Money type for representing currency amounts
//!
//! Amounts are exact decimals backed by `BigDecimal`, so any number of
//! fractional digits survives a save/load cycle and report totals never
//! overflow or pick up floating-point error.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Fractional digits always shown, even when the value has fewer
const MIN_DISPLAY_SCALE: i64 = 2;

/// Represents an exact monetary amount
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(BigDecimal);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_cli::models::Money;
    /// let amount = Money::from_cents(4250); // $42.50
    /// assert_eq!(amount.to_decimal_string(), "42.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(BigDecimal::new(cents.into(), 2))
    }

    /// Create a zero Money amount
    pub fn zero() -> Self {
        Self(BigDecimal::from(0))
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == BigDecimal::from(0)
    }

    /// Check if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0 > BigDecimal::from(0)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "42.50", "42.5", "42", ".5", "$42.50", "+42", "-42.50" and
    /// any number of fractional digits ("10.333"). Exponents, thousands
    /// separators and non-finite values are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, trimmed.strip_prefix('+').unwrap_or(trimmed))
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        // "7." and ".5" are valid; BigDecimal wants digits on both sides
        let canonical = format!(
            "{}{}.{}",
            if negative { "-" } else { "" },
            if whole.is_empty() { "0" } else { whole },
            if fraction.is_empty() { "0" } else { fraction },
        );
        BigDecimal::from_str(&canonical)
            .map(Self)
            .map_err(|_| invalid())
    }

    /// Format as a plain decimal with at least two fractional digits
    ///
    /// "42.50" for 42.5, "10.333" for 10.333. Trailing zeros beyond the
    /// second fractional digit are dropped.
    pub fn to_decimal_string(&self) -> String {
        let negative = self.0 < BigDecimal::from(0);
        let magnitude = self.0.abs().normalized();
        let (_, exact_scale) = magnitude.as_bigint_and_exponent();
        let scale = exact_scale.max(MIN_DISPLAY_SCALE);

        let (digits, _) = magnitude.with_scale(scale).as_bigint_and_exponent();
        let mut digits = digits.magnitude().to_string();
        let scale = scale as usize;
        if digits.len() <= scale {
            digits = format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits);
        }
        let (whole, fraction) = digits.split_at(digits.len() - scale);

        format!("{}{}.{}", if negative { "-" } else { "" }, whole, fraction)
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let plain = self.to_decimal_string();
        match plain.strip_prefix('-') {
            Some(magnitude) => format!("-{}{}", symbol, magnitude),
            None => format!("{}{}", symbol, plain),
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl<'a> AddAssign<&'a Money> for Money {
    fn add_assign(&mut self, other: &'a Money) {
        self.0 += &other.0;
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |mut acc, m| {
            acc += m;
            acc
        })
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Money::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is empty"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(s: &str) -> String {
        Money::parse(s).unwrap().to_decimal_string()
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(1050).to_decimal_string(), "10.50");
        assert_eq!(Money::from_cents(1050), Money::parse("10.5").unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
        assert_eq!(format!("{}", Money::from_cents(-150)), "-$1.50");
        assert_eq!(Money::from_cents(4250).format_with_symbol("€"), "€42.50");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(4250).to_decimal_string(), "42.50");
        assert_eq!(Money::from_cents(7).to_decimal_string(), "0.07");
        assert_eq!(Money::from_cents(-150).to_decimal_string(), "-1.50");
        assert_eq!(Money::zero().to_decimal_string(), "0.00");
        assert_eq!(Money::from_cents(100_000).to_decimal_string(), "1000.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parsed("10.50"), "10.50");
        assert_eq!(parsed("$10.50"), "10.50");
        assert_eq!(parsed("-10.50"), "-10.50");
        assert_eq!(parsed("+3"), "3.00");
        assert_eq!(parsed("10"), "10.00");
        assert_eq!(parsed("10.5"), "10.50");
        assert_eq!(parsed("0.05"), "0.05");
        assert_eq!(parsed(".5"), "0.50");
        assert_eq!(parsed("7."), "7.00");
        assert_eq!(parsed(" 42.50 "), "42.50");
    }

    #[test]
    fn test_parse_keeps_extra_precision() {
        assert_eq!(parsed("10.333"), "10.333");
        assert_eq!(parsed("0.0001"), "0.0001");
        assert_eq!(parsed("2.1250"), "2.125");
        assert_eq!(Money::parse("10.333").unwrap(), Money::parse("10.3330").unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1,000").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("nan").is_err());
        assert!(Money::parse("1e5").is_err());
    }

    #[test]
    fn test_is_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(100).is_positive());
        assert!(!Money::from_cents(-100).is_positive());
        assert!(!Money::zero().is_positive());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::parse("3.001").unwrap(),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total, by_ref);
        assert_eq!(total.to_decimal_string(), "6.001");
    }

    #[test]
    fn test_sum_of_huge_amounts_is_exact() {
        let huge = Money::parse("92233720368547758").unwrap();
        let total = huge.clone() + huge;
        assert_eq!(total.to_decimal_string(), "184467440737095516.00");
    }

    #[test]
    fn test_serialization() {
        let m = Money::parse("10.333").unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"10.333\"");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
