//! Reporting periods
//!
//! A `Period` is the (year, month) bucket every entry belongs to and the
//! composite key the consolidated view groups by.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month, serialized as the zero-padded string `"01"`..`"12"`
///
/// Ordering is numeric, which matches lexicographic ordering of the
/// zero-padded form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Month = Month(1);
    pub const DECEMBER: Month = Month(12);

    /// Create a month from its number (1-12)
    pub fn new(number: u32) -> Result<Self, PeriodParseError> {
        if (1..=12).contains(&number) {
            Ok(Self(number as u8))
        } else {
            Err(PeriodParseError::InvalidMonth(number.to_string()))
        }
    }

    /// Month number (1-12)
    pub fn number(&self) -> u32 {
        u32::from(self.0)
    }

    /// The two-character code used in storage and filters
    pub fn code(&self) -> String {
        format!("{:02}", self.0)
    }
}

impl FromStr for Month {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.len() > 2 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(PeriodParseError::InvalidMonth(s.to_string()));
        }
        let number: u32 = trimmed
            .parse()
            .map_err(|_| PeriodParseError::InvalidMonth(s.to_string()))?;
        Month::new(number).map_err(|_| PeriodParseError::InvalidMonth(s.to_string()))
    }
}

impl TryFrom<String> for Month {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.code()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A (year, month) reporting bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: Month,
}

impl Period {
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// Parse a period from "YYYY-MM" format
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidYear(year.to_string()))?;
        Ok(Self::new(year, month.parse()?))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{}", self.year, self.month)
    }
}

/// Error type for period and month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidYear(String),
    InvalidMonth(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid period format: {} (expected YYYY-MM)", s),
            Self::InvalidYear(s) => write!(f, "Invalid year: {}", s),
            Self::InvalidMonth(s) => write!(f, "Invalid month: {} (expected 01-12)", s),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_parse() {
        assert_eq!("01".parse::<Month>().unwrap().number(), 1);
        assert_eq!("1".parse::<Month>().unwrap().number(), 1);
        assert_eq!("12".parse::<Month>().unwrap().number(), 12);
        assert!("00".parse::<Month>().is_err());
        assert!("13".parse::<Month>().is_err());
        assert!("001".parse::<Month>().is_err());
        assert!("-1".parse::<Month>().is_err());
        assert!("".parse::<Month>().is_err());
    }

    #[test]
    fn test_month_code_is_zero_padded() {
        assert_eq!(Month::new(3).unwrap().code(), "03");
        assert_eq!(Month::DECEMBER.to_string(), "12");
    }

    #[test]
    fn test_month_order_matches_code_order() {
        let months: Vec<Month> = (1..=12).map(|n| Month::new(n).unwrap()).collect();
        for a in &months {
            for b in &months {
                assert_eq!(a.cmp(b), a.code().cmp(&b.code()));
            }
        }
    }

    #[test]
    fn test_month_serialization() {
        let json = serde_json::to_string(&Month::new(7).unwrap()).unwrap();
        assert_eq!(json, "\"07\"");
        let back: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(back.number(), 7);
        assert!(serde_json::from_str::<Month>("\"13\"").is_err());
    }

    #[test]
    fn test_period_ordering() {
        let earlier = Period::new(2023, Month::new(3).unwrap());
        let later = Period::new(2024, Month::JANUARY);
        assert!(earlier < later);
        assert!(Period::new(2024, Month::JANUARY) < Period::new(2024, Month::new(2).unwrap()));
    }

    #[test]
    fn test_period_parse_and_display() {
        let period = Period::parse("2024-01").unwrap();
        assert_eq!(period.year, 2024);
        assert_eq!(period.month, Month::JANUARY);
        assert_eq!(period.to_string(), "2024-01");
        assert!(Period::parse("2024").is_err());
        assert!(Period::parse("2024-13").is_err());
    }
}
