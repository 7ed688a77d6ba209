//! Report period representation
//!
//! Comparisons work on calendar months and calendar years; each period knows
//! its bounds, whether a date falls inside it, and which period precedes it.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Month,
    Year,
}

impl Granularity {
    /// Noun used in report wording ("current month", "previous year")
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// A calendar month or calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "granularity", rename_all = "lowercase")]
pub enum ReportPeriod {
    /// Calendar month (e.g., "2024-01")
    Month { year: i32, month: u32 },

    /// Calendar year (e.g., "2024")
    Year { year: i32 },
}

impl ReportPeriod {
    /// Create a monthly period
    pub fn monthly(year: i32, month: u32) -> Self {
        Self::Month { year, month }
    }

    /// Create a yearly period
    pub fn yearly(year: i32) -> Self {
        Self::Year { year }
    }

    /// The month containing the given date
    pub fn month_of(date: NaiveDate) -> Self {
        Self::monthly(date.year(), date.month())
    }

    /// The year containing the given date
    pub fn year_of(date: NaiveDate) -> Self {
        Self::yearly(date.year())
    }

    /// Granularity of this period
    pub fn granularity(&self) -> Granularity {
        match self {
            Self::Month { .. } => Granularity::Month,
            Self::Year { .. } => Granularity::Year,
        }
    }

    /// First day of the period
    pub fn start_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1),
            Self::Year { year } => NaiveDate::from_ymd_opt(*year, 1, 1),
        }
    }

    /// Last day of the period (inclusive)
    pub fn end_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Month { .. } => self
                .next()
                .start_date()
                .map(|next_start| next_start - Duration::days(1)),
            Self::Year { year } => NaiveDate::from_ymd_opt(*year, 12, 31),
        }
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::Month { year, month } => date.year() == *year && date.month() == *month,
            Self::Year { year } => date.year() == *year,
        }
    }

    /// Get the next period
    pub fn next(&self) -> Self {
        match self {
            Self::Month { year, month } => {
                if *month == 12 {
                    Self::monthly(*year + 1, 1)
                } else {
                    Self::monthly(*year, *month + 1)
                }
            }
            Self::Year { year } => Self::yearly(*year + 1),
        }
    }

    /// Get the previous period
    pub fn prev(&self) -> Self {
        match self {
            Self::Month { year, month } => {
                if *month == 1 {
                    Self::monthly(*year - 1, 12)
                } else {
                    Self::monthly(*year, *month - 1)
                }
            }
            Self::Year { year } => Self::yearly(*year - 1),
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Monthly: "2024-01"
    /// - Yearly: "2024"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if let Some((year, month)) = s.split_once('-') {
            let year = parse_digits(year, 4, s)? as i32;
            let month = parse_digits(month, 2, s)?;

            if !(1..=12).contains(&month) {
                return Err(PeriodParseError::InvalidMonth(month));
            }

            return Ok(Self::monthly(year, month));
        }

        Ok(Self::yearly(parse_digits(s, 4, s)? as i32))
    }
}

/// Parse a field made of exactly `width` ASCII digits
fn parse_digits(part: &str, width: usize, whole: &str) -> Result<u32, PeriodParseError> {
    if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PeriodParseError::InvalidFormat(whole.to_string()));
    }
    part.parse()
        .map_err(|_| PeriodParseError::InvalidFormat(whole.to_string()))
}

impl std::str::FromStr for ReportPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Year { year } => write!(f, "{:04}", year),
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
