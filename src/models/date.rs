//! Date normalization
//!
//! Expense dates are entered as text in one of three shapes and normalized
//! lazily to a calendar date every time a report needs them:
//!
//! 1. ISO: `YYYY-MM-DD`
//! 2. Dotted: `D.M.YYYY` / `DD.MM.YYYY` (day-month-year)
//! 3. Slashed: `M/D/YYYY` / `MM/DD/YYYY` (month-day-year)
//!
//! The shapes are tried in that order. Once a shape matches, its numeric and
//! calendar checks decide the outcome; a literal never falls through to a
//! later shape. Every triple must also be a real calendar date, so
//! `31.04.2024` and `2023-02-29` are rejected.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;

/// Earliest year accepted by the dotted and slashed formats
pub const MIN_YEAR: i32 = 1900;

/// Latest year accepted by the dotted and slashed formats
pub const MAX_YEAR: i32 = 2100;

/// Canonical rendering of a normalized date
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

// ASCII classes only: `\d` would also match non-ASCII digits.
static ISO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid ISO pattern"));
static DOTTED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})\.([0-9]{1,2})\.([0-9]{4})$").expect("valid dotted pattern")
});
static SLASHED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("valid slashed pattern")
});

/// The accepted textual date shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    Iso,
    /// `DD.MM.YYYY`, day first
    Dotted,
    /// `MM/DD/YYYY`, month first
    Slashed,
}

impl DateFormat {
    /// All formats in the order they are tried
    pub fn all() -> &'static [DateFormat] {
        &[DateFormat::Iso, DateFormat::Dotted, DateFormat::Slashed]
    }

    /// Detect which shape a literal has, without validating its values
    pub fn detect(literal: &str) -> Option<Self> {
        let literal = literal.trim();
        Self::all()
            .iter()
            .copied()
            .find(|format| format.pattern().is_match(literal))
    }

    /// Human-readable pattern for prompts and error messages
    pub fn example(&self) -> &'static str {
        match self {
            Self::Iso => "YYYY-MM-DD",
            Self::Dotted => "DD.MM.YYYY",
            Self::Slashed => "MM/DD/YYYY",
        }
    }

    /// Split a literal of this shape into `(year, month, day)`
    fn fields(&self, literal: &str) -> Result<(i64, i64, i64), DateParseError> {
        let caps = self
            .pattern()
            .captures(literal)
            .ok_or_else(|| DateParseError::UnrecognizedFormat(literal.to_string()))?;
        let (year, month, day) = match self {
            Self::Iso => (1, 2, 3),
            Self::Dotted => (3, 2, 1),
            Self::Slashed => (3, 1, 2),
        };

        Ok((
            capture_number(&caps, year, literal)?,
            capture_number(&caps, month, literal)?,
            capture_number(&caps, day, literal)?,
        ))
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Self::Iso => &ISO_PATTERN,
            Self::Dotted => &DOTTED_PATTERN,
            Self::Slashed => &SLASHED_PATTERN,
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.example())
    }
}

/// Why a date literal could not be normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// The literal was empty or whitespace only
    Empty,
    /// The literal matches none of the accepted shapes
    UnrecognizedFormat(String),
    /// Day, month or year is outside its numeric range
    OutOfRange {
        literal: String,
        field: &'static str,
        value: i64,
    },
    /// The numbers are in range but do not form a real calendar date
    InvalidCalendarDate(String),
}

impl DateParseError {
    /// The offending literal
    pub fn literal(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::UnrecognizedFormat(literal) | Self::InvalidCalendarDate(literal) => literal,
            Self::OutOfRange { literal, .. } => literal,
        }
    }
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty date"),
            Self::UnrecognizedFormat(literal) => {
                let formats: Vec<&str> = DateFormat::all().iter().map(DateFormat::example).collect();
                write!(f, "'{}' is not in format {}", literal, formats.join(", "))
            }
            Self::OutOfRange {
                literal,
                field,
                value,
            } => write!(f, "'{}' has {} {} out of range", literal, field, value),
            Self::InvalidCalendarDate(literal) => {
                write!(f, "'{}' is not a valid calendar date", literal)
            }
        }
    }
}

impl std::error::Error for DateParseError {}

/// Normalize a date literal to a canonical calendar date
///
/// Pure and idempotent; results are never cached, so callers must not assume
/// repeated calls are cheap.
pub fn normalize_date(literal: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = literal.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }

    let format = DateFormat::detect(trimmed)
        .ok_or_else(|| DateParseError::UnrecognizedFormat(trimmed.to_string()))?;
    let (year, month, day) = format.fields(trimmed)?;

    check_day_month(trimmed, day, month)?;
    if format != DateFormat::Iso {
        check_year(trimmed, year)?;
    }
    calendar_date(trimmed, year, month, day)
}

/// Render a date in canonical `YYYY-MM-DD` form
pub fn canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

fn capture_number(caps: &Captures<'_>, index: usize, literal: &str) -> Result<i64, DateParseError> {
    caps.get(index)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .ok_or_else(|| DateParseError::UnrecognizedFormat(literal.to_string()))
}

fn check_day_month(literal: &str, day: i64, month: i64) -> Result<(), DateParseError> {
    if !(1..=12).contains(&month) {
        return Err(DateParseError::OutOfRange {
            literal: literal.to_string(),
            field: "month",
            value: month,
        });
    }
    if !(1..=31).contains(&day) {
        return Err(DateParseError::OutOfRange {
            literal: literal.to_string(),
            field: "day",
            value: day,
        });
    }
    Ok(())
}

fn check_year(literal: &str, year: i64) -> Result<(), DateParseError> {
    if year < MIN_YEAR as i64 || year > MAX_YEAR as i64 {
        return Err(DateParseError::OutOfRange {
            literal: literal.to_string(),
            field: "year",
            value: year,
        });
    }
    Ok(())
}

fn calendar_date(literal: &str, year: i64, month: i64, day: i64) -> Result<NaiveDate, DateParseError> {
    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
        .ok_or_else(|| DateParseError::InvalidCalendarDate(literal.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_formats_agree_on_same_day() {
        let expected = ymd(2024, 1, 5);
        assert_eq!(normalize_date("2024-01-05").unwrap(), expected);
        assert_eq!(normalize_date("05.01.2024").unwrap(), expected);
        assert_eq!(normalize_date("5.1.2024").unwrap(), expected);
        assert_eq!(normalize_date("01/05/2024").unwrap(), expected);
        assert_eq!(normalize_date("1/5/2024").unwrap(), expected);
    }

    #[test]
    fn test_dotted_is_day_first_slashed_is_month_first() {
        assert_eq!(normalize_date("03.04.2024").unwrap(), ymd(2024, 4, 3));
        assert_eq!(normalize_date("03/04/2024").unwrap(), ymd(2024, 3, 4));
    }

    #[test]
    fn test_rejects_out_of_range_iso() {
        let err = normalize_date("2024-13-40").unwrap_err();
        assert!(matches!(err, DateParseError::OutOfRange { field: "month", .. }));
        assert_eq!(err.literal(), "2024-13-40");
    }

    #[test]
    fn test_rejects_out_of_range_year() {
        let err = normalize_date("01.01.1899").unwrap_err();
        assert!(matches!(err, DateParseError::OutOfRange { field: "year", value: 1899, .. }));
        assert!(normalize_date("12/31/2101").is_err());
        assert!(normalize_date("12/31/2100").is_ok());
        assert!(normalize_date("01.01.1900").is_ok());
    }

    #[test]
    fn test_rejects_non_calendar_dates() {
        assert_eq!(
            normalize_date("31.04.2024"),
            Err(DateParseError::InvalidCalendarDate("31.04.2024".into()))
        );
        assert!(normalize_date("2023-02-29").is_err());
        assert_eq!(normalize_date("2024-02-29").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_no_fall_through_between_formats() {
        // Month 13 is invalid for the slashed shape; it must not be retried as day-first.
        assert!(matches!(
            normalize_date("13/01/2024"),
            Err(DateParseError::OutOfRange { field: "month", .. })
        ));
    }

    #[test]
    fn test_rejects_unrecognized_shapes() {
        for literal in ["2024/01/05", "2024-1-5", "5-1-2024", "yesterday", "05.01.24"] {
            assert!(
                matches!(normalize_date(literal), Err(DateParseError::UnrecognizedFormat(_))),
                "{} should be unrecognized",
                literal
            );
        }
        assert_eq!(normalize_date("   "), Err(DateParseError::Empty));
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize_date(" 2024-01-05\n").unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_idempotent() {
        let first = normalize_date("20.01.2024");
        let second = normalize_date("20.01.2024");
        assert_eq!(first, second);
        assert_eq!(normalize_date(&canonical(first.unwrap())).unwrap(), ymd(2024, 1, 20));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(DateFormat::detect("2024-01-05"), Some(DateFormat::Iso));
        assert_eq!(DateFormat::detect("5.1.2024"), Some(DateFormat::Dotted));
        assert_eq!(DateFormat::detect("1/5/2024"), Some(DateFormat::Slashed));
        assert_eq!(DateFormat::detect("soon"), None);
    }

    #[test]
    fn test_unrecognized_format_lists_accepted_shapes() {
        let err = normalize_date("next tuesday").unwrap_err();
        assert_eq!(
            err.to_string(),
            "'next tuesday' is not in format YYYY-MM-DD, DD.MM.YYYY, MM/DD/YYYY"
        );
    }
}
