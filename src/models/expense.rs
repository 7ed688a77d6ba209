//! Expense record model
//!
//! An expense is an immutable `(category, amount, date)` tuple. The date is
//! kept as the literal the user entered and normalized on demand.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::date::{normalize_date, DateParseError};

/// A single discretionary spending entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    category: String,
    amount: f64,
    date: String,
}

impl Expense {
    /// Create a new expense record
    pub fn new(category: impl Into<String>, amount: f64, date: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            amount,
            date: date.into(),
        }
    }

    /// Category label (case-sensitive, free-form)
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Amount as entered; sign is not interpreted
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The date literal as entered
    pub fn date_literal(&self) -> &str {
        &self.date
    }

    /// Normalize the stored date literal
    pub fn normalized_date(&self) -> Result<NaiveDate, DateParseError> {
        normalize_date(&self.date)
    }

    /// Validate the expense before it is recorded
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        self.normalized_date()
            .map_err(ExpenseValidationError::InvalidDate)?;

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.1} {}", self.category, self.amount, self.date)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyCategory,
    InvalidDate(DateParseError),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
            Self::InvalidDate(e) => write!(f, "Invalid date: {}", e),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense() {
        let expense = Expense::new("Food", 50.0, "2024-01-05");
        assert_eq!(expense.category(), "Food");
        assert_eq!(expense.amount(), 50.0);
        assert_eq!(expense.date_literal(), "2024-01-05");
        assert_eq!(
            expense.normalized_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_validation() {
        assert!(Expense::new("Food", -3.0, "15.01.2024").validate().is_ok());
        assert_eq!(
            Expense::new("  ", 1.0, "2024-01-05").validate(),
            Err(ExpenseValidationError::EmptyCategory)
        );
        assert!(matches!(
            Expense::new("Food", 1.0, "2024-13-40").validate(),
            Err(ExpenseValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let expense = Expense::new("Rent", 800.0, "15.01.2024");
        let json = serde_json::to_string(&expense).unwrap();
        assert_eq!(json, r#"{"category":"Rent","amount":800.0,"date":"15.01.2024"}"#);
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expense);
    }

    #[test]
    fn test_display() {
        let expense = Expense::new("Food", 30.0, "01/20/2024");
        assert_eq!(expense.to_string(), "Food 30.0 01/20/2024");
    }
}
