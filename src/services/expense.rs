//! Expense service
//!
//! Records new expenses, lists stored ones and imports legacy flat files.

use std::path::Path;

use serde::Serialize;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseValidationError};
use crate::storage::legacy::{read_legacy_file, RejectedLine};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Outcome of a legacy import
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    /// Records appended to the store
    pub imported: usize,
    /// Imported records whose date does not currently normalize
    pub unreadable_dates: usize,
    /// Lines that could not be parsed at all
    #[serde(skip)]
    pub rejected: Vec<RejectedLine>,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense
    ///
    /// The category is trimmed and must not be empty; the date must be in one
    /// of the accepted formats and is stored exactly as entered.
    pub fn add(&self, category: &str, amount: f64, date: &str) -> ExpenseResult<Expense> {
        if !amount.is_finite() {
            return Err(ExpenseError::Validation(format!(
                "Amount must be a finite number, got {}",
                amount
            )));
        }

        let expense = Expense::new(category.trim(), amount, date.trim());
        expense.validate().map_err(|e| match e {
            ExpenseValidationError::InvalidDate(err) => ExpenseError::DateParse(err),
            other => ExpenseError::Validation(other.to_string()),
        })?;

        self.storage.expenses.record(vec![expense.clone()])?;

        log::debug!("Recorded expense: {}", expense);
        Ok(expense)
    }

    /// List stored expenses in insertion order
    ///
    /// `category` is an exact match; `limit` keeps the most recent entries.
    pub fn list(&self, category: Option<&str>, limit: Option<usize>) -> ExpenseResult<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self
            .storage
            .expenses
            .snapshot()?
            .into_iter()
            .filter(|e| category.map_or(true, |c| e.category() == c))
            .collect();

        if let Some(limit) = limit {
            let excess = expenses.len().saturating_sub(limit);
            expenses.drain(..excess);
        }

        Ok(expenses)
    }

    /// Count stored expenses
    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.expenses.count()
    }

    /// Import expenses from a legacy flat file
    pub fn import_legacy<P: AsRef<Path>>(&self, path: P) -> ExpenseResult<ImportSummary> {
        let import = read_legacy_file(path)?;

        let unreadable_dates = import
            .expenses
            .iter()
            .filter(|e| e.normalized_date().is_err())
            .count();
        if unreadable_dates > 0 {
            log::warn!(
                "{} imported expense(s) have dates that cannot be read; they will be skipped in reports",
                unreadable_dates
            );
        }

        let imported = import.expenses.len();
        self.storage.expenses.record(import.expenses)?;

        log::info!("Imported {} legacy expense(s)", imported);

        Ok(ImportSummary {
            imported,
            unreadable_dates,
            rejected: import.rejected,
        })
    }
}
