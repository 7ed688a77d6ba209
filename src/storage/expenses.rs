//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json. The repository is an
//! append-only ordered sequence; report code never reads it directly but works
//! on a [`snapshot`](ExpenseRepository::snapshot) taken under the read lock.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::Expense;

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load expenses from disk, replacing anything held in memory
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        log::info!(
            "Loaded {} expenses from {}",
            file_data.expenses.len(),
            self.path.display()
        );
        *data = file_data.expenses;

        Ok(())
    }

    /// Save expenses to disk in insertion order
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = ExpenseData {
            expenses: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Append expenses, keeping their order, and write the store
    ///
    /// Memory is only updated after the file is written, so a failed write
    /// leaves the sequence unchanged.
    pub fn record(&self, expenses: Vec<Expense>) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut file_data = ExpenseData {
            expenses: data.clone(),
        };
        file_data.expenses.extend(expenses);
        write_json_atomic(&self.path, &file_data)?;

        *data = file_data.expenses;
        Ok(())
    }

    /// Copy of the current sequence, stable for the duration of a report
    pub fn snapshot(&self) -> Result<Vec<Expense>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
