//! Storage initialization
//!
//! Handles first-run setup and default data creation

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseError;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Writes the configured default categories unless a category file already
/// exists.
pub fn initialize_storage(paths: &ExpensePaths, settings: &Settings) -> Result<(), ExpenseError> {
    paths.ensure_directories()?;

    if needs_initialization(paths) {
        let data = CategoryData {
            categories: settings.default_categories.clone(),
        };
        write_json_atomic(paths.categories_file(), &data)?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &ExpensePaths) -> bool {
    !paths.is_initialized()
}
