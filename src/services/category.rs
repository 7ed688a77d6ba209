//! Category service
//!
//! Provides business logic for the configured category list and for the
//! categories actually used by recorded expenses.

use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// List configured categories in insertion order
    pub fn list(&self) -> ExpenseResult<Vec<String>> {
        self.storage.categories.get_all()
    }

    /// Add a configured category
    pub fn add(&self, name: &str) -> ExpenseResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExpenseError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        self.storage.categories.add(name)?;
        self.storage.categories.save()?;

        Ok(name.to_string())
    }

    /// Remove a configured category
    ///
    /// Expenses already recorded under the name are left untouched.
    pub fn remove(&self, name: &str) -> ExpenseResult<()> {
        if !self.storage.categories.remove(name)? {
            return Err(ExpenseError::category_not_found(name));
        }

        self.storage.categories.save()?;
        Ok(())
    }

    /// Categories present in the expense store, in order of first occurrence
    pub fn distinct_expense_categories(&self) -> ExpenseResult<Vec<String>> {
        let mut categories: Vec<String> = Vec::new();

        for expense in self.storage.expenses.snapshot()? {
            if !categories.iter().any(|c| c == expense.category()) {
                categories.push(expense.category().to_string());
            }
        }

        Ok(categories)
    }

    /// Configured categories followed by any others used by expenses
    pub fn known_categories(&self) -> ExpenseResult<Vec<String>> {
        let mut known = self.list()?;

        for used in self.distinct_expense_categories()? {
            if !known.contains(&used) {
                known.push(used);
            }
        }

        Ok(known)
    }

    /// Check whether a category is configured or used
    pub fn is_known(&self, name: &str) -> ExpenseResult<bool> {
        Ok(self.known_categories()?.iter().any(|c| c == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::Expense;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_and_list() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        assert_eq!(service.add(" Food ").unwrap(), "Food");
        service.add("Rent").unwrap();

        assert_eq!(service.list().unwrap(), vec!["Food", "Rent"]);
    }

    #[test]
    fn test_add_rejects_empty_and_duplicate() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        assert!(matches!(service.add("  "), Err(ExpenseError::Validation(_))));

        service.add("Food").unwrap();
        assert!(matches!(
            service.add("Food"),
            Err(ExpenseError::Duplicate { .. })
        ));
        // Case-sensitive names
        service.add("food").unwrap();
    }

    #[test]
    fn test_remove() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.add("Food").unwrap();
        service.remove("Food").unwrap();
        assert!(service.list().unwrap().is_empty());

        let err = service.remove("Food").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_known_categories() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.add("Food").unwrap();
        service.add("Rent").unwrap();
        storage
            .expenses
            .record(vec![
                Expense::new("Travel", 10.0, "2024-01-01"),
                Expense::new("Food", 5.0, "2024-01-02"),
                Expense::new("Gifts", 7.0, "2024-01-03"),
                Expense::new("Travel", 3.0, "2024-01-04"),
            ])
            .unwrap();

        assert_eq!(
            service.distinct_expense_categories().unwrap(),
            vec!["Travel", "Food", "Gifts"]
        );
        assert_eq!(
            service.known_categories().unwrap(),
            vec!["Food", "Rent", "Travel", "Gifts"]
        );
        assert!(service.is_known("Gifts").unwrap());
        assert!(!service.is_known("gifts").unwrap());
    }
}
