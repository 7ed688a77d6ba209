//! Report service
//!
//! Entry point for the report engine: parses query-boundary dates, applies the
//! category policy and runs every computation on a snapshot of the store.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{normalize_date, Expense, ReportPeriod};
use crate::reports::{
    CategoryPeriodReport, CategorySelection, ComparisonResult, DateRange, ExpenseFilter,
};
use crate::storage::Storage;

use super::category::CategoryService;

/// Service for building reports
pub struct ReportService<'a> {
    storage: &'a Storage,
    strict_categories: bool,
}

impl<'a> ReportService<'a> {
    /// Create a new report service; unknown categories simply match nothing
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            strict_categories: false,
        }
    }

    /// Reject unknown categories instead of returning an empty report
    pub fn with_strict_categories(mut self, strict: bool) -> Self {
        self.strict_categories = strict;
        self
    }

    /// Report on one category (or `all`) between two date literals
    ///
    /// Either bound failing to normalize fails the whole request.
    pub fn build_category_period_report(
        &self,
        category: &str,
        start_text: &str,
        end_text: &str,
    ) -> ExpenseResult<CategoryPeriodReport> {
        let start = normalize_date(start_text)?;
        let end = normalize_date(end_text)?;
        if start > end {
            log::warn!("Report range {} to {} is empty", start, end);
        }

        let selection = CategorySelection::parse(category);
        if let CategorySelection::Named(name) = &selection {
            if self.strict_categories {
                self.require_known_category(name)?;
            }
        }

        let filter = ExpenseFilter::new(selection, DateRange::new(start, end));
        let records = self.snapshot()?;
        let report = CategoryPeriodReport::generate(&records, &filter);
        log_skipped(report.skipped);

        Ok(report)
    }

    /// Month containing `now` versus the previous month
    pub fn build_month_comparison(&self, now: NaiveDate) -> ExpenseResult<ComparisonResult> {
        self.build_comparison(ReportPeriod::month_of(now))
    }

    /// Year containing `now` versus the previous year
    pub fn build_year_comparison(&self, now: NaiveDate) -> ExpenseResult<ComparisonResult> {
        self.build_comparison(ReportPeriod::year_of(now))
    }

    /// Any month or year versus the one before it
    pub fn build_comparison(&self, period: ReportPeriod) -> ExpenseResult<ComparisonResult> {
        let records = self.snapshot()?;
        let result = ComparisonResult::between(&records, period);
        log_skipped(result.skipped);

        Ok(result)
    }

    /// Fail with `InvalidCategorySelection` unless the category is known
    pub fn require_known_category(&self, name: &str) -> ExpenseResult<()> {
        if CategoryService::new(self.storage).is_known(name)? {
            Ok(())
        } else {
            Err(ExpenseError::InvalidCategorySelection(name.to_string()))
        }
    }

    fn snapshot(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses.snapshot()
    }
}

/// Parse an optional reference date, defaulting to today
pub fn reference_date(as_of: Option<&str>) -> ExpenseResult<NaiveDate> {
    match as_of {
        Some(text) => Ok(normalize_date(text)?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn log_skipped(skipped: usize) {
    if skipped > 0 {
        log::warn!("Skipped {} expense(s) with unreadable dates", skipped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::reports::PercentageChange;
    use tempfile::TempDir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        storage.categories.add("Food").unwrap();
        storage.categories.add("Rent").unwrap();
        storage
            .expenses
            .record(vec![
                Expense::new("Food", 50.0, "2024-01-05"),
                Expense::new("Food", 30.0, "01/20/2024"),
                Expense::new("Rent", 800.0, "15.01.2024"),
                Expense::new("Food", 100.0, "2024-02-03"),
                Expense::new("Food", 999.0, "2024-13-40"),
            ])
            .unwrap();

        (temp_dir, storage)
    }

    #[test]
    fn test_category_period_report() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReportService::new(&storage);

        let report = service
            .build_category_period_report("Food", "2024-01-01", "31.01.2024")
            .unwrap();

        assert_eq!(report.row_count(), 2);
        assert_eq!(report.total, 80.0);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_invalid_boundary_date_fails_request() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReportService::new(&storage);

        let err = service
            .build_category_period_report("Food", "2024-13-40", "2024-01-31")
            .unwrap_err();
        assert!(matches!(err, ExpenseError::DateParse(_)));

        let err = service
            .build_category_period_report("Food", "2024-01-01", "")
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_unknown_category_policy() {
        let (_temp_dir, storage) = create_test_storage();

        let lenient = ReportService::new(&storage)
            .build_category_period_report("Hobbies", "2024-01-01", "2024-12-31")
            .unwrap();
        assert_eq!(lenient.row_count(), 0);

        let strict = ReportService::new(&storage).with_strict_categories(true);
        let err = strict
            .build_category_period_report("Hobbies", "2024-01-01", "2024-12-31")
            .unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidCategorySelection(_)));

        // The wildcard is always accepted
        assert!(strict
            .build_category_period_report("all", "2024-01-01", "2024-12-31")
            .is_ok());
    }

    #[test]
    fn test_comparisons() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReportService::new(&storage);

        let month = service.build_month_comparison(ymd(2024, 2, 15)).unwrap();
        assert_eq!(month.current_total, 100.0);
        assert_eq!(month.previous_total, 880.0);
        assert_eq!(month.difference, -780.0);

        let year = service.build_year_comparison(ymd(2024, 2, 15)).unwrap();
        assert_eq!(year.current_total, 980.0);
        assert_eq!(year.percentage_change, PercentageChange::Undefined);
    }

    #[test]
    fn test_reference_date() {
        assert_eq!(reference_date(Some("29.02.2024")).unwrap(), ymd(2024, 2, 29));
        assert!(reference_date(Some("31.02.2024")).is_err());
        assert!(reference_date(None).is_ok());
    }

    #[test]
    fn test_comparison_for_explicit_period() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReportService::new(&storage);

        let result = service
            .build_comparison(ReportPeriod::monthly(2024, 3))
            .unwrap();
        assert_eq!(result.current_total, 0.0);
        assert_eq!(result.percentage_change, PercentageChange::Defined(-100.0));
    }
}
