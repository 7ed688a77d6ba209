//! Category and date-range filtering
//!
//! Selects expenses by category and an inclusive date range. Records whose
//! date literal cannot be normalized are left out and counted, never
//! propagated as an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Wildcard accepted in place of a category name
pub const ALL_CATEGORIES: &str = "all";

/// Label used in reports when every category is selected
pub const ALL_CATEGORIES_LABEL: &str = "All categories";

/// Which categories a report covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum CategorySelection {
    All,
    Named(String),
}

impl CategorySelection {
    /// Interpret a category argument; only the exact literal `all` is the wildcard
    pub fn parse(category: &str) -> Self {
        if category == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(category.to_string())
        }
    }

    /// Check whether a record category is selected (exact, case-sensitive)
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }

    /// Label shown in report headers
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES_LABEL,
            Self::Named(name) => name,
        }
    }
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range; `start > end` is allowed and matches nothing
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check if a date falls inside the range, bounds included
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// An expense that passed a filter, paired with its normalized date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedExpense<'a> {
    pub expense: &'a Expense,
    pub date: NaiveDate,
}

/// Filter output: matches in input order plus the number of skipped records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome<'a> {
    pub matches: Vec<DatedExpense<'a>>,
    pub skipped: usize,
}

impl<'a> FilterOutcome<'a> {
    /// Matching expenses in input order
    pub fn expenses(&self) -> impl Iterator<Item = &'a Expense> + '_ {
        self.matches.iter().map(|m| m.expense)
    }

    /// Sum of matching amounts, in input order
    pub fn total(&self) -> f64 {
        self.matches.iter().map(|m| m.expense.amount()).sum()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// A category selection combined with a date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub category: CategorySelection,
    pub range: DateRange,
}

impl ExpenseFilter {
    pub fn new(category: CategorySelection, range: DateRange) -> Self {
        Self { category, range }
    }

    /// Apply the filter, keeping input order
    pub fn apply<'a, I>(&self, records: I) -> FilterOutcome<'a>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut outcome = FilterOutcome::default();

        for expense in records {
            let date = match expense.normalized_date() {
                Ok(date) => date,
                Err(e) => {
                    log::debug!("Skipping expense in '{}': {}", expense.category(), e);
                    outcome.skipped += 1;
                    continue;
                }
            };

            if self.category.matches(expense.category()) && self.range.contains(date) {
                outcome.matches.push(DatedExpense { expense, date });
            }
        }

        outcome
    }
}

/// Filter records by category argument (`all` or a name) and inclusive range
pub fn filter_expenses<'a, I>(
    records: I,
    category: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> FilterOutcome<'a>
where
    I: IntoIterator<Item = &'a Expense>,
{
    ExpenseFilter::new(CategorySelection::parse(category), DateRange::new(start, end)).apply(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new("Food", 50.0, "2024-01-05"),
            Expense::new("Food", 30.0, "01/20/2024"),
            Expense::new("Rent", 800.0, "15.01.2024"),
            Expense::new("Food", 5.0, "2024-13-40"),
            Expense::new("food", 7.0, "2024-01-10"),
            Expense::new("Food", 9.0, "2024-02-01"),
        ]
    }

    #[test]
    fn test_category_and_range() {
        let records = sample();
        let outcome = filter_expenses(&records, "Food", ymd(2024, 1, 1), ymd(2024, 1, 31));

        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.total(), 80.0);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_wildcard_is_exact_literal() {
        let records = sample();
        let all = filter_expenses(&records, "all", ymd(2024, 1, 1), ymd(2024, 1, 31));
        assert_eq!(all.len(), 4);

        let upper = filter_expenses(&records, "ALL", ymd(2024, 1, 1), ymd(2024, 1, 31));
        assert!(upper.is_empty());
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let records = sample();
        let outcome = filter_expenses(&records, "food", ymd(2024, 1, 1), ymd(2024, 1, 31));
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.total(), 7.0);

        let padded = filter_expenses(&records, " Food", ymd(2024, 1, 1), ymd(2024, 1, 31));
        assert!(padded.is_empty());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let records = sample();
        let outcome = filter_expenses(&records, "Food", ymd(2024, 1, 5), ymd(2024, 1, 20));
        assert_eq!(outcome.len(), 2);

        let narrower = filter_expenses(&records, "Food", ymd(2024, 1, 6), ymd(2024, 1, 19));
        assert!(narrower.is_empty());
    }

    #[test]
    fn test_keeps_input_order() {
        let records = vec![
            Expense::new("Food", 1.0, "2024-01-20"),
            Expense::new("Food", 2.0, "2024-01-05"),
        ];
        let outcome = filter_expenses(&records, "all", ymd(2024, 1, 1), ymd(2024, 1, 31));
        let amounts: Vec<_> = outcome.expenses().map(|e| e.amount()).collect();
        assert_eq!(amounts, vec![1.0, 2.0]);
    }

    #[test]
    fn test_idempotent() {
        let records = sample();
        let filter = ExpenseFilter::new(
            CategorySelection::parse("Food"),
            DateRange::new(ymd(2024, 1, 1), ymd(2024, 1, 31)),
        );

        let first = filter.apply(&records);
        let second = filter.apply(first.expenses());

        assert_eq!(first.matches, second.matches);
        assert_eq!(second.skipped, 0);
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let records = sample();
        let outcome = filter_expenses(&records, "all", ymd(2024, 1, 31), ymd(2024, 1, 1));
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_selection_label() {
        assert_eq!(CategorySelection::parse("all").label(), ALL_CATEGORIES_LABEL);
        assert_eq!(CategorySelection::parse("Rent").label(), "Rent");
    }
}
