//! Spending aggregation
//!
//! Pure reductions over an expense sequence. Sums run in input order so the
//! same record set always yields the same floating-point total. Records with
//! unparseable dates are excluded from every sum and reported as skipped.

use serde::Serialize;

use crate::models::{Expense, ReportPeriod};

/// Sum of amounts for one period
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PeriodTotal {
    /// Sum of matching amounts (0.0 when nothing matches)
    pub total: f64,
    /// Number of records inside the period
    pub matched: usize,
    /// Number of records whose date could not be normalized
    pub skipped: usize,
}

/// Total spending for records whose date falls inside `period`
pub fn total_for_period<'a, I>(records: I, period: &ReportPeriod) -> PeriodTotal
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut result = PeriodTotal::default();

    for expense in records {
        match expense.normalized_date() {
            Ok(date) if period.contains(date) => {
                result.total += expense.amount();
                result.matched += 1;
            }
            Ok(_) => {}
            Err(e) => {
                log::debug!("Excluding expense from {} total: {}", period, e);
                result.skipped += 1;
            }
        }
    }

    result
}

/// Total spending for a calendar month
pub fn total_for_month<'a, I>(records: I, year: i32, month: u32) -> PeriodTotal
where
    I: IntoIterator<Item = &'a Expense>,
{
    total_for_period(records, &ReportPeriod::monthly(year, month))
}

/// Total spending for a calendar year
pub fn total_for_year<'a, I>(records: I, year: i32) -> PeriodTotal
where
    I: IntoIterator<Item = &'a Expense>,
{
    total_for_period(records, &ReportPeriod::yearly(year))
}

/// Spending per category, in order of first occurrence
///
/// Records are summed regardless of date validity; callers pass an already
/// filtered sequence when a period applies.
pub fn totals_by_category<'a, I>(records: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals: Vec<(String, f64)> = Vec::new();

    for expense in records {
        match totals.iter_mut().find(|(name, _)| name == expense.category()) {
            Some((_, total)) => *total += expense.amount(),
            None => totals.push((expense.category().to_string(), expense.amount())),
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new("Food", 50.0, "2024-01-05"),
            Expense::new("Food", 30.0, "01/20/2024"),
            Expense::new("Rent", 800.0, "15.01.2024"),
            Expense::new("Food", 12.5, "2024-02-10"),
            Expense::new("Refund", -20.0, "3.3.2024"),
            Expense::new("Food", 1000.0, "2024-13-40"),
            Expense::new("Travel", 300.0, "2023-12-24"),
        ]
    }

    #[test]
    fn test_total_for_month() {
        let records = sample();
        let january = total_for_month(&records, 2024, 1);
        assert_eq!(january.total, 880.0);
        assert_eq!(january.matched, 3);
        assert_eq!(january.skipped, 1);
    }

    #[test]
    fn test_empty_month_is_zero() {
        let records = sample();
        let june = total_for_month(&records, 2024, 6);
        assert_eq!(june.total, 0.0);
        assert_eq!(june.matched, 0);
    }

    #[test]
    fn test_total_for_year_matches_definition() {
        let records = sample();
        let expected: f64 = records
            .iter()
            .filter(|e| matches!(e.normalized_date(), Ok(d) if chrono::Datelike::year(&d) == 2024))
            .map(|e| e.amount())
            .sum();

        let year = total_for_year(&records, 2024);
        assert_eq!(year.total, expected);
        assert_eq!(year.total, 872.5);
        assert_eq!(total_for_year(&records, 2023).total, 300.0);
    }

    #[test]
    fn test_months_add_up_to_year() {
        let records = sample();
        let monthly: f64 = (1..=12)
            .map(|month| total_for_month(&records, 2024, month).total)
            .sum();
        assert_eq!(monthly, total_for_year(&records, 2024).total);
    }

    #[test]
    fn test_malformed_dates_never_counted() {
        let records = vec![Expense::new("Food", 99.0, "2024-13-40")];
        for month in 1..=12 {
            assert_eq!(total_for_month(&records, 2024, month).total, 0.0);
        }
        let year = total_for_year(&records, 2024);
        assert_eq!(year.total, 0.0);
        assert_eq!(year.skipped, 1);
    }

    #[test]
    fn test_totals_by_category() {
        let records = sample();
        let totals = totals_by_category(records.iter().take(4));
        assert_eq!(
            totals,
            vec![("Food".to_string(), 92.5), ("Rent".to_string(), 800.0)]
        );
    }
}
