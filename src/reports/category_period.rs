//! Category/Period Report
//!
//! Lists the expenses of one category (or all of them) inside a date range,
//! grouped by category and ordered by date within each group.

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

use crate::display::report::{format_amount, separator};
use crate::error::ExpenseResult;
use crate::models::{canonical, Expense};

use super::filter::{ExpenseFilter, FilterOutcome};

const REPORT_WIDTH: usize = 40;

/// One line of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
}

/// Rows belonging to one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRows {
    pub category: String,
    pub rows: Vec<ReportRow>,
    pub total: f64,
}

/// Category/Period Report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPeriodReport {
    /// Selected category, or "All categories"
    pub category_label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Groups in order of first occurrence
    pub groups: Vec<CategoryRows>,
    pub total: f64,
    /// Records excluded because their date could not be normalized
    pub skipped: usize,
}

impl CategoryPeriodReport {
    /// Generate a report from a record snapshot
    pub fn generate(records: &[Expense], filter: &ExpenseFilter) -> Self {
        let outcome = filter.apply(records);

        Self {
            category_label: filter.category.label().to_string(),
            start_date: filter.range.start,
            end_date: filter.range.end,
            groups: present(&outcome),
            total: outcome.total(),
            skipped: outcome.skipped,
        }
    }

    /// All rows, group after group
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.groups.iter().flat_map(|g| g.rows.iter())
    }

    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&"=".repeat(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!("Category: {}\n", self.category_label));
        output.push_str(&format!(
            "Period: from {} to {}\n",
            canonical(self.start_date),
            canonical(self.end_date)
        ));

        if self.groups.is_empty() {
            output.push_str("No expenses found for this period.\n");
        } else {
            output.push_str(&separator(REPORT_WIDTH));
            output.push('\n');
            for row in self.rows() {
                output.push_str(&format!(
                    "{:<11} | {:<18} | {}\n",
                    canonical(row.date),
                    row.category,
                    format_amount(row.amount)
                ));
            }
            output.push_str(&separator(REPORT_WIDTH));
            output.push('\n');
            output.push_str(&format!("Total: {}\n", format_amount(self.total)));
        }

        if self.skipped > 0 {
            output.push_str(&format!(
                "({} record(s) with unreadable dates were skipped)\n",
                self.skipped
            ));
        }

        output
    }

    /// Export the report rows to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Date", "Category", "Amount"])?;

        for row in self.rows() {
            csv_writer.write_record([
                canonical(row.date),
                row.category.clone(),
                format_amount(row.amount),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Group filtered expenses by category and order each group by date
///
/// Groups appear in order of first occurrence; equal dates keep their input
/// order.
pub fn present(outcome: &FilterOutcome<'_>) -> Vec<CategoryRows> {
    let mut groups: Vec<CategoryRows> = Vec::new();

    for matched in &outcome.matches {
        let category = matched.expense.category();
        let row = ReportRow {
            date: matched.date,
            category: category.to_string(),
            amount: matched.expense.amount(),
        };

        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.rows.push(row),
            None => groups.push(CategoryRows {
                category: category.to_string(),
                rows: vec![row],
                total: 0.0,
            }),
        }
    }

    for group in &mut groups {
        group.rows.sort_by_key(|row| row.date);
        group.total = group.rows.iter().map(|row| row.amount).sum();
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::filter::{CategorySelection, DateRange};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january(category: &str) -> ExpenseFilter {
        ExpenseFilter::new(
            CategorySelection::parse(category),
            DateRange::new(ymd(2024, 1, 1), ymd(2024, 1, 31)),
        )
    }

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new("Food", 50.0, "2024-01-05"),
            Expense::new("Food", 30.0, "01/20/2024"),
            Expense::new("Rent", 800.0, "15.01.2024"),
        ]
    }

    #[test]
    fn test_food_in_january() {
        let report = CategoryPeriodReport::generate(&sample(), &january("Food"));

        assert_eq!(report.category_label, "Food");
        assert_eq!(report.row_count(), 2);
        assert_eq!(report.total, 80.0);

        let dates: Vec<_> = report.rows().map(|r| r.date).collect();
        assert_eq!(dates, vec![ymd(2024, 1, 5), ymd(2024, 1, 20)]);
    }

    #[test]
    fn test_groups_by_first_occurrence_and_sorts_by_date() {
        let records = vec![
            Expense::new("Rent", 800.0, "2024-01-15"),
            Expense::new("Food", 30.0, "2024-01-20"),
            Expense::new("Food", 50.0, "05.01.2024"),
            Expense::new("Rent", 10.0, "1/2/2024"),
        ];
        let report = CategoryPeriodReport::generate(&records, &january("all"));

        assert_eq!(report.category_label, "All categories");
        let names: Vec<_> = report.groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food"]);
        assert_eq!(report.groups[0].rows[0].amount, 10.0);
        assert_eq!(report.groups[1].rows[0].amount, 50.0);
        assert_eq!(report.groups[0].total, 810.0);
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let records = vec![
            Expense::new("Food", 1.0, "2024-01-05"),
            Expense::new("Food", 2.0, "01/05/2024"),
            Expense::new("Food", 3.0, "05.01.2024"),
        ];
        let report = CategoryPeriodReport::generate(&records, &january("Food"));
        let amounts: Vec<_> = report.rows().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_format_terminal() {
        let report = CategoryPeriodReport::generate(&sample(), &january("Food"));
        let output = report.format_terminal();

        assert!(output.contains("Category: Food"));
        assert!(output.contains("Period: from 2024-01-01 to 2024-01-31"));
        assert!(output.contains("2024-01-05  | Food               | 50.0"));
        assert!(output.contains("Total: 80.0"));
    }

    #[test]
    fn test_format_empty_and_skipped() {
        let records = vec![Expense::new("Food", 5.0, "2024-13-40")];
        let report = CategoryPeriodReport::generate(&records, &january("Food"));
        let output = report.format_terminal();

        assert_eq!(report.skipped, 1);
        assert!(output.contains("No expenses found"));
        assert!(output.contains("1 record(s) with unreadable dates were skipped"));
    }

    #[test]
    fn test_export_csv() {
        let report = CategoryPeriodReport::generate(&sample(), &january("Food"));
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(
            csv,
            "Date,Category,Amount\n2024-01-05,Food,50.0\n2024-01-20,Food,30.0\n"
        );
    }
}
