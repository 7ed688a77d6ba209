//! Report and analytics engine
//!
//! Filtering, aggregation, period comparisons and the category/period
//! report. Everything here is a pure computation over a record snapshot
//! supplied by the caller.

pub mod aggregate;
pub mod category_period;
pub mod comparison;
pub mod filter;

pub use aggregate::{total_for_month, total_for_period, total_for_year, totals_by_category, PeriodTotal};
pub use category_period::{CategoryPeriodReport, CategoryRows, ReportRow};
pub use comparison::{compare, Change, ComparisonResult, PercentageChange, Trend};
pub use filter::{
    filter_expenses, CategorySelection, DateRange, DatedExpense, ExpenseFilter, FilterOutcome,
    ALL_CATEGORIES, ALL_CATEGORIES_LABEL,
};
