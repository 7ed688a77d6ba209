//! Core data models for the expense tracker
//!
//! This module contains the data structures of the spending domain: expense
//! records, normalized dates and report periods.

pub mod date;
pub mod expense;
pub mod period;

pub use date::{canonical, normalize_date, DateFormat, DateParseError};
pub use expense::{Expense, ExpenseValidationError};
pub use period::{Granularity, PeriodParseError, ReportPeriod};
