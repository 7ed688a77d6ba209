//! Expense Tracker - discretionary spending records and reports
//!
//! This library records spending entries and produces category/period reports
//! together with month-over-month and year-over-year comparisons. Dates may be
//! entered as `YYYY-MM-DD`, `DD.MM.YYYY` or `MM/DD/YYYY`; every report
//! normalizes them through one shared parser.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, dates, report periods)
//! - `storage`: JSON file storage layer and legacy import
//! - `reports`: Filtering, aggregation, comparisons and the category report
//! - `services`: Business logic layer
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expenses` binary
//! - `api`: HTTP API
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{ExpensePaths, Settings};
//! use expense_tracker::services::ReportService;
//! use expense_tracker::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let report = ReportService::new(&storage)
//!     .build_category_period_report("Food", "2024-01-01", "31.01.2024")?;
//! print!("{}", report.format_terminal());
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
