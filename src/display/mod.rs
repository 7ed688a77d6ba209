//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, categories and report values
//! for terminal display.

pub mod category;
pub mod expense;
pub mod report;

pub use category::format_category_list;
pub use expense::format_expense_list;
pub use report::{format_amount, format_percentage_change, DISPLAY_PRECISION};
