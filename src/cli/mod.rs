//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod expense;
pub mod report;

pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_add, handle_import, handle_list};
pub use report::{handle_report_command, ReportCommands};
