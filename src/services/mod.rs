//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation at the input boundary and handing record snapshots to
//! the report engine.

pub mod category;
pub mod expense;
pub mod report;

pub use category::CategoryService;
pub use expense::{ExpenseService, ImportSummary};
pub use report::ReportService;
