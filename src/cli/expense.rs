//! Expense CLI commands
//!
//! Recording, listing and importing expenses.

use std::path::Path;

use crate::display::expense::format_expense_list;
use crate::error::ExpenseResult;
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Record a new expense
pub fn handle_add(storage: &Storage, category: &str, amount: f64, date: &str) -> ExpenseResult<()> {
    let expense = ExpenseService::new(storage).add(category, amount, date)?;
    println!("Recorded: {}", expense);
    Ok(())
}

/// List recorded expenses
pub fn handle_list(
    storage: &Storage,
    category: Option<&str>,
    limit: Option<usize>,
) -> ExpenseResult<()> {
    let expenses = ExpenseService::new(storage).list(category, limit)?;
    print!("{}", format_expense_list(&expenses));
    Ok(())
}

/// Import expenses from a legacy flat file
pub fn handle_import(storage: &Storage, file: &Path) -> ExpenseResult<()> {
    let summary = ExpenseService::new(storage).import_legacy(file)?;

    println!("Imported {} expense(s) from {}", summary.imported, file.display());
    if summary.unreadable_dates > 0 {
        println!(
            "  {} of them have unreadable dates and will be skipped in reports",
            summary.unreadable_dates
        );
    }
    if !summary.rejected.is_empty() {
        println!("  {} line(s) could not be read:", summary.rejected.len());
        for line in &summary.rejected {
            println!("    line {}: {} ({})", line.line_number, line.content, line.reason);
        }
    }

    Ok(())
}
