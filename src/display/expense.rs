//! Expense display formatting
//!
//! Formats stored expenses as a table for terminal output.

use crate::models::Expense;

use super::report::{format_amount, left_align, separator, truncate};

const CATEGORY_WIDTH: usize = 18;

/// Format expenses as a table, in the order given
pub fn format_expense_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n\nUse 'expenses add <category> <amount> <date>' to record one."
            .to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{} | {} | {:>10}\n",
        left_align("Date", 11),
        left_align("Category", CATEGORY_WIDTH),
        "Amount"
    ));
    output.push_str(&separator(47));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format!(
            "{} | {} | {:>10}\n",
            left_align(expense.date_literal(), 11),
            left_align(&truncate(expense.category(), CATEGORY_WIDTH), CATEGORY_WIDTH),
            format_amount(expense.amount())
        ));
    }

    output.push_str(&format!("\n{} expense(s)\n", expenses.len()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert!(format_expense_list(&[]).contains("No expenses recorded"));
    }

    #[test]
    fn test_list_keeps_literal_dates() {
        let expenses = vec![
            Expense::new("Food", 50.0, "01/20/2024"),
            Expense::new("A very long category name indeed", 7.25, "2024-01-05"),
        ];
        let output = format_expense_list(&expenses);

        assert!(output.contains("01/20/2024  | Food"));
        assert!(output.contains("A very long cat..."));
        assert!(output.contains("2 expense(s)"));
    }
}
