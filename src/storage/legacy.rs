//! Legacy flat-file import
//!
//! Older installations kept expenses in a text file with one record per line:
//!
//! ```text
//! Food 50.0 2024-01-05
//! Eating Out 12.5 20.01.2024
//! ```
//!
//! The last two space-separated tokens are the amount and the date; everything
//! before them is the category, which may itself contain spaces. Dates are kept
//! verbatim and normalized at report time like any other record.

use std::path::Path;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

/// A line that could not be turned into an expense
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    /// 1-based line number
    pub line_number: usize,
    pub content: String,
    pub reason: String,
}

/// Result of parsing a legacy file
#[derive(Debug, Clone, Default)]
pub struct LegacyImport {
    pub expenses: Vec<Expense>,
    pub rejected: Vec<RejectedLine>,
}

/// Parse a single legacy line
///
/// Returns `None` for blank lines.
pub fn parse_legacy_line(line: &str) -> Option<Result<Expense, String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some((rest, date)) = line.rsplit_once(' ') else {
        return Some(Err("expected '<category> <amount> <date>'".to_string()));
    };
    let Some((category, amount)) = rest.trim_end().rsplit_once(' ') else {
        return Some(Err("expected '<category> <amount> <date>'".to_string()));
    };

    let category = category.trim();
    if category.is_empty() {
        return Some(Err("missing category".to_string()));
    }

    match amount.parse::<f64>() {
        Ok(amount) => Some(Ok(Expense::new(category, amount, date))),
        Err(_) => Some(Err(format!("invalid amount '{}'", amount))),
    }
}

/// Parse the full contents of a legacy file
pub fn parse_legacy(contents: &str) -> LegacyImport {
    let mut import = LegacyImport::default();

    for (index, line) in contents.lines().enumerate() {
        match parse_legacy_line(line) {
            None => continue,
            Some(Ok(expense)) => import.expenses.push(expense),
            Some(Err(reason)) => {
                log::warn!("Rejected legacy line {}: {}", index + 1, reason);
                import.rejected.push(RejectedLine {
                    line_number: index + 1,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    import
}

/// Read and parse a legacy file from disk
pub fn read_legacy_file<P: AsRef<Path>>(path: P) -> ExpenseResult<LegacyImport> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ExpenseError::Import(format!("Failed to read {}: {}", path.display(), e))
    })?;

    Ok(parse_legacy(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_simple_line() {
        let expense = parse_legacy_line("Food 50.0 2024-01-05").unwrap().unwrap();
        assert_eq!(expense, Expense::new("Food", 50.0, "2024-01-05"));
    }

    #[test]
    fn test_category_with_spaces() {
        let expense = parse_legacy_line("  Eating  Out 12.5 20.01.2024 ")
            .unwrap()
            .unwrap();
        assert_eq!(expense.category(), "Eating  Out");
        assert_eq!(expense.amount(), 12.5);
        assert_eq!(expense.date_literal(), "20.01.2024");
    }

    #[test]
    fn test_blank_and_bad_lines() {
        assert!(parse_legacy_line("   ").is_none());
        assert!(parse_legacy_line("Food").unwrap().is_err());
        assert!(parse_legacy_line("50.0 2024-01-05").unwrap().is_err());
        assert_eq!(
            parse_legacy_line("Food fifty 2024-01-05").unwrap().unwrap_err(),
            "invalid amount 'fifty'"
        );
    }

    #[test]
    fn test_parse_file_contents() {
        let contents = "Food 50.0 2024-01-05\n\nRent 800 15.01.2024\nFood abc 01/20/2024\n";
        let import = parse_legacy(contents);

        assert_eq!(import.expenses.len(), 2);
        assert_eq!(import.rejected.len(), 1);
        assert_eq!(import.rejected[0].line_number, 4);
    }

    #[test]
    fn test_read_legacy_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.txt");
        std::fs::write(&path, "Transport 2.5 2024-02-01\n").unwrap();

        let import = read_legacy_file(&path).unwrap();
        assert_eq!(import.expenses, vec![Expense::new("Transport", 2.5, "2024-02-01")]);

        let missing = read_legacy_file(temp_dir.path().join("missing.txt"));
        assert!(matches!(missing, Err(ExpenseError::Import(_))));
    }
}
