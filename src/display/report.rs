//! Report formatting utilities for terminal output
//!
//! Amounts are always rendered with one fractional digit.

use crate::reports::PercentageChange;

/// Canonical number of fractional digits for displayed amounts
pub const DISPLAY_PRECISION: usize = 1;

/// Format an amount with the canonical display precision
pub fn format_amount(amount: f64) -> String {
    format!("{:.*}", DISPLAY_PRECISION, amount)
}

/// Format a percentage change
///
/// The magnitude is shown; the direction is carried by the surrounding
/// wording. An undefined change reads as "No data".
pub fn format_percentage_change(change: PercentageChange) -> String {
    match change {
        PercentageChange::Undefined => "No data (previous expenses are zero)".to_string(),
        PercentageChange::Defined(pct) => format!("{:.*}%", DISPLAY_PRECISION, pct.abs()),
    }
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Left-align text in a field of given width
pub fn left_align(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}
