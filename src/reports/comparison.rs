//! Period comparisons
//!
//! Compares spending in a period against the period immediately before it.
//! Month and year comparisons share one calculation so both use the absolute
//! previous total as the denominator.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::display::report::{format_amount, format_percentage_change};
use crate::models::{Expense, Granularity, ReportPeriod};

use super::aggregate::total_for_period;

/// Relative change between two totals
///
/// Serializes as a number, or `null` when undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentageChange {
    /// The previous total was zero
    Undefined,
    Defined(f64),
}

impl PercentageChange {
    /// Percentage change from `previous` to `current`
    pub fn between(current: f64, previous: f64) -> Self {
        if previous == 0.0 {
            Self::Undefined
        } else {
            Self::Defined((current - previous) / previous.abs() * 100.0)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Undefined => None,
            Self::Defined(pct) => Some(*pct),
        }
    }
}

impl Serialize for PercentageChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Signed difference and percentage change between two totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub difference: f64,
    pub percentage_change: PercentageChange,
}

/// Compare a current total against a previous one
pub fn compare(current: f64, previous: f64) -> Change {
    Change {
        difference: current - previous,
        percentage_change: PercentageChange::between(current, previous),
    }
}

/// Direction of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Higher,
    Lower,
    Equal,
}

/// Current period versus the one before it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub granularity: Granularity,
    pub current_period: ReportPeriod,
    pub previous_period: ReportPeriod,
    pub current_label: String,
    pub previous_label: String,
    pub current_total: f64,
    pub previous_total: f64,
    pub difference: f64,
    pub percentage_change: PercentageChange,
    /// Records excluded because their date could not be normalized
    pub skipped: usize,
}

impl ComparisonResult {
    /// Compare `current` with the period immediately preceding it
    pub fn between(records: &[Expense], current: ReportPeriod) -> Self {
        let previous = current.prev();
        let current_total = total_for_period(records, &current);
        let previous_total = total_for_period(records, &previous);
        let change = compare(current_total.total, previous_total.total);

        Self {
            granularity: current.granularity(),
            current_period: current,
            previous_period: previous,
            current_label: current.to_string(),
            previous_label: previous.to_string(),
            current_total: current_total.total,
            previous_total: previous_total.total,
            difference: change.difference,
            percentage_change: change.percentage_change,
            // Both passes see the same records, so either count will do
            skipped: current_total.skipped,
        }
    }

    /// Calendar month containing `now` versus the month before it
    pub fn month(records: &[Expense], now: NaiveDate) -> Self {
        Self::between(records, ReportPeriod::month_of(now))
    }

    /// Calendar year containing `now` versus the year before it
    pub fn year(records: &[Expense], now: NaiveDate) -> Self {
        Self::between(records, ReportPeriod::year_of(now))
    }

    pub fn trend(&self) -> Trend {
        if self.difference > 0.0 {
            Trend::Higher
        } else if self.difference < 0.0 {
            Trend::Lower
        } else {
            Trend::Equal
        }
    }

    /// Format the comparison for terminal display
    pub fn format_terminal(&self) -> String {
        let noun = self.granularity.noun();
        let mut output = String::new();

        output.push_str(&format!(
            "Expenses in current {} ({}): {}\n",
            noun,
            self.current_label,
            format_amount(self.current_total)
        ));
        output.push_str(&format!(
            "Expenses in previous {} ({}): {}\n",
            noun,
            self.previous_label,
            format_amount(self.previous_total)
        ));

        match self.trend() {
            Trend::Higher => output.push_str(&format!(
                "Expenses in current {} are higher by: {}\n",
                noun,
                format_amount(self.difference)
            )),
            Trend::Lower => output.push_str(&format!(
                "Expenses in current {} are lower by: {}\n",
                noun,
                format_amount(self.difference.abs())
            )),
            Trend::Equal => output.push_str(&format!(
                "Expenses in current {} are equal to expenses in previous {}.\n",
                noun, noun
            )),
        }

        output.push_str(&format!(
            "Percentage change: {}\n",
            format_percentage_change(self.percentage_change)
        ));

        if self.skipped > 0 {
            output.push_str(&format!(
                "({} record(s) with unreadable dates were skipped)\n",
                self.skipped
            ));
        }

        output
    }
}
