//! CLI commands for reports
//!
//! Provides commands for the category/period report and the month and year
//! comparisons.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ReportPeriod;
use crate::reports::{ComparisonResult, ALL_CATEGORIES};
use crate::services::report::{reference_date, ReportService};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// List expenses of a category within a date range
    #[command(alias = "period")]
    Category {
        /// Category name, or "all" for every category
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,

        /// Start date (YYYY-MM-DD, DD.MM.YYYY or MM/DD/YYYY)
        #[arg(short, long)]
        start: String,

        /// End date (YYYY-MM-DD, DD.MM.YYYY or MM/DD/YYYY)
        #[arg(short, long)]
        end: String,

        /// Fail if the category is not known
        #[arg(long)]
        strict: bool,

        /// Print the report as JSON
        #[arg(long, conflicts_with = "output")]
        json: bool,

        /// Export rows to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare the current month with the previous one
    Month {
        /// Reference date instead of today
        #[arg(long)]
        as_of: Option<String>,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare the current year with the previous one
    Year {
        /// Reference date instead of today
        #[arg(long)]
        as_of: Option<String>,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare a given month ("2024-03") or year ("2024") with the one before it
    Compare {
        /// Period to compare
        period: String,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    match cmd {
        ReportCommands::Category {
            category,
            start,
            end,
            strict,
            json,
            output,
        } => handle_category_report(
            storage,
            settings,
            &category,
            &start,
            &end,
            strict,
            json,
            output,
        ),
        ReportCommands::Month { as_of, json } => {
            let now = reference_date(as_of.as_deref())?;
            let result = ReportService::new(storage).build_month_comparison(now)?;
            print_comparison(&result, json)
        }
        ReportCommands::Year { as_of, json } => {
            let now = reference_date(as_of.as_deref())?;
            let result = ReportService::new(storage).build_year_comparison(now)?;
            print_comparison(&result, json)
        }
        ReportCommands::Compare { period, json } => {
            let period = ReportPeriod::parse(&period)?;
            let result = ReportService::new(storage).build_comparison(period)?;
            print_comparison(&result, json)
        }
    }
}

/// Handle the category/period report
#[allow(clippy::too_many_arguments)]
fn handle_category_report(
    storage: &Storage,
    settings: &Settings,
    category: &str,
    start: &str,
    end: &str,
    strict: bool,
    json: bool,
    output: Option<PathBuf>,
) -> ExpenseResult<()> {
    let report = ReportService::new(storage)
        .with_strict_categories(strict || settings.strict_categories)
        .build_category_period_report(category, start, end)?;

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!("Report exported to: {}", path.display());
    } else if json {
        print_json(&report)?;
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}

fn print_comparison(result: &ComparisonResult, json: bool) -> ExpenseResult<()> {
    if json {
        print_json(result)
    } else {
        print!("{}", result.format_terminal());
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> ExpenseResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
