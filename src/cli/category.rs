//! Category CLI commands
//!
//! Implements CLI commands for managing the configured category list.

use clap::Subcommand;

use crate::display::category::format_category_list;
use crate::error::ExpenseResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List configured categories and any others used by expenses
    List,

    /// Add a category
    Add {
        /// Category name (case-sensitive)
        name: String,
    },

    /// Remove a category (recorded expenses are kept)
    #[command(alias = "delete")]
    Remove {
        /// Category name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> ExpenseResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let configured = service.list()?;
            let used_only: Vec<String> = service
                .distinct_expense_categories()?
                .into_iter()
                .filter(|c| !configured.contains(c))
                .collect();
            print!("{}", format_category_list(&configured, &used_only));
        }

        CategoryCommands::Add { name } => {
            let name = service.add(&name)?;
            println!("Added category: {}", name);
        }

        CategoryCommands::Remove { name } => {
            service.remove(&name)?;
            println!("Removed category: {}", name);
        }
    }

    Ok(())
}
