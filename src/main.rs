use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use expense_tracker::api::{start_server, AppState};
use expense_tracker::cli::{
    handle_add, handle_category_command, handle_import, handle_list, handle_report_command,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Record discretionary spending and compare it across months and years",
    long_about = "Expense Tracker records spending entries and produces category and \
                  period reports, including month-over-month and year-over-year \
                  comparisons. Dates are accepted as YYYY-MM-DD, DD.MM.YYYY or MM/DD/YYYY."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with default categories
    Init,

    /// Show current configuration and paths
    Config,

    /// Record an expense
    Add {
        /// Category name
        category: String,
        /// Amount
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Date (YYYY-MM-DD, DD.MM.YYYY or MM/DD/YYYY)
        date: String,
    },

    /// List recorded expenses
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
        /// Show only the most recent N expenses
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Import expenses from a legacy text file ("<category> <amount> <date>" per line)
    Import {
        /// Path to the legacy file
        file: PathBuf,
    },

    /// Category management commands
    #[command(subcommand)]
    Category(expense_tracker::cli::CategoryCommands),

    /// Reports and comparisons
    #[command(subcommand)]
    Report(expense_tracker::cli::ReportCommands),

    /// Run the HTTP API server
    Serve {
        /// Address to bind (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory of web front-end files to serve at `/`
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Expense Tracker at: {}", paths.base_dir().display());
            initialize_storage(&paths, &settings)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Categories: {}", settings.default_categories.join(", "));
            println!();
            println!("Run 'expenses add <category> <amount> <date>' to record an expense.");
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Expenses file:   {}", paths.expenses_file().display());
            println!("Categories file: {}", paths.categories_file().display());
            println!();
            println!("Settings:");
            println!("  Server address:    {}", settings.server_addr());
            println!("  Strict categories: {}", settings.strict_categories);
            match &settings.static_dir {
                Some(dir) => println!("  Static files:      {}", dir.display()),
                None => println!("  Static files:      (none)"),
            }
        }
        Some(Commands::Add {
            category,
            amount,
            date,
        }) => {
            handle_add(&storage, &category, amount, &date)?;
        }
        Some(Commands::List { category, limit }) => {
            handle_list(&storage, category.as_deref(), limit)?;
        }
        Some(Commands::Import { file }) => {
            handle_import(&storage, &file)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Serve {
            host,
            port,
            static_dir,
        }) => {
            if let Some(host) = host {
                settings.server_host = host;
            }
            if let Some(port) = port {
                settings.server_port = port;
            }
            if static_dir.is_some() {
                settings.static_dir = static_dir;
            }

            let addr = settings.server_addr();
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(start_server(AppState::new(storage, settings), &addr))?;
        }
        None => {
            println!("Expense Tracker - spending records and reports");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses init' to set up the data directory.");
        }
    }

    Ok(())
}
