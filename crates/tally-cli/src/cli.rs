//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::client::DEFAULT_SERVER;

/// Tally - Track income, expenses and monthly budgets
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Self-hosted personal finance tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set TALLY_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Tally server used by the data commands
    #[arg(long, env = "TALLY_SERVER", default_value = DEFAULT_SERVER, global = true)]
    pub server: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// List the fixed categories
    Categories {
        /// Only income or expense categories
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// Manage transactions (list, add, edit, delete)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage monthly budgets (list, add, edit, delete)
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Show the current month at a glance
    Dashboard,
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions
    List {
        /// Match description or category name (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Sort by date or amount
        #[arg(long, default_value = "date")]
        sort: String,
    },

    /// Record a transaction
    Add {
        /// Amount (always positive)
        amount: f64,

        /// Description
        description: String,

        /// Category id or name (see 'tally categories')
        #[arg(short, long)]
        category: String,

        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Change fields of a transaction
    Edit {
        /// Transaction ID
        id: String,

        #[arg(long)]
        amount: Option<f64>,

        #[arg(long)]
        description: Option<String>,

        /// Category id or name
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets with spending for their month
    List,

    /// Set a budget for one category and month
    Add {
        /// Expense category id or name
        category: String,

        /// Monthly ceiling
        amount: f64,

        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Change fields of a budget
    Edit {
        /// Budget ID
        id: String,

        /// Expense category id or name
        #[arg(short, long)]
        category: Option<String>,

        #[arg(long)]
        amount: Option<f64>,

        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Stored spent value
        #[arg(long)]
        spent: Option<f64>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: String,
    },
}
