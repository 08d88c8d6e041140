//! Tally CLI - Personal finance tracker
//!
//! Usage:
//!   tally init                       Initialize database
//!   tally serve --port 3000          Start web server
//!   tally transactions add 12.50 Lunch --category food
//!   tally budgets add food 300       Budget for the current month
//!   tally dashboard                  Current month at a glance

mod cache;
mod cli;
mod client;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::{BudgetEdit, TransactionEdit};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            commands::cmd_serve(&cli.db, &host, port, cli.no_encrypt, static_dir.as_deref())
                .await
        }
        Commands::Categories { kind } => commands::cmd_categories(kind.as_deref()),
        Commands::Transactions { action } => {
            let mut cache = commands::connect(&cli.server).await?;
            match action {
                None => commands::cmd_transactions_list(&cache, None, "date"),
                Some(TransactionsAction::List { search, sort }) => {
                    commands::cmd_transactions_list(&cache, search.as_deref(), &sort)
                }
                Some(TransactionsAction::Add {
                    amount,
                    description,
                    category,
                    kind,
                    date,
                }) => {
                    commands::cmd_transactions_add(
                        &mut cache,
                        amount,
                        &description,
                        &category,
                        &kind,
                        date.as_deref(),
                    )
                    .await
                }
                Some(TransactionsAction::Edit {
                    id,
                    amount,
                    description,
                    category,
                    kind,
                    date,
                }) => {
                    let edit = TransactionEdit {
                        amount,
                        description,
                        category,
                        kind,
                        date,
                    };
                    commands::cmd_transactions_edit(&mut cache, &id, edit).await
                }
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&mut cache, &id).await
                }
            }
        }
        Commands::Budgets { action } => {
            let mut cache = commands::connect(&cli.server).await?;
            match action {
                None | Some(BudgetsAction::List) => commands::cmd_budgets_list(&cache),
                Some(BudgetsAction::Add {
                    category,
                    amount,
                    month,
                }) => {
                    commands::cmd_budgets_add(&mut cache, &category, amount, month.as_deref())
                        .await
                }
                Some(BudgetsAction::Edit {
                    id,
                    category,
                    amount,
                    month,
                    spent,
                }) => {
                    let edit = BudgetEdit {
                        category,
                        amount,
                        month,
                        spent,
                    };
                    commands::cmd_budgets_edit(&mut cache, &id, edit).await
                }
                Some(BudgetsAction::Delete { id }) => {
                    commands::cmd_budgets_delete(&mut cache, &id).await
                }
            }
        }
        Commands::Dashboard => {
            let cache = commands::connect(&cli.server).await?;
            commands::cmd_dashboard(&cache)
        }
    }
}
