//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init) and shared utilities (open_db)
//! - `serve` - Web server command
//! - `categories` - Fixed category listing
//! - `transactions` - Transaction commands (list, add, edit, delete)
//! - `budgets` - Budget commands (list, add, edit, delete)
//! - `dashboard` - Current month summary
//!
//! Data commands go through a `DataCache` connected to a running server.

pub mod budgets;
pub mod categories;
pub mod core;
pub mod dashboard;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use categories::*;
pub use core::*;
pub use dashboard::*;
pub use serve::*;
pub use transactions::*;

use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};

use tally_core::categories as fixed;
use tally_core::models::{Category, TransactionType};

use crate::cache::DataCache;
use crate::client::ApiClient;

/// Connect to the server and load both collections
pub async fn connect(server: &str) -> Result<DataCache> {
    let mut cache = DataCache::new(ApiClient::new(server));
    if cache.refresh().await.is_err() {
        bail!(
            "Could not load data from {}: {} (is 'tally serve' running?)",
            server,
            cache.last_error().unwrap_or("unknown error")
        );
    }
    Ok(cache)
}

/// The date used for "current month" views
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Signed, colored amount for listings
pub fn format_amount(kind: TransactionType, amount: f64) -> String {
    match kind {
        TransactionType::Expense => format!("\x1b[31m-${:.2}\x1b[0m", amount), // Red for expenses
        TransactionType::Income => format!("\x1b[32m+${:.2}\x1b[0m", amount), // Green for income
    }
}

/// Text progress bar for a 0-100 percentage
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Resolve a category by id, exact name, or unique partial name
pub fn resolve_category(arg: &str) -> Result<&'static Category> {
    if let Some(category) = fixed::find(arg) {
        return Ok(category);
    }

    let needle = arg.trim().to_lowercase();
    if let Some(category) = fixed::all()
        .iter()
        .find(|c| c.name.to_lowercase() == needle)
    {
        return Ok(category);
    }

    let partial: Vec<&'static Category> = fixed::all()
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect();

    match partial.as_slice() {
        [category] => Ok(*category),
        [] => bail!(
            "Unknown category '{}'. Run 'tally categories' to see the list.",
            arg
        ),
        _ => bail!(
            "Category '{}' is ambiguous: {}",
            arg,
            partial
                .iter()
                .map(|c| c.name)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
