//! Category listing

use anyhow::{anyhow, Result};
use tally_core::categories;
use tally_core::models::TransactionType;

pub fn cmd_categories(kind: Option<&str>) -> Result<()> {
    let kinds = match kind {
        Some(k) => vec![k.parse::<TransactionType>().map_err(|e| anyhow!(e))?],
        None => vec![TransactionType::Expense, TransactionType::Income],
    };

    for kind in kinds {
        println!();
        match kind {
            TransactionType::Expense => println!("💸 Expense Categories"),
            TransactionType::Income => println!("💰 Income Categories"),
        }
        println!("   ─────────────────────────────");

        for category in categories::by_type(kind) {
            println!(
                "   {:>2} │ {} {:<16} │ {}",
                category.id, category.icon, category.name, category.color
            );
        }
    }

    Ok(())
}
