//! Transaction command implementations

use anyhow::{anyhow, bail, Result};

use tally_core::categories;
use tally_core::input::{AmountInput, TransactionInput};
use tally_core::models::TransactionSort;

use super::{format_amount, resolve_category, today, truncate};
use crate::cache::DataCache;

/// Fields to change on an existing transaction
#[derive(Debug, Default)]
pub struct TransactionEdit {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub kind: Option<String>,
    pub date: Option<String>,
}

impl TransactionEdit {
    fn into_input(self) -> Result<TransactionInput> {
        let category = self
            .category
            .as_deref()
            .map(resolve_category)
            .transpose()?
            .map(|c| c.id.to_string());

        let input = TransactionInput {
            amount: self.amount.map(AmountInput::from),
            date: self.date,
            description: self.description,
            category,
            kind: self.kind,
        };

        if input == TransactionInput::default() {
            bail!("Nothing to change. Pass at least one of --amount, --description, --category, --type, --date.");
        }
        Ok(input)
    }
}

pub fn cmd_transactions_list(cache: &DataCache, search: Option<&str>, sort: &str) -> Result<()> {
    let sort: TransactionSort = sort.parse().map_err(|e: String| anyhow!(e))?;
    let transactions = cache.search(search, sort);

    if transactions.is_empty() {
        if search.is_some() {
            println!("No transactions match your search.");
        } else {
            println!("No transactions yet. Record one with:");
            println!("  tally transactions add 12.50 Lunch --category food");
        }
        return Ok(());
    }

    println!();
    println!("📝 Transactions ({})", transactions.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        println!(
            "   {} │ {} │ {:>10} │ {} {:<16} │ {}",
            tx.id,
            tx.date,
            format_amount(tx.kind, tx.amount),
            categories::icon_of(&tx.category),
            truncate(categories::name_of(&tx.category), 16),
            truncate(&tx.description, 32)
        );
    }

    Ok(())
}

pub async fn cmd_transactions_add(
    cache: &mut DataCache,
    amount: f64,
    description: &str,
    category: &str,
    kind: &str,
    date: Option<&str>,
) -> Result<()> {
    let category = resolve_category(category)?;
    let date = date.map(String::from).unwrap_or_else(|| today().to_string());

    let input = TransactionInput {
        amount: Some(AmountInput::from(amount)),
        date: Some(date),
        description: Some(description.to_string()),
        category: Some(category.id.to_string()),
        kind: Some(kind.to_string()),
    };

    let tx = cache.add_transaction(&input).await?;

    println!("✅ Recorded transaction {}:", tx.id);
    println!(
        "   {} │ {} │ {} {} │ {}",
        tx.date,
        format_amount(tx.kind, tx.amount),
        category.icon,
        category.name,
        truncate(&tx.description, 40)
    );

    Ok(())
}

pub async fn cmd_transactions_edit(
    cache: &mut DataCache,
    id: &str,
    edit: TransactionEdit,
) -> Result<()> {
    let input = edit.into_input()?;
    let tx = cache.update_transaction(id, &input).await?;

    println!("✅ Updated transaction {}:", tx.id);
    println!(
        "   {} │ {} │ {} │ {}",
        tx.date,
        format_amount(tx.kind, tx.amount),
        categories::name_of(&tx.category),
        truncate(&tx.description, 40)
    );

    Ok(())
}

pub async fn cmd_transactions_delete(cache: &mut DataCache, id: &str) -> Result<()> {
    cache.delete_transaction(id).await?;
    println!("🗑️  Deleted transaction {}", id);
    Ok(())
}
