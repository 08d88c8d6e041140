//! Budget command implementations

use anyhow::{bail, Result};

use tally_core::analytics;
use tally_core::categories;
use tally_core::input::{AmountInput, BudgetInput};
use tally_core::models::{Category, Month, TransactionType};

use super::{progress_bar, resolve_category, today};
use crate::cache::DataCache;

/// Fields to change on an existing budget
#[derive(Debug, Default)]
pub struct BudgetEdit {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub month: Option<String>,
    pub spent: Option<f64>,
}

impl BudgetEdit {
    fn into_input(self) -> Result<BudgetInput> {
        let category_id = self
            .category
            .as_deref()
            .map(expense_category)
            .transpose()?
            .map(|c| c.id.to_string());

        let input = BudgetInput {
            category_id,
            amount: self.amount.map(AmountInput::from),
            month: self.month,
            spent: self.spent.map(AmountInput::from),
        };

        if input == BudgetInput::default() {
            bail!("Nothing to change. Pass at least one of --category, --amount, --month, --spent.");
        }
        Ok(input)
    }
}

/// Budgets only cover expense categories
fn expense_category(arg: &str) -> Result<&'static Category> {
    let category = resolve_category(arg)?;
    if category.kind != TransactionType::Expense {
        bail!("'{}' is an income category; budgets track expenses", category.name);
    }
    Ok(category)
}

pub fn cmd_budgets_list(cache: &DataCache) -> Result<()> {
    let budgets = cache.budgets();

    if budgets.is_empty() {
        println!("No budgets yet. Set one with:");
        println!("  tally budgets add food 300");
        return Ok(());
    }

    let current = Month::of(today());

    println!();
    println!("🎯 Budgets");
    println!("   ─────────────────────────────────────────────────────────────");

    for budget in budgets {
        let spent =
            analytics::spent_in_month(cache.transactions(), &budget.category_id, budget.month);
        let progress = analytics::budget_progress(budget, spent);
        let marker = if budget.month == current { "▶" } else { " " };

        println!(
            "   {} {} │ {} {:<16} │ {} ${:.2} / ${:.2}{}",
            marker,
            budget.month,
            categories::icon_of(&budget.category_id),
            categories::name_of(&budget.category_id),
            progress_bar(progress.percentage, 20),
            progress.spent,
            budget.amount,
            if progress.is_over_budget {
                format!(" \x1b[31m(over by ${:.2})\x1b[0m", progress.overspent)
            } else {
                String::new()
            }
        );
        println!("     id: {}", budget.id);
    }

    let open = cache.available_budget_categories(current, None);
    if !open.is_empty() {
        println!();
        println!(
            "   Unbudgeted this month: {}",
            open.iter().map(|c| c.name).collect::<Vec<_>>().join(", ")
        );
    }

    Ok(())
}

pub async fn cmd_budgets_add(
    cache: &mut DataCache,
    category: &str,
    amount: f64,
    month: Option<&str>,
) -> Result<()> {
    let category = expense_category(category)?;
    let month = month
        .map(String::from)
        .unwrap_or_else(|| Month::of(today()).to_string());

    let input = BudgetInput {
        category_id: Some(category.id.to_string()),
        amount: Some(AmountInput::from(amount)),
        month: Some(month),
        spent: None,
    };

    let budget = cache.add_budget(&input).await?;

    println!(
        "✅ Budget set: {} {} ${:.2} for {}",
        category.icon, category.name, budget.amount, budget.month
    );
    println!("   id: {}", budget.id);

    Ok(())
}

pub async fn cmd_budgets_edit(cache: &mut DataCache, id: &str, edit: BudgetEdit) -> Result<()> {
    let input = edit.into_input()?;
    let budget = cache.update_budget(id, &input).await?;

    println!(
        "✅ Updated budget {}: {} ${:.2} for {}",
        budget.id,
        categories::name_of(&budget.category_id),
        budget.amount,
        budget.month
    );

    Ok(())
}

pub async fn cmd_budgets_delete(cache: &mut DataCache, id: &str) -> Result<()> {
    cache.delete_budget(id).await?;
    println!("🗑️  Deleted budget {}", id);
    Ok(())
}
