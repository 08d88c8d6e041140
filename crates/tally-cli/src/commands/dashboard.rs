//! Dashboard command
//!
//! Everything shown here is computed locally from the cached lists.

use anyhow::Result;

use super::{progress_bar, today, truncate};
use crate::cache::DataCache;

pub fn cmd_dashboard(cache: &DataCache) -> Result<()> {
    let dashboard = cache.dashboard(today());
    let summary = &dashboard.summary;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           💰 Tally Dashboard            │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Month:           {}", summary.month);
    println!("  Income:          ${:.2}", summary.income);
    println!("  Expenses:        ${:.2}", summary.expenses);
    println!("  Net:             ${:.2}", summary.net);
    if summary.previous_month_expenses > 0.0 {
        let arrow = if summary.expense_change > 0.0 { "📈" } else { "📉" };
        println!(
            "  {} {:+.1}% vs last month (${:.2})",
            arrow, summary.expense_change, summary.previous_month_expenses
        );
    }

    if !dashboard.budget_status.is_empty() {
        println!();
        println!("  🎯 Budgets");
        for status in &dashboard.budget_status {
            let note = if status.progress.is_over_budget {
                format!("\x1b[31mover by ${:.2}\x1b[0m", status.progress.overspent)
            } else {
                format!("${:.2} left", status.progress.remaining)
            };
            println!(
                "     {} {:<16} {} {:>5.1}% {}",
                status.icon,
                status.category,
                progress_bar(status.progress.percentage, 20),
                status.progress.percentage,
                note
            );
        }
    }

    let insights = &dashboard.insights;
    if !insights.top_categories.is_empty() {
        println!();
        println!("  🔥 Top Spending");
        for top in &insights.top_categories {
            println!("     {} {:<16} ${:.2}", top.icon, top.category, top.amount);
        }
    }
    if let Some(largest) = &insights.largest_expense {
        println!();
        println!(
            "  💸 Largest expense: ${:.2} ({}, {})",
            largest.amount,
            truncate(&largest.description, 30),
            largest.date
        );
    }
    println!(
        "  📅 Average daily spend: ${:.2} ({:.1} transactions per active day)",
        insights.average_daily_spend, insights.average_transactions_per_day
    );

    if !dashboard.monthly_expenses.is_empty() {
        let max = dashboard
            .monthly_expenses
            .iter()
            .map(|m| m.expenses)
            .fold(0.0_f64, f64::max);

        println!();
        println!("  📊 Monthly Expenses");
        for month in &dashboard.monthly_expenses {
            let share = if max > 0.0 { month.expenses / max * 100.0 } else { 0.0 };
            println!(
                "     {} {} ${:.2}",
                month.month,
                progress_bar(share, 20),
                month.expenses
            );
        }
    }

    for (title, breakdown) in [
        ("💸 Expenses by Category", &dashboard.expense_categories),
        ("💰 Income by Category", &dashboard.income_categories),
    ] {
        if breakdown.is_empty() {
            continue;
        }

        println!();
        println!("  {}", title);
        for row in breakdown {
            println!(
                "     {:<16} ${:>10.2} {:>5.1}%",
                row.category, row.amount, row.percentage
            );
        }
    }

    if cache.transactions().is_empty() {
        println!();
        println!("  Nothing recorded yet. Try 'tally transactions add --help'.");
    }

    println!();
    Ok(())
}
