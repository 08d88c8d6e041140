//! Derived views over in-memory transactions and budgets
//!
//! Every function is a pure transform of its inputs. Callers load the full
//! transaction and budget lists, pass the evaluation date explicitly, and
//! recompute on every change; nothing here is cached or incremental.
//!
//! A transaction belongs to the month of its `date`, never of its creation
//! time.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use chrono::{Datelike, NaiveDate};

use crate::categories;
use crate::models::{
    Budget, BudgetComparison, BudgetProgress, BudgetStatus, Category, CategorySpending,
    Dashboard, Month, MonthlyData, MonthlyExpense, SpendingInsights, Summary, TopCategory,
    Transaction, TransactionSort, TransactionType,
};

/// Months shown in the expense series
pub const MONTHLY_SERIES_LEN: usize = 6;

/// Categories kept in a breakdown
pub const CATEGORY_BREAKDOWN_LEN: usize = 8;

/// Categories listed in spending insights
pub const TOP_CATEGORIES_LEN: usize = 3;

fn expenses(transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense)
}

fn expenses_in(transactions: &[Transaction], month: Month) -> impl Iterator<Item = &Transaction> {
    expenses(transactions).filter(move |t| month.contains(t.date))
}

/// Sum amounts per key, keeping groups in first-encounter order
fn sum_by_key<K: Eq + Hash + Clone>(items: impl Iterator<Item = (K, f64)>) -> Vec<(K, f64)> {
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, f64)> = Vec::new();

    for (key, amount) in items {
        match index.get(&key) {
            Some(&i) => groups[i].1 += amount,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, amount));
            }
        }
    }

    groups
}

/// Descending by amount; stable, so ties keep encounter order
fn sort_descending<K>(groups: &mut [(K, f64)]) {
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
}

// ============================================================================
// Monthly rollups
// ============================================================================

/// Expense totals for the most recent `months` months that have expenses
///
/// Chronological. Months without expense transactions are absent rather
/// than zero-filled.
pub fn monthly_expenses(transactions: &[Transaction], months: usize) -> Vec<MonthlyExpense> {
    let mut by_month: BTreeMap<Month, f64> = BTreeMap::new();
    for t in expenses(transactions) {
        *by_month.entry(Month::of(t.date)).or_insert(0.0) += t.amount;
    }

    let skip = by_month.len().saturating_sub(months);
    by_month
        .into_iter()
        .skip(skip)
        .map(|(month, expenses)| MonthlyExpense { month, expenses })
        .collect()
}

/// Income, expenses and net for every month with at least one transaction
pub fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyData> {
    let mut by_month: BTreeMap<Month, (f64, f64)> = BTreeMap::new();
    for t in transactions {
        let entry = by_month.entry(Month::of(t.date)).or_insert((0.0, 0.0));
        match t.kind {
            TransactionType::Income => entry.0 += t.amount,
            TransactionType::Expense => entry.1 += t.amount,
        }
    }

    by_month
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyData {
            month,
            expenses,
            income,
            net: income - expenses,
        })
        .collect()
}

// ============================================================================
// Category breakdown
// ============================================================================

/// Every category of one transaction type with its total, largest first
///
/// Percentages are shares of the type's overall total.
pub fn category_totals(transactions: &[Transaction], kind: TransactionType) -> Vec<CategorySpending> {
    let mut groups = sum_by_key(
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| (t.category.as_str(), t.amount)),
    );
    sort_descending(&mut groups);

    let total: f64 = groups.iter().map(|(_, amount)| amount).sum();

    groups
        .into_iter()
        .map(|(category_id, amount)| CategorySpending {
            category_id: category_id.to_string(),
            category: categories::name_of(category_id).to_string(),
            amount,
            color: categories::color_of(category_id).to_string(),
            percentage: if total > 0.0 {
                amount / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// The top categories of one transaction type
pub fn category_breakdown(
    transactions: &[Transaction],
    kind: TransactionType,
) -> Vec<CategorySpending> {
    let mut totals = category_totals(transactions, kind);
    totals.truncate(CATEGORY_BREAKDOWN_LEN);
    totals
}

// ============================================================================
// Budgets
// ============================================================================

/// Expense total for one category within one month
pub fn spent_in_month(transactions: &[Transaction], category_id: &str, month: Month) -> f64 {
    expenses_in(transactions, month)
        .filter(|t| t.category == category_id)
        .map(|t| t.amount)
        .sum()
}

/// Progress of `spent` against a budget's ceiling
pub fn budget_progress(budget: &Budget, spent: f64) -> BudgetProgress {
    let percentage = if budget.amount > 0.0 {
        (spent / budget.amount * 100.0).min(100.0)
    } else {
        0.0
    };

    BudgetProgress {
        spent,
        percentage,
        remaining: (budget.amount - spent).max(0.0),
        overspent: (spent - budget.amount).max(0.0),
        is_over_budget: spent > budget.amount,
    }
}

/// Budget ceilings against live spending for the month containing `today`
///
/// Budgets for other months are skipped; the rest keep their input order.
pub fn budget_vs_actual(
    transactions: &[Transaction],
    budgets: &[Budget],
    today: NaiveDate,
) -> Vec<BudgetComparison> {
    let current = Month::of(today);

    budgets
        .iter()
        .filter(|b| b.month == current)
        .map(|b| {
            let spent = spent_in_month(transactions, &b.category_id, current);
            BudgetComparison {
                budget_id: b.id.clone(),
                category_id: b.category_id.clone(),
                category: categories::name_of(&b.category_id).to_string(),
                budget: b.amount,
                spent,
                remaining: (b.amount - spent).max(0.0),
            }
        })
        .collect()
}

/// Current-month budgets with category display and progress
pub fn budget_status(
    transactions: &[Transaction],
    budgets: &[Budget],
    today: NaiveDate,
) -> Vec<BudgetStatus> {
    let current = Month::of(today);

    budgets
        .iter()
        .filter(|b| b.month == current)
        .map(|b| {
            let spent = spent_in_month(transactions, &b.category_id, b.month);
            BudgetStatus {
                budget: b.clone(),
                category: categories::name_of(&b.category_id).to_string(),
                color: categories::color_of(&b.category_id).to_string(),
                icon: categories::icon_of(&b.category_id).to_string(),
                progress: budget_progress(b, spent),
            }
        })
        .collect()
}

/// Expense categories still free to budget for `month`
///
/// `exclude` names a budget to ignore, so the category of the budget being
/// edited stays selectable.
pub fn available_budget_categories(
    budgets: &[Budget],
    month: Month,
    exclude: Option<&str>,
) -> Vec<&'static Category> {
    categories::by_type(TransactionType::Expense)
        .filter(|c| {
            !budgets.iter().any(|b| {
                b.category_id == c.id && b.month == month && Some(b.id.as_str()) != exclude
            })
        })
        .collect()
}

// ============================================================================
// Summary and insights
// ============================================================================

/// Income, expenses and net for the month containing `today`
pub fn summary(transactions: &[Transaction], today: NaiveDate) -> Summary {
    let current = Month::of(today);

    let mut income = 0.0;
    let mut expenses = 0.0;
    for t in transactions.iter().filter(|t| current.contains(t.date)) {
        match t.kind {
            TransactionType::Income => income += t.amount,
            TransactionType::Expense => expenses += t.amount,
        }
    }

    let previous_month_expenses: f64 = expenses_in(transactions, current.previous())
        .map(|t| t.amount)
        .sum();

    Summary {
        month: current,
        income,
        expenses,
        net: income - expenses,
        previous_month_expenses,
        expense_change: expense_change(expenses, previous_month_expenses),
    }
}

/// Percent change from `previous` to `current`; 0 when `previous` is 0
pub fn expense_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

pub fn spending_insights(transactions: &[Transaction], today: NaiveDate) -> SpendingInsights {
    let current: Vec<&Transaction> = expenses_in(transactions, Month::of(today)).collect();

    let mut groups = sum_by_key(current.iter().map(|t| (t.category.as_str(), t.amount)));
    sort_descending(&mut groups);
    let top_categories = groups
        .into_iter()
        .take(TOP_CATEGORIES_LEN)
        .map(|(category_id, amount)| TopCategory {
            category_id: category_id.to_string(),
            category: categories::name_of(category_id).to_string(),
            color: categories::color_of(category_id).to_string(),
            icon: categories::icon_of(category_id).to_string(),
            amount,
        })
        .collect();

    // Strict comparison keeps the first of equal amounts
    let largest_expense = current
        .iter()
        .fold(None::<&Transaction>, |max, t| match max {
            Some(m) if t.amount <= m.amount => Some(m),
            _ => Some(t),
        })
        .cloned();

    let total: f64 = current.iter().map(|t| t.amount).sum();
    let average_daily_spend = total / f64::from(today.day());

    let active_days: HashSet<NaiveDate> = current.iter().map(|t| t.date).collect();
    let average_transactions_per_day = if active_days.is_empty() {
        0.0
    } else {
        current.len() as f64 / active_days.len() as f64
    };

    SpendingInsights {
        top_categories,
        largest_expense,
        average_daily_spend,
        average_transactions_per_day,
    }
}

/// Every derived view at once
pub fn dashboard(transactions: &[Transaction], budgets: &[Budget], today: NaiveDate) -> Dashboard {
    Dashboard {
        summary: summary(transactions, today),
        monthly_expenses: monthly_expenses(transactions, MONTHLY_SERIES_LEN),
        expense_categories: category_breakdown(transactions, TransactionType::Expense),
        income_categories: category_breakdown(transactions, TransactionType::Income),
        budget_comparison: budget_vs_actual(transactions, budgets, today),
        budget_status: budget_status(transactions, budgets, today),
        insights: spending_insights(transactions, today),
    }
}

// ============================================================================
// Listing
// ============================================================================

/// Filter by a case-insensitive term and order for display
///
/// The term matches the description or the resolved category name. Both
/// orderings are stable.
pub fn search_transactions(
    transactions: &[Transaction],
    term: Option<&str>,
    sort: TransactionSort,
) -> Vec<Transaction> {
    let needle = term
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty());

    let mut matches: Vec<Transaction> = transactions
        .iter()
        .filter(|t| match &needle {
            Some(n) => {
                t.description.to_lowercase().contains(n.as_str())
                    || categories::find(&t.category)
                        .is_some_and(|c| c.name.to_lowercase().contains(n.as_str()))
            }
            None => true,
        })
        .cloned()
        .collect();

    match sort {
        TransactionSort::Date => matches.sort_by(|a, b| b.date.cmp(&a.date)),
        TransactionSort::Amount => matches.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> Month {
        Month::new(y, m).unwrap()
    }

    fn tx(id: &str, kind: TransactionType, amount: f64, on: NaiveDate, category: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            date: on,
            description: format!("tx {}", id),
            category: category.to_string(),
            kind,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn expense(id: &str, amount: f64, on: NaiveDate, category: &str) -> Transaction {
        tx(id, TransactionType::Expense, amount, on, category)
    }

    fn income(id: &str, amount: f64, on: NaiveDate, category: &str) -> Transaction {
        tx(id, TransactionType::Income, amount, on, category)
    }

    fn budget(id: &str, category: &str, amount: f64, m: Month) -> Budget {
        Budget {
            id: id.to_string(),
            category_id: category.to_string(),
            amount,
            month: m,
            spent: 0.0,
        }
    }

    /// Two January expenses in Food, one January salary
    fn january_scenario() -> Vec<Transaction> {
        vec![
            expense("a", 50.0, date(2024, 1, 5), "1"),
            expense("b", 30.0, date(2024, 1, 20), "1"),
            income("c", 1000.0, date(2024, 1, 1), "10"),
        ]
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ========== Monthly series ==========

    #[test]
    fn test_monthly_expenses_groups_by_transaction_date() {
        let txs = vec![
            expense("1", 10.0, date(2024, 2, 1), "1"),
            expense("2", 5.0, date(2024, 1, 31), "1"),
            expense("3", 7.0, date(2024, 2, 28), "2"),
            income("4", 100.0, date(2024, 2, 1), "10"),
        ];

        let series = monthly_expenses(&txs, MONTHLY_SERIES_LEN);
        assert_eq!(
            series,
            vec![
                MonthlyExpense {
                    month: month(2024, 1),
                    expenses: 5.0
                },
                MonthlyExpense {
                    month: month(2024, 2),
                    expenses: 17.0
                },
            ]
        );
    }

    #[test]
    fn test_monthly_expenses_keeps_most_recent_and_skips_empty_months() {
        let txs: Vec<_> = [(2023, 1), (2023, 3), (2023, 4), (2023, 7), (2023, 9), (2023, 11), (2024, 1), (2024, 2)]
            .iter()
            .enumerate()
            .map(|(i, (y, m))| expense(&i.to_string(), 1.0, date(*y, *m, 10), "1"))
            .collect();

        let months: Vec<String> = monthly_expenses(&txs, 6)
            .into_iter()
            .map(|m| m.month.to_string())
            .collect();
        assert_eq!(
            months,
            vec!["2023-04", "2023-07", "2023-09", "2023-11", "2024-01", "2024-02"]
        );
    }

    #[test]
    fn test_monthly_expenses_conserves_total_when_untruncated() {
        let txs = vec![
            expense("1", 12.25, date(2023, 12, 3), "1"),
            expense("2", 40.0, date(2024, 1, 9), "3"),
            expense("3", 7.75, date(2024, 1, 30), "9"),
            income("4", 500.0, date(2024, 1, 15), "10"),
            expense("5", 3.0, date(2024, 3, 2), "2"),
        ];

        let series_total: f64 = monthly_expenses(&txs, usize::MAX)
            .iter()
            .map(|m| m.expenses)
            .sum();
        let expense_total: f64 = expenses(&txs).map(|t| t.amount).sum();
        assert!(approx(series_total, expense_total));
    }

    #[test]
    fn test_monthly_totals() {
        let totals = monthly_totals(&january_scenario());
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].month, month(2024, 1));
        assert_eq!(totals[0].income, 1000.0);
        assert_eq!(totals[0].expenses, 80.0);
        assert_eq!(totals[0].net, 920.0);
    }

    // ========== Category breakdown ==========

    #[test]
    fn test_category_breakdown_sorted_with_fallback() {
        let txs = vec![
            expense("1", 20.0, date(2024, 1, 1), "1"),
            expense("2", 50.0, date(2024, 1, 2), "ghost"),
            expense("3", 30.0, date(2024, 1, 3), "1"),
            income("4", 999.0, date(2024, 1, 4), "10"),
        ];

        let breakdown = category_breakdown(&txs, TransactionType::Expense);
        assert_eq!(breakdown.len(), 2);

        // Tie at 50: "1" was encountered first
        assert_eq!(breakdown[0].category_id, "1");
        assert_eq!(breakdown[0].category, "Food & Dining");
        assert_eq!(breakdown[0].color, "#FF6B6B");
        assert_eq!(breakdown[0].amount, 50.0);
        assert_eq!(breakdown[0].percentage, 50.0);

        assert_eq!(breakdown[1].category, categories::FALLBACK_NAME);
        assert_eq!(breakdown[1].color, categories::FALLBACK_COLOR);
    }

    #[test]
    fn test_category_totals_sum_to_type_total() {
        let txs: Vec<_> = (0..12)
            .map(|i| expense(&i.to_string(), 1.5 * (i + 1) as f64, date(2024, 1, 1), &((i % 10) + 1).to_string()))
            .chain(std::iter::once(income("x", 70.0, date(2024, 1, 1), "11")))
            .collect();

        let totals = category_totals(&txs, TransactionType::Expense);
        let amount_sum: f64 = totals.iter().map(|c| c.amount).sum();
        let percentage_sum: f64 = totals.iter().map(|c| c.percentage).sum();
        let expense_total: f64 = expenses(&txs).map(|t| t.amount).sum();

        assert_eq!(totals.len(), 10);
        assert!(approx(amount_sum, expense_total));
        assert!(approx(percentage_sum, 100.0));
    }

    #[test]
    fn test_category_breakdown_truncates_to_top_eight() {
        let txs: Vec<_> = (1..=10)
            .map(|i| expense(&i.to_string(), i as f64, date(2024, 1, 1), &format!("c{}", i)))
            .collect();

        let breakdown = category_breakdown(&txs, TransactionType::Expense);
        assert_eq!(breakdown.len(), CATEGORY_BREAKDOWN_LEN);
        assert_eq!(breakdown[0].amount, 10.0);
        assert_eq!(breakdown[7].amount, 3.0);
    }

    #[test]
    fn test_category_breakdown_empty() {
        assert!(category_breakdown(&[], TransactionType::Income).is_empty());
    }

    // ========== Budgets ==========

    #[test]
    fn test_budget_vs_actual_within_budget() {
        let budgets = vec![budget("b1", "1", 100.0, month(2024, 1))];
        let today = date(2024, 1, 25);

        let comparison = budget_vs_actual(&january_scenario(), &budgets, today);
        assert_eq!(comparison.len(), 1);
        assert_eq!(comparison[0].category, "Food & Dining");
        assert_eq!(comparison[0].budget, 100.0);
        assert_eq!(comparison[0].spent, 80.0);
        assert_eq!(comparison[0].remaining, 20.0);

        let progress = budget_progress(&budgets[0], comparison[0].spent);
        assert!(!progress.is_over_budget);
        assert_eq!(progress.remaining, 20.0);
        assert_eq!(progress.percentage, 80.0);
        assert_eq!(progress.overspent, 0.0);
    }

    #[test]
    fn test_budget_vs_actual_over_budget() {
        let budgets = vec![budget("b1", "1", 50.0, month(2024, 1))];
        let today = date(2024, 1, 25);

        let comparison = budget_vs_actual(&january_scenario(), &budgets, today);
        assert_eq!(comparison[0].spent, 80.0);
        assert_eq!(comparison[0].remaining, 0.0);

        let progress = budget_progress(&budgets[0], comparison[0].spent);
        assert!(progress.is_over_budget);
        assert_eq!(progress.remaining, 0.0);
        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.overspent, 30.0);
    }

    #[test]
    fn test_budget_vs_actual_only_current_month_in_order() {
        let budgets = vec![
            budget("b1", "2", 10.0, month(2024, 1)),
            budget("b2", "1", 100.0, month(2023, 12)),
            budget("b3", "ghost", 10.0, month(2024, 1)),
            budget("b4", "1", 100.0, month(2024, 1)),
        ];

        let comparison = budget_vs_actual(&january_scenario(), &budgets, date(2024, 1, 3));
        let ids: Vec<_> = comparison.iter().map(|c| c.budget_id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b3", "b4"]);
        assert_eq!(comparison[1].category, categories::FALLBACK_NAME);
        assert_eq!(comparison[0].spent, 0.0);
    }

    #[test]
    fn test_budget_vs_actual_ignores_stored_spent() {
        let mut b = budget("b1", "1", 100.0, month(2024, 1));
        b.spent = 9999.0;

        let comparison = budget_vs_actual(&january_scenario(), &[b], date(2024, 1, 31));
        assert_eq!(comparison[0].spent, 80.0);
    }

    #[test]
    fn test_budget_progress_zero_amount() {
        let b = budget("b1", "1", 0.0, month(2024, 1));
        for spent in [0.0, 1.0, 500.0] {
            assert_eq!(budget_progress(&b, spent).percentage, 0.0);
        }
        assert!(budget_progress(&b, 1.0).is_over_budget);
        assert!(!budget_progress(&b, 0.0).is_over_budget);
    }

    #[test]
    fn test_budget_status_for_current_month() {
        let budgets = vec![
            budget("b1", "1", 100.0, month(2024, 1)),
            budget("b2", "1", 100.0, month(2024, 2)),
        ];

        let status = budget_status(&january_scenario(), &budgets, date(2024, 1, 10));
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].budget.id, "b1");
        assert_eq!(status[0].icon, "🍕");
        assert_eq!(status[0].progress.spent, 80.0);
    }

    #[test]
    fn test_available_budget_categories() {
        let budgets = vec![
            budget("b1", "1", 100.0, month(2024, 1)),
            budget("b2", "2", 100.0, month(2024, 2)),
        ];

        let ids = |cats: Vec<&Category>| cats.iter().map(|c| c.id).collect::<Vec<_>>();

        let january = ids(available_budget_categories(&budgets, month(2024, 1), None));
        assert!(!january.contains(&"1"));
        assert!(january.contains(&"2"));
        assert_eq!(january.len(), 8);
        assert!(!january.contains(&"10"), "income categories are never budgeted");

        let editing = ids(available_budget_categories(&budgets, month(2024, 1), Some("b1")));
        assert!(editing.contains(&"1"));
    }

    // ========== Summary ==========

    #[test]
    fn test_summary_scenario() {
        let s = summary(&january_scenario(), date(2024, 1, 31));
        assert_eq!(s.month, month(2024, 1));
        assert_eq!(s.income, 1000.0);
        assert_eq!(s.expenses, 80.0);
        assert_eq!(s.net, 920.0);
        assert_eq!(s.previous_month_expenses, 0.0);
        assert_eq!(s.expense_change, 0.0);
    }

    #[test]
    fn test_summary_month_over_month_change() {
        let mut txs = january_scenario();
        txs.push(expense("d", 40.0, date(2023, 12, 15), "1"));

        let s = summary(&txs, date(2024, 1, 31));
        assert_eq!(s.previous_month_expenses, 40.0);
        assert!(approx(s.expense_change, 100.0));
    }

    #[test]
    fn test_summary_previous_month_crosses_year() {
        let txs = vec![expense("a", 10.0, date(2023, 12, 31), "1")];
        let s = summary(&txs, date(2024, 1, 1));
        assert_eq!(s.expenses, 0.0);
        assert_eq!(s.previous_month_expenses, 10.0);
        assert!(approx(s.expense_change, -100.0));
    }

    #[test]
    fn test_expense_change_zero_previous() {
        for current in [0.0, 1.0, 12345.0] {
            assert_eq!(expense_change(current, 0.0), 0.0);
        }
        assert!(approx(expense_change(50.0, 100.0), -50.0));
    }

    // ========== Insights ==========

    #[test]
    fn test_spending_insights() {
        let txs = vec![
            expense("a", 10.0, date(2024, 1, 2), "2"),
            expense("b", 30.0, date(2024, 1, 2), "1"),
            expense("c", 30.0, date(2024, 1, 5), "3"),
            expense("d", 5.0, date(2024, 1, 5), "4"),
            expense("e", 5.0, date(2024, 1, 9), "4"),
            expense("old", 1000.0, date(2023, 12, 30), "5"),
            income("f", 2000.0, date(2024, 1, 1), "10"),
        ];

        let insights = spending_insights(&txs, date(2024, 1, 10));

        let top: Vec<_> = insights
            .top_categories
            .iter()
            .map(|c| (c.category_id.as_str(), c.amount))
            .collect();
        // "1" and "3" tie at 30; "1" was seen first
        assert_eq!(top, vec![("1", 30.0), ("3", 30.0), ("2", 10.0)]);

        // Ties on the largest amount keep the first encountered
        assert_eq!(insights.largest_expense.as_ref().unwrap().id, "b");

        assert!(approx(insights.average_daily_spend, 8.0));
        // 5 expenses across 3 distinct days
        assert!(approx(insights.average_transactions_per_day, 5.0 / 3.0));
    }

    #[test]
    fn test_spending_insights_without_expenses() {
        let txs = vec![income("a", 100.0, date(2024, 1, 1), "10")];
        let insights = spending_insights(&txs, date(2024, 1, 15));

        assert!(insights.top_categories.is_empty());
        assert!(insights.largest_expense.is_none());
        assert_eq!(insights.average_daily_spend, 0.0);
        assert_eq!(insights.average_transactions_per_day, 0.0);
    }

    #[test]
    fn test_dashboard_uses_same_inputs() {
        let budgets = vec![budget("b1", "1", 100.0, month(2024, 1))];
        let d = dashboard(&january_scenario(), &budgets, date(2024, 1, 20));

        assert_eq!(d.summary.net, 920.0);
        assert_eq!(d.monthly_expenses.len(), 1);
        assert_eq!(d.expense_categories[0].amount, 80.0);
        assert_eq!(d.income_categories[0].category, "Salary");
        assert_eq!(d.budget_comparison[0].remaining, 20.0);
        assert_eq!(d.budget_status[0].progress.percentage, 80.0);
        assert_eq!(d.insights.top_categories.len(), 1);
    }

    // ========== Search ==========

    #[test]
    fn test_search_matches_description_or_category_name() {
        let mut coffee = expense("a", 4.0, date(2024, 1, 3), "1");
        coffee.description = "Morning COFFEE".to_string();
        let mut bus = expense("b", 2.5, date(2024, 1, 4), "2");
        bus.description = "Bus ticket".to_string();
        let txs = vec![coffee, bus];

        let found = search_transactions(&txs, Some("coffee"), TransactionSort::Date);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");

        let found = search_transactions(&txs, Some("transport"), TransactionSort::Date);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "b");

        assert_eq!(search_transactions(&txs, Some("  "), TransactionSort::Date).len(), 2);
    }

    #[test]
    fn test_search_sort_orders() {
        let txs = vec![
            expense("a", 5.0, date(2024, 1, 1), "1"),
            expense("b", 50.0, date(2024, 1, 3), "1"),
            expense("c", 20.0, date(2024, 1, 2), "1"),
        ];

        let by_date: Vec<_> = search_transactions(&txs, None, TransactionSort::Date)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(by_date, vec!["b", "c", "a"]);

        let by_amount: Vec<_> = search_transactions(&txs, None, TransactionSort::Amount)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(by_amount, vec!["b", "c", "a"]);
    }
}
