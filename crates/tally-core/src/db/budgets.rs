//! Budget operations

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{conversion_error, format_timestamp, new_id, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, BudgetUpdate, NewBudget};

const SELECT_BUDGET: &str = "SELECT id, category_id, amount, month, spent FROM budgets";

/// Message returned when a budget already covers the category and month
pub const DUPLICATE_BUDGET: &str = "Budget already exists for this category and month";

fn row_to_budget(row: &Row) -> rusqlite::Result<Budget> {
    let month_str: String = row.get(3)?;

    Ok(Budget {
        id: row.get(0)?,
        category_id: row.get(1)?,
        amount: row.get(2)?,
        month: month_str.parse().map_err(|e| conversion_error(3, e))?,
        spent: row.get(4)?,
    })
}

fn not_found(id: &str) -> Error {
    Error::NotFound(format!("Budget {} not found", id))
}

impl Database {
    /// List all budgets, newest first by creation time
    pub fn list_budgets(&self) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY created_at DESC, rowid DESC",
            SELECT_BUDGET
        ))?;

        let budgets = stmt
            .query_map([], row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// Get a budget by ID
    pub fn get_budget(&self, id: &str) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_BUDGET),
                params![id],
                row_to_budget,
            )
            .optional()?;

        Ok(budget)
    }

    /// Insert a budget
    ///
    /// Fails with `Error::Conflict` when a budget for the same category and
    /// month exists. The check and the insert share one SQLite transaction.
    pub fn create_budget(&self, new: &NewBudget) -> Result<Budget> {
        let mut conn = self.conn()?;
        let db_tx = conn.transaction()?;

        let month = new.month.to_string();
        let existing: Option<String> = db_tx
            .query_row(
                "SELECT id FROM budgets WHERE category_id = ? AND month = ?",
                params![new.category_id, month],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(existing_id) = existing {
            debug!(existing = %existing_id, category = %new.category_id, %month, "Duplicate budget rejected");
            return Err(Error::Conflict(DUPLICATE_BUDGET.to_string()));
        }

        let budget = Budget {
            id: new_id(),
            category_id: new.category_id.clone(),
            amount: new.amount,
            month: new.month,
            spent: 0.0,
        };

        db_tx.execute(
            r#"
            INSERT INTO budgets (id, category_id, amount, month, spent, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                budget.id,
                budget.category_id,
                budget.amount,
                month,
                budget.spent,
                format_timestamp(Utc::now()),
            ],
        )?;
        db_tx.commit()?;

        debug!(id = %budget.id, "Created budget");
        Ok(budget)
    }

    /// Merge the provided fields into an existing budget
    ///
    /// The category/month uniqueness rule is not re-checked here.
    pub fn update_budget(&self, id: &str, update: &BudgetUpdate) -> Result<Budget> {
        let mut conn = self.conn()?;
        let db_tx = conn.transaction()?;

        let mut budget = db_tx
            .query_row(
                &format!("{} WHERE id = ?", SELECT_BUDGET),
                params![id],
                row_to_budget,
            )
            .optional()?
            .ok_or_else(|| not_found(id))?;

        update.apply_to(&mut budget);

        db_tx.execute(
            "UPDATE budgets SET category_id = ?, amount = ?, month = ?, spent = ? WHERE id = ?",
            params![
                budget.category_id,
                budget.amount,
                budget.month.to_string(),
                budget.spent,
                budget.id,
            ],
        )?;
        db_tx.commit()?;

        debug!(id = %budget.id, "Updated budget");
        Ok(budget)
    }

    /// Delete a budget
    pub fn delete_budget(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;

        if deleted == 0 {
            return Err(not_found(id));
        }

        debug!(id, "Deleted budget");
        Ok(())
    }
}
