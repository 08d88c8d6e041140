//! Transaction operations

use chrono::{NaiveDate, SubsecRound, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{conversion_error, format_timestamp, new_id, parse_timestamp, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionUpdate};

const SELECT_TRANSACTION: &str =
    "SELECT id, amount, date, description, category, type, created_at FROM transactions";

fn row_to_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(2)?;
    let kind_str: String = row.get(5)?;
    let created_at_str: String = row.get(6)?;

    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|_| conversion_error(2, format!("bad transaction date: {}", date_str)))?,
        description: row.get(3)?,
        category: row.get(4)?,
        kind: kind_str.parse().map_err(|e| conversion_error(5, e))?,
        created_at: parse_timestamp(&created_at_str),
    })
}

fn not_found(id: &str) -> Error {
    Error::NotFound(format!("Transaction {} not found", id))
}

impl Database {
    /// List all transactions, newest first by creation time
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY created_at DESC, rowid DESC",
            SELECT_TRANSACTION
        ))?;

        let transactions = stmt
            .query_map([], row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Get a transaction by ID
    pub fn get_transaction(&self, id: &str) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_TRANSACTION),
                params![id],
                row_to_transaction,
            )
            .optional()?;

        Ok(tx)
    }

    /// Insert a transaction, assigning its id and creation time
    pub fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction> {
        let conn = self.conn()?;

        let tx = Transaction {
            id: new_id(),
            amount: new.amount,
            date: new.date,
            description: new.description.clone(),
            category: new.category.clone(),
            kind: new.kind,
            // Stored with microsecond precision
            created_at: Utc::now().trunc_subsecs(6),
        };

        conn.execute(
            r#"
            INSERT INTO transactions (id, amount, date, description, category, type, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                tx.id,
                tx.amount,
                tx.date.to_string(),
                tx.description,
                tx.category,
                tx.kind.as_str(),
                format_timestamp(tx.created_at),
            ],
        )?;

        debug!(id = %tx.id, "Created transaction");
        Ok(tx)
    }

    /// Merge the provided fields into an existing transaction
    pub fn update_transaction(&self, id: &str, update: &TransactionUpdate) -> Result<Transaction> {
        let mut conn = self.conn()?;
        let db_tx = conn.transaction()?;

        let mut tx = db_tx
            .query_row(
                &format!("{} WHERE id = ?", SELECT_TRANSACTION),
                params![id],
                row_to_transaction,
            )
            .optional()?
            .ok_or_else(|| not_found(id))?;

        update.apply_to(&mut tx);

        db_tx.execute(
            r#"
            UPDATE transactions
            SET amount = ?, date = ?, description = ?, category = ?, type = ?
            WHERE id = ?
            "#,
            params![
                tx.amount,
                tx.date.to_string(),
                tx.description,
                tx.category,
                tx.kind.as_str(),
                tx.id,
            ],
        )?;
        db_tx.commit()?;

        debug!(id = %tx.id, "Updated transaction");
        Ok(tx)
    }

    /// Delete a transaction
    pub fn delete_transaction(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;

        if deleted == 0 {
            return Err(not_found(id));
        }

        debug!(id, "Deleted transaction");
        Ok(())
    }
}
