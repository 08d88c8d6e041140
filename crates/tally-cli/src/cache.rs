//! Client-side data cache
//!
//! `DataCache` owns the client's copy of both record lists together with the
//! loading flag and the last error message. Every mutation is one API round
//! trip followed by a full re-fetch of the collection it touched; derived
//! views are recomputed from the cached lists on demand.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, warn};

use tally_core::analytics;
use tally_core::input::{BudgetInput, TransactionInput};
use tally_core::models::{Budget, Category, Dashboard, Month, Transaction, TransactionSort};

use crate::client::ApiClient;

pub struct DataCache {
    client: ApiClient,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    is_loading: bool,
    last_error: Option<String>,
}

impl DataCache {
    /// An empty cache; call `refresh()` to load
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            transactions: Vec::new(),
            budgets: Vec::new(),
            is_loading: false,
            last_error: None,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    #[allow(dead_code)]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Store the outcome's error message, or clear it on success
    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => {
                warn!(error = %e, "API request failed");
                self.last_error = Some(e.to_string());
            }
        }
        result
    }

    /// Load both collections
    ///
    /// No retry; on failure the previous lists are kept and the error is
    /// recorded until the next successful call.
    pub async fn refresh(&mut self) -> Result<()> {
        self.is_loading = true;
        let loaded = tokio::try_join!(self.client.list_transactions(), self.client.list_budgets());
        self.is_loading = false;

        let (transactions, budgets) = self.record(loaded)?;
        debug!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            "Cache refreshed"
        );
        self.transactions = transactions;
        self.budgets = budgets;
        Ok(())
    }

    async fn reload_transactions(&mut self) -> Result<()> {
        let loaded = self.client.list_transactions().await;
        self.transactions = self.record(loaded)?;
        Ok(())
    }

    async fn reload_budgets(&mut self) -> Result<()> {
        let loaded = self.client.list_budgets().await;
        self.budgets = self.record(loaded)?;
        Ok(())
    }

    // ========== Mutations ==========

    pub async fn add_transaction(&mut self, input: &TransactionInput) -> Result<Transaction> {
        let result = self.client.create_transaction(input).await;
        let tx = self.record(result)?;
        self.reload_transactions().await?;
        Ok(tx)
    }

    pub async fn update_transaction(
        &mut self,
        id: &str,
        input: &TransactionInput,
    ) -> Result<Transaction> {
        let result = self.client.update_transaction(id, input).await;
        let tx = self.record(result)?;
        self.reload_transactions().await?;
        Ok(tx)
    }

    pub async fn delete_transaction(&mut self, id: &str) -> Result<()> {
        let result = self.client.delete_transaction(id).await;
        self.record(result)?;
        self.reload_transactions().await
    }

    pub async fn add_budget(&mut self, input: &BudgetInput) -> Result<Budget> {
        let result = self.client.create_budget(input).await;
        let budget = self.record(result)?;
        self.reload_budgets().await?;
        Ok(budget)
    }

    pub async fn update_budget(&mut self, id: &str, input: &BudgetInput) -> Result<Budget> {
        let result = self.client.update_budget(id, input).await;
        let budget = self.record(result)?;
        self.reload_budgets().await?;
        Ok(budget)
    }

    pub async fn delete_budget(&mut self, id: &str) -> Result<()> {
        let result = self.client.delete_budget(id).await;
        self.record(result)?;
        self.reload_budgets().await
    }

    // ========== Derived views ==========

    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        analytics::dashboard(&self.transactions, &self.budgets, today)
    }

    pub fn available_budget_categories(
        &self,
        month: Month,
        exclude: Option<&str>,
    ) -> Vec<&'static Category> {
        analytics::available_budget_categories(&self.budgets, month, exclude)
    }

    pub fn search(&self, term: Option<&str>, sort: TransactionSort) -> Vec<Transaction> {
        analytics::search_transactions(&self.transactions, term, sort)
    }
}
