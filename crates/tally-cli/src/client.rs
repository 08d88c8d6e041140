//! HTTP client for the Tally API
//!
//! Thin typed wrapper over the `/api` record-store routes. Failed requests
//! surface the server's `{ "error": ... }` message verbatim.

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use tracing::debug;

use tally_core::input::{BudgetInput, TransactionInput};
use tally_core::models::{Budget, Transaction};

/// Default server address for data commands
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:3000";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach Tally server at {}", self.base_url))?;

        let status = response.status();
        debug!(%status, url = %response.url(), "API response");

        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("Request failed with status {}", status),
            };
            return Err(anyhow!(message));
        }

        response
            .json()
            .await
            .context("Unexpected response from Tally server")
    }

    // ========== Transactions ==========

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.send(self.http_client.get(self.url("/transactions")))
            .await
    }

    pub async fn create_transaction(&self, input: &TransactionInput) -> Result<Transaction> {
        self.send(self.http_client.post(self.url("/transactions")).json(input))
            .await
    }

    pub async fn update_transaction(
        &self,
        id: &str,
        input: &TransactionInput,
    ) -> Result<Transaction> {
        let url = self.url(&format!("/transactions/{}", id));
        self.send(self.http_client.put(url).json(input)).await
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("/transactions/{}", id));
        self.send::<IgnoredAny>(self.http_client.delete(url))
            .await
            .map(|_| ())
    }

    // ========== Budgets ==========

    pub async fn list_budgets(&self) -> Result<Vec<Budget>> {
        self.send(self.http_client.get(self.url("/budgets"))).await
    }

    pub async fn create_budget(&self, input: &BudgetInput) -> Result<Budget> {
        self.send(self.http_client.post(self.url("/budgets")).json(input))
            .await
    }

    pub async fn update_budget(&self, id: &str, input: &BudgetInput) -> Result<Budget> {
        let url = self.url(&format!("/budgets/{}", id));
        self.send(self.http_client.put(url).json(input)).await
    }

    pub async fn delete_budget(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("/budgets/{}", id));
        self.send::<IgnoredAny>(self.http_client.delete(url))
            .await
            .map(|_| ())
    }
}
