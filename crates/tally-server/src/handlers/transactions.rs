//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{read_json, record_audit};
use crate::{AppError, AppState, MessageResponse};
use tally_core::analytics;
use tally_core::input::TransactionInput;
use tally_core::models::{Transaction, TransactionSort};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    /// Case-insensitive match on description or category name
    pub search: Option<String>,
    /// Sort field (date or amount)
    pub sort: Option<String>,
}

/// GET /api/transactions - List transactions
///
/// Without `search` or `sort` the store order (newest created first) is kept.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = state.db.list_transactions()?;

    if params.search.is_none() && params.sort.is_none() {
        return Ok(Json(transactions));
    }

    let sort: TransactionSort = params
        .sort
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|e: String| AppError::bad_request(&e))?
        .unwrap_or_default();

    Ok(Json(analytics::search_transactions(
        &transactions,
        params.search.as_deref(),
        sort,
    )))
}

/// GET /api/transactions/:id - Get a single transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, AppError> {
    let tx = state
        .db
        .get_transaction(&id)?
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;

    Ok(Json(tx))
}

/// POST /api/transactions - Create a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let input: TransactionInput = read_json(request).await?;
    let new = input.into_new()?;

    let tx = state.db.create_transaction(&new)?;

    record_audit(
        &state,
        "create",
        "transaction",
        Some(&tx.id),
        Some(&format!(
            "amount={}, type={}, category={}, date={}",
            tx.amount, tx.kind, tx.category, tx.date
        )),
    );

    Ok((StatusCode::CREATED, Json(tx)))
}

/// PUT /api/transactions/:id - Update any subset of fields
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<Transaction>, AppError> {
    let input: TransactionInput = read_json(request).await?;
    let update = input.into_update()?;

    let tx = state.db.update_transaction(&id, &update)?;

    record_audit(
        &state,
        "update",
        "transaction",
        Some(&tx.id),
        Some(&format!("{:?}", update)),
    );

    Ok(Json(tx))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.db.delete_transaction(&id)?;

    record_audit(&state, "delete", "transaction", Some(&id), None);

    Ok(Json(MessageResponse {
        message: "Transaction deleted successfully".to_string(),
    }))
}
