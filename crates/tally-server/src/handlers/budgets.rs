//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{read_json, record_audit};
use crate::{today, AppError, AppState, MessageResponse};
use tally_core::analytics;
use tally_core::input::{parse_month, BudgetInput};
use tally_core::models::{Budget, Category, Month};

/// GET /api/budgets - List budgets, newest first
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Budget>>, AppError> {
    Ok(Json(state.db.list_budgets()?))
}

/// GET /api/budgets/:id - Get a single budget
pub async fn get_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Budget>, AppError> {
    let budget = state
        .db
        .get_budget(&id)?
        .ok_or_else(|| AppError::not_found(&format!("Budget {} not found", id)))?;

    Ok(Json(budget))
}

/// POST /api/budgets - Create a budget
///
/// Rejects a second budget for the same category and month.
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<Budget>), AppError> {
    let input: BudgetInput = read_json(request).await?;
    let new = input.into_new()?;

    let budget = state.db.create_budget(&new)?;

    record_audit(
        &state,
        "create",
        "budget",
        Some(&budget.id),
        Some(&format!(
            "category={}, month={}, amount={}",
            budget.category_id, budget.month, budget.amount
        )),
    );

    Ok((StatusCode::CREATED, Json(budget)))
}

/// PUT /api/budgets/:id - Update any subset of fields
pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<Budget>, AppError> {
    let input: BudgetInput = read_json(request).await?;
    let update = input.into_update()?;

    let budget = state.db.update_budget(&id, &update)?;

    record_audit(
        &state,
        "update",
        "budget",
        Some(&budget.id),
        Some(&format!("{:?}", update)),
    );

    Ok(Json(budget))
}

/// DELETE /api/budgets/:id - Delete a budget
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.db.delete_budget(&id)?;

    record_audit(&state, "delete", "budget", Some(&id), None);

    Ok(Json(MessageResponse {
        message: "Budget deleted successfully".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AvailableCategoriesQuery {
    /// YYYY-MM; defaults to the current month
    pub month: Option<String>,
    /// Budget id to ignore (the one being edited)
    pub exclude: Option<String>,
}

/// GET /api/budgets/available-categories - Expense categories without a budget
pub async fn available_budget_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailableCategoriesQuery>,
) -> Result<Json<Vec<&'static Category>>, AppError> {
    let month = match params.month.as_deref() {
        Some(m) => parse_month(m)?,
        None => Month::of(today()),
    };

    let budgets = state.db.list_budgets()?;

    Ok(Json(analytics::available_budget_categories(
        &budgets,
        month,
        params.exclude.as_deref(),
    )))
}
