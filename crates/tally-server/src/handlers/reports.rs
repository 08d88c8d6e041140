//! Report handlers
//!
//! Every report reloads the full record lists and recomputes from scratch;
//! the current month is the UTC month of the request.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{today, AppError, AppState};
use tally_core::analytics;
use tally_core::models::{
    Budget, BudgetComparison, BudgetStatus, CategorySpending, Dashboard, MonthlyData,
    MonthlyExpense, SpendingInsights, Summary, Transaction, TransactionType,
};

/// Largest accepted `months` window
const MAX_MONTHS: usize = 120;

fn load(state: &AppState) -> Result<(Vec<Transaction>, Vec<Budget>), AppError> {
    Ok((state.db.list_transactions()?, state.db.list_budgets()?))
}

/// GET /api/dashboard - Every derived view in one response
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, AppError> {
    let (transactions, budgets) = load(&state)?;
    Ok(Json(analytics::dashboard(&transactions, &budgets, today())))
}

/// GET /api/reports/summary - Current month totals
pub async fn report_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Summary>, AppError> {
    let transactions = state.db.list_transactions()?;
    Ok(Json(analytics::summary(&transactions, today())))
}

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    pub months: Option<usize>,
}

/// GET /api/reports/monthly - Expense totals for recent months
pub async fn report_monthly(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthlyQuery>,
) -> Result<Json<Vec<MonthlyExpense>>, AppError> {
    let months = params
        .months
        .unwrap_or(analytics::MONTHLY_SERIES_LEN)
        .clamp(1, MAX_MONTHS);

    let transactions = state.db.list_transactions()?;
    Ok(Json(analytics::monthly_expenses(&transactions, months)))
}

/// GET /api/reports/monthly-totals - Income, expenses and net per month
pub async fn report_monthly_totals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MonthlyData>>, AppError> {
    let transactions = state.db.list_transactions()?;
    Ok(Json(analytics::monthly_totals(&transactions)))
}

#[derive(Debug, Deserialize)]
pub struct CategoryReportQuery {
    /// income or expense (default expense)
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /api/reports/categories - Top categories for a transaction type
pub async fn report_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryReportQuery>,
) -> Result<Json<Vec<CategorySpending>>, AppError> {
    let kind = match params.kind.as_deref() {
        Some(k) => k
            .parse::<TransactionType>()
            .map_err(|e| AppError::bad_request(&e))?,
        None => TransactionType::Expense,
    };

    let transactions = state.db.list_transactions()?;
    Ok(Json(analytics::category_breakdown(&transactions, kind)))
}

/// GET /api/reports/budgets - Budget vs actual for the current month
pub async fn report_budgets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BudgetComparison>>, AppError> {
    let (transactions, budgets) = load(&state)?;
    Ok(Json(analytics::budget_vs_actual(
        &transactions,
        &budgets,
        today(),
    )))
}

/// GET /api/reports/budget-status - Current-month budgets with progress
pub async fn report_budget_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BudgetStatus>>, AppError> {
    let (transactions, budgets) = load(&state)?;
    Ok(Json(analytics::budget_status(&transactions, &budgets, today())))
}

/// GET /api/reports/insights - Current-month spending insights
pub async fn report_insights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SpendingInsights>, AppError> {
    let transactions = state.db.list_transactions()?;
    Ok(Json(analytics::spending_insights(&transactions, today())))
}
