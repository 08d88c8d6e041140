//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod audit;
pub mod budgets;
pub mod categories;
pub mod reports;
pub mod transactions;

// Re-export all handlers for use in router
pub use audit::*;
pub use budgets::*;
pub use categories::*;
pub use reports::*;
pub use transactions::*;

use std::error::Error as _;

use axum::extract::Request;
use http_body_util::LengthLimitError;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::{AppError, AppState, MAX_BODY_SIZE};

/// Read and strictly parse a JSON request body
///
/// Malformed JSON, wrong field types and unknown fields all become a 400
/// before anything touches the database.
pub(crate) async fn read_json<T: DeserializeOwned>(request: Request) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|e| {
            if e.source().is_some_and(|s| s.is::<LengthLimitError>()) {
                AppError::payload_too_large(&format!(
                    "Request body exceeds the {} KB limit",
                    MAX_BODY_SIZE / 1024
                ))
            } else {
                AppError::bad_request("Invalid request body")
            }
        })?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))
}

/// Append an audit entry for a mutation that has already been stored
///
/// A failed audit write is logged and never fails the request.
pub(crate) fn record_audit(
    state: &AppState,
    action: &str,
    entity_type: &str,
    entity_id: Option<&str>,
    details: Option<&str>,
) {
    if let Err(e) = state
        .db
        .log_audit(action, entity_type, entity_id, details)
    {
        warn!(
            error = %e,
            action,
            entity_type,
            entity_id,
            "Failed to write audit entry"
        );
    }
}
