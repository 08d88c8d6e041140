//! Category handlers

use axum::{extract::Query, Json};
use serde::Deserialize;

use crate::AppError;
use tally_core::categories;
use tally_core::models::{Category, TransactionType};

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /api/categories - The fixed category set, optionally by type
pub async fn list_categories(
    Query(params): Query<CategoryQuery>,
) -> Result<Json<Vec<&'static Category>>, AppError> {
    let list = match params.kind.as_deref() {
        Some(kind) => {
            let kind: TransactionType = kind
                .parse()
                .map_err(|e: String| AppError::bad_request(&e))?;
            categories::by_type(kind).collect()
        }
        None => categories::all().iter().collect(),
    };

    Ok(Json(list))
}
