//! Request payload schemas
//!
//! Bodies are parsed into these structs before anything reaches the record
//! stores. Unknown fields fail deserialization; every field is optional at
//! the serde level so that missing values on create produce one consistent
//! message, and so the same struct can carry a partial update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{
    BudgetUpdate, Month, NewBudget, NewTransaction, TransactionType, TransactionUpdate,
};

pub const MISSING_FIELDS: &str = "Missing required fields";

/// A numeric field that may arrive as a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    fn to_f64(&self, field: &str) -> Result<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::Validation(format!("{} must be a number", field)))?,
        };
        if !value.is_finite() {
            return Err(Error::Validation(format!("{} must be a number", field)));
        }
        Ok(value)
    }

    /// Coerce to a strictly positive amount
    pub fn positive(&self, field: &str) -> Result<f64> {
        let value = self.to_f64(field)?;
        if value <= 0.0 {
            return Err(Error::Validation(format!("{} must be greater than 0", field)));
        }
        Ok(value)
    }

    pub fn non_negative(&self, field: &str) -> Result<f64> {
        let value = self.to_f64(field)?;
        if value < 0.0 {
            return Err(Error::Validation(format!("{} must not be negative", field)));
        }
        Ok(value)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Transaction body for `POST` (all fields required) and `PUT` (any subset)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct TransactionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<AmountInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl TransactionInput {
    /// Validate a create request
    pub fn into_new(self) -> Result<NewTransaction> {
        let (Some(amount), Some(date), Some(description), Some(category), Some(kind)) = (
            present_amount(self.amount),
            present(self.date),
            present(self.description),
            present(self.category),
            present(self.kind),
        ) else {
            return Err(Error::Validation(MISSING_FIELDS.to_string()));
        };

        Ok(NewTransaction {
            amount: amount.positive("amount")?,
            date: parse_date(&date)?,
            description,
            category,
            kind: parse_kind(&kind)?,
        })
    }

    /// Validate an update request; absent fields stay unchanged
    pub fn into_update(self) -> Result<TransactionUpdate> {
        Ok(TransactionUpdate {
            amount: self
                .amount
                .map(|a| a.positive("amount"))
                .transpose()?,
            date: self.date.map(|d| parse_date(&d)).transpose()?,
            description: self
                .description
                .map(|d| non_blank(d, "description"))
                .transpose()?,
            category: self
                .category
                .map(|c| non_blank(c, "category"))
                .transpose()?,
            kind: self.kind.map(|k| parse_kind(&k)).transpose()?,
        })
    }
}

/// Budget body for `POST` and `PUT`
///
/// `spent` may only be set through an update; new budgets start at 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct BudgetInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<AmountInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spent: Option<AmountInput>,
}

impl BudgetInput {
    pub fn into_new(self) -> Result<NewBudget> {
        if self.spent.is_some() {
            return Err(Error::Validation(
                "spent cannot be set when creating a budget".to_string(),
            ));
        }

        let (Some(category_id), Some(amount), Some(month)) = (
            present(self.category_id),
            present_amount(self.amount),
            present(self.month),
        ) else {
            return Err(Error::Validation(MISSING_FIELDS.to_string()));
        };

        Ok(NewBudget {
            category_id,
            amount: amount.positive("amount")?,
            month: parse_month(&month)?,
        })
    }

    pub fn into_update(self) -> Result<BudgetUpdate> {
        Ok(BudgetUpdate {
            category_id: self
                .category_id
                .map(|c| non_blank(c, "categoryId"))
                .transpose()?,
            amount: self
                .amount
                .map(|a| a.positive("amount"))
                .transpose()?,
            month: self.month.map(|m| parse_month(&m)).transpose()?,
            spent: self
                .spent
                .map(|s| s.non_negative("spent"))
                .transpose()?,
        })
    }
}

/// Treat empty and whitespace-only strings as absent
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// A blank amount string counts as missing, like a blank text field
fn present_amount(value: Option<AmountInput>) -> Option<AmountInput> {
    value.filter(|a| !matches!(a, AmountInput::Text(s) if s.trim().is_empty()))
}

fn non_blank(value: String, field: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} must not be empty", field)));
    }
    Ok(value)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Error::Validation(format!("Invalid date (use YYYY-MM-DD): {}", s)))
}

pub fn parse_month(s: &str) -> Result<Month> {
    s.trim().parse().map_err(Error::Validation)
}

fn parse_kind(s: &str) -> Result<TransactionType> {
    s.parse().map_err(Error::Validation)
}
