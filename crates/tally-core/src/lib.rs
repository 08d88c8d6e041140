//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Encrypted SQLite record stores for transactions and budgets
//! - The fixed income and expense category set
//! - Boundary validation for client-supplied payloads
//! - Derived views (monthly series, breakdowns, budget progress, insights)

pub mod analytics;
pub mod categories;
pub mod db;
pub mod error;
pub mod input;
pub mod models;

pub use db::{AuditEntry, Database};
pub use error::{Error, Result};
pub use input::{BudgetInput, TransactionInput};
