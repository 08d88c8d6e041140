//! Fixed category set
//!
//! Categories are static configuration, not user-managed records.
//! Transactions and budgets reference them by id without any integrity
//! check, so every lookup has a display fallback.

use crate::models::{Category, TransactionType};

/// Display name for an id that matches no category
pub const FALLBACK_NAME: &str = "Unknown";

/// Neutral gray used for unresolvable category ids
pub const FALLBACK_COLOR: &str = "#BDC3C7";

pub const FALLBACK_ICON: &str = "📊";

const fn category(
    id: &'static str,
    name: &'static str,
    color: &'static str,
    icon: &'static str,
    kind: TransactionType,
) -> Category {
    Category {
        id,
        name,
        color,
        icon,
        kind,
    }
}

static DEFAULT_CATEGORIES: [Category; 13] = [
    // Expense categories
    category("1", "Food & Dining", "#FF6B6B", "🍕", TransactionType::Expense),
    category("2", "Transportation", "#4ECDC4", "🚗", TransactionType::Expense),
    category("3", "Shopping", "#45B7D1", "🛍️", TransactionType::Expense),
    category("4", "Entertainment", "#96CEB4", "🎬", TransactionType::Expense),
    category("5", "Utilities", "#FFEAA7", "💡", TransactionType::Expense),
    category("6", "Healthcare", "#DDA0DD", "🏥", TransactionType::Expense),
    category("7", "Housing", "#98D8C8", "🏠", TransactionType::Expense),
    category("8", "Education", "#F7DC6F", "📚", TransactionType::Expense),
    category("9", "Other", "#BDC3C7", "📊", TransactionType::Expense),
    // Income categories
    category("10", "Salary", "#2ECC71", "💰", TransactionType::Income),
    category("11", "Freelance", "#3498DB", "💻", TransactionType::Income),
    category("12", "Investment", "#9B59B6", "📈", TransactionType::Income),
    category("13", "Other Income", "#1ABC9C", "💵", TransactionType::Income),
];

/// All predefined categories, expenses first
pub fn all() -> &'static [Category] {
    &DEFAULT_CATEGORIES
}

pub fn by_type(kind: TransactionType) -> impl Iterator<Item = &'static Category> {
    DEFAULT_CATEGORIES.iter().filter(move |c| c.kind == kind)
}

pub fn find(id: &str) -> Option<&'static Category> {
    DEFAULT_CATEGORIES.iter().find(|c| c.id == id)
}

pub fn name_of(id: &str) -> &'static str {
    find(id).map_or(FALLBACK_NAME, |c| c.name)
}

pub fn color_of(id: &str) -> &'static str {
    find(id).map_or(FALLBACK_COLOR, |c| c.color)
}

pub fn icon_of(id: &str) -> &'static str {
    find(id).map_or(FALLBACK_ICON, |c| c.icon)
}
