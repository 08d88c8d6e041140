//! Domain models for Tally

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A calendar year-month, written `YYYY-MM`
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Returns `None` when `month` is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl std::str::FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || format!("Invalid month (use YYYY-MM): {}", s);

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Records
// ============================================================================

/// A single income or expense event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Always positive; direction comes from `kind`
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    /// Category id (weak reference into the fixed category set)
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
}

/// A validated transaction ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub kind: TransactionType,
}

/// A validated partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub kind: Option<TransactionType>,
}

impl TransactionUpdate {
    /// Merge the provided fields into an existing record
    pub fn apply_to(&self, tx: &mut Transaction) {
        if let Some(amount) = self.amount {
            tx.amount = amount;
        }
        if let Some(date) = self.date {
            tx.date = date;
        }
        if let Some(description) = &self.description {
            tx.description = description.clone();
        }
        if let Some(category) = &self.category {
            tx.category = category.clone();
        }
        if let Some(kind) = self.kind {
            tx.kind = kind;
        }
    }
}

/// A spending ceiling for one category in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    pub amount: f64,
    pub month: Month,
    /// Stored value only. Starts at 0 and is never recomputed from
    /// transactions; derived views compute spending live instead.
    pub spent: f64,
}

/// A validated budget ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category_id: String,
    pub amount: f64,
    pub month: Month,
}

/// A validated partial budget update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetUpdate {
    pub category_id: Option<String>,
    pub amount: Option<f64>,
    pub month: Option<Month>,
    pub spent: Option<f64>,
}

impl BudgetUpdate {
    pub fn apply_to(&self, budget: &mut Budget) {
        if let Some(category_id) = &self.category_id {
            budget.category_id = category_id.clone();
        }
        if let Some(amount) = self.amount {
            budget.amount = amount;
        }
        if let Some(month) = self.month {
            budget.month = month;
        }
        if let Some(spent) = self.spent {
            budget.spent = spent;
        }
    }
}

/// A fixed classification tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// How to order a transaction listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSort {
    /// Newest transaction date first
    #[default]
    Date,
    /// Largest amount first
    Amount,
}

impl std::str::FromStr for TransactionSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            _ => Err(format!("Unknown sort order: {} (use date or amount)", s)),
        }
    }
}

// ============================================================================
// Derived views (computed on demand, never stored)
// ============================================================================

/// Expense total for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpense {
    pub month: Month,
    pub expenses: f64,
}

/// Income, expenses and net for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyData {
    pub month: Month,
    pub expenses: f64,
    pub income: f64,
    pub net: f64,
}

/// Aggregate amount for one category within a transaction type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category_id: String,
    /// Display name ("Unknown" for unresolvable ids)
    pub category: String,
    pub amount: f64,
    pub color: String,
    /// Share of the type's total across all categories
    pub percentage: f64,
}

/// Budget ceiling against live spending for the current month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetComparison {
    pub budget_id: String,
    pub category_id: String,
    pub category: String,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
}

/// Progress of spending against one budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub spent: f64,
    /// Capped at 100; 0 when the budget amount is 0
    pub percentage: f64,
    /// Never negative
    pub remaining: f64,
    /// How far spending exceeds the ceiling (0 when within budget)
    pub overspent: f64,
    pub is_over_budget: bool,
}

/// A budget with its category display and live progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub budget: Budget,
    pub category: String,
    pub color: String,
    pub icon: String,
    pub progress: BudgetProgress,
}

/// Current-month totals with the month-over-month expense change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub month: Month,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
    pub previous_month_expenses: f64,
    /// Percent change vs previous month; 0 when the previous month had no expenses
    pub expense_change: f64,
}

/// One of the highest-spending categories this month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCategory {
    pub category_id: String,
    pub category: String,
    pub color: String,
    pub icon: String,
    pub amount: f64,
}

/// Current-month spending insights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingInsights {
    pub top_categories: Vec<TopCategory>,
    pub largest_expense: Option<Transaction>,
    pub average_daily_spend: f64,
    pub average_transactions_per_day: f64,
}

/// Every derived view, computed from the same two lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: Summary,
    pub monthly_expenses: Vec<MonthlyExpense>,
    pub expense_categories: Vec<CategorySpending>,
    pub income_categories: Vec<CategorySpending>,
    pub budget_comparison: Vec<BudgetComparison>,
    pub budget_status: Vec<BudgetStatus>,
    pub insights: SpendingInsights,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_parse_and_display() {
        let m: Month = "2024-03".parse().unwrap();
        assert_eq!(m.year(), 2024);
        assert_eq!(m.month(), 3);
        assert_eq!(m.to_string(), "2024-03");

        for bad in ["2024-3", "2024-13", "2024-00", "24-03", "2024/03", "2024-03-01", "abcd-ef", ""] {
            assert!(bad.parse::<Month>().is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn test_month_neighbours_cross_years() {
        let jan = Month::new(2024, 1).unwrap();
        assert_eq!(jan.previous(), Month::new(2023, 12).unwrap());
        assert_eq!(jan.previous().next(), jan);
        assert_eq!(Month::new(2024, 12).unwrap().next(), Month::new(2025, 1).unwrap());
    }

    #[test]
    fn test_month_contains_and_order() {
        let feb = Month::new(2024, 2).unwrap();
        assert!(feb.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!feb.contains(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()));
        assert!(Month::new(2023, 12).unwrap() < Month::new(2024, 1).unwrap());
    }

    #[test]
    fn test_month_serializes_as_string() {
        let m = Month::new(2024, 1).unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"2024-01\"");
        let back: Month = serde_json::from_str("\"2024-01\"").unwrap();
        assert_eq!(back, m);
        assert!(serde_json::from_str::<Month>("\"2024-1\"").is_err());
    }

    #[test]
    fn test_transaction_wire_names() {
        let tx = Transaction {
            id: "abc".to_string(),
            amount: 12.5,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            description: "Lunch".to_string(),
            category: "1".to_string(),
            kind: TransactionType::Expense,
            created_at: DateTime::<Utc>::default(),
        };

        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["date"], "2024-01-05");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!("Income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert!("refund".parse::<TransactionType>().is_err());
    }
}
