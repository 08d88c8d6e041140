//! Database tests

use super::*;
use crate::models::*;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn month(y: i32, m: u32) -> Month {
    Month::new(y, m).unwrap()
}

fn groceries() -> NewTransaction {
    NewTransaction {
        amount: 50.0,
        date: date(2024, 1, 5),
        description: "Groceries".to_string(),
        category: "1".to_string(),
        kind: TransactionType::Expense,
    }
}

fn food_budget(m: Month) -> NewBudget {
    NewBudget {
        category_id: "1".to_string(),
        amount: 100.0,
        month: m,
    }
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    assert!(db.list_transactions().unwrap().is_empty());
    assert!(db.list_budgets().unwrap().is_empty());
}

#[test]
fn test_in_memory_db_cleans_up_on_drop() {
    let db = Database::in_memory().unwrap();
    db.create_transaction(&groceries()).unwrap();

    let dir = std::path::Path::new(&db.db_path)
        .parent()
        .unwrap()
        .to_path_buf();
    assert!(dir.exists());

    // Clones share the same scratch directory
    let clone = db.clone();
    drop(db);
    assert!(dir.exists());
    assert_eq!(clone.list_transactions().unwrap().len(), 1);

    drop(clone);
    assert!(!dir.exists());
}

#[test]
fn test_schema_exists() {
    let db = Database::in_memory().unwrap();
    let conn = db.conn().unwrap();

    let result: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('transactions') WHERE name IN ('id', 'amount', 'date', 'description', 'category', 'type', 'created_at')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(result, 7, "transactions table should have 7 expected columns");

    let result: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('budgets') WHERE name IN ('id', 'category_id', 'amount', 'month', 'spent', 'created_at')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(result, 6, "budgets table should have 6 expected columns");
}

#[test]
fn test_transaction_round_trip() {
    let db = Database::in_memory().unwrap();

    let created = db.create_transaction(&groceries()).unwrap();
    assert!(!created.id.is_empty());

    let fetched = db.get_transaction(&created.id).unwrap().unwrap();
    assert_eq!(fetched.amount, 50.0);
    assert_eq!(fetched.date, date(2024, 1, 5));
    assert_eq!(fetched.description, "Groceries");
    assert_eq!(fetched.category, "1");
    assert_eq!(fetched.kind, TransactionType::Expense);

    // Update a single field
    let update = TransactionUpdate {
        description: Some("Supermarket".to_string()),
        ..Default::default()
    };
    let updated = db.update_transaction(&created.id, &update).unwrap();
    assert_eq!(updated.description, "Supermarket");

    let fetched_again = db.get_transaction(&created.id).unwrap().unwrap();
    assert_eq!(fetched_again.description, "Supermarket");
    assert_eq!(fetched_again.amount, fetched.amount);
    assert_eq!(fetched_again.date, fetched.date);
    assert_eq!(fetched_again.category, fetched.category);
    assert_eq!(fetched_again.kind, fetched.kind);
    assert_eq!(fetched_again.created_at, fetched.created_at);

    db.delete_transaction(&created.id).unwrap();
    assert!(db.get_transaction(&created.id).unwrap().is_none());
}

#[test]
fn test_created_at_survives_storage() {
    let db = Database::in_memory().unwrap();
    let created = db.create_transaction(&groceries()).unwrap();
    let fetched = db.get_transaction(&created.id).unwrap().unwrap();
    assert_eq!(fetched.created_at, created.created_at);
}

#[test]
fn test_transaction_ids_are_unique() {
    let db = Database::in_memory().unwrap();
    let a = db.create_transaction(&groceries()).unwrap();
    let b = db.create_transaction(&groceries()).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn test_list_transactions_newest_first() {
    let db = Database::in_memory().unwrap();

    let first = db.create_transaction(&groceries()).unwrap();
    let second = db
        .create_transaction(&NewTransaction {
            // An older calendar date does not change creation order
            date: date(2023, 6, 1),
            ..groceries()
        })
        .unwrap();
    let third = db.create_transaction(&groceries()).unwrap();

    let ids: Vec<_> = db
        .list_transactions()
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[test]
fn test_update_missing_transaction() {
    let db = Database::in_memory().unwrap();
    let update = TransactionUpdate {
        amount: Some(1.0),
        ..Default::default()
    };
    let result = db.update_transaction("nope", &update);
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn test_delete_missing_transaction() {
    let db = Database::in_memory().unwrap();
    assert!(matches!(
        db.delete_transaction("nope"),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_empty_update_returns_record_unchanged() {
    let db = Database::in_memory().unwrap();
    let created = db.create_transaction(&groceries()).unwrap();
    let updated = db
        .update_transaction(&created.id, &TransactionUpdate::default())
        .unwrap();
    assert_eq!(updated, created);
}

#[test]
fn test_budget_crud() {
    let db = Database::in_memory().unwrap();

    let budget = db.create_budget(&food_budget(month(2024, 1))).unwrap();
    assert_eq!(budget.spent, 0.0);
    assert_eq!(budget.month.to_string(), "2024-01");

    let fetched = db.get_budget(&budget.id).unwrap().unwrap();
    assert_eq!(fetched, budget);

    let update = BudgetUpdate {
        amount: Some(250.0),
        spent: Some(12.5),
        ..Default::default()
    };
    let updated = db.update_budget(&budget.id, &update).unwrap();
    assert_eq!(updated.amount, 250.0);
    assert_eq!(updated.spent, 12.5);
    assert_eq!(updated.category_id, "1");
    assert_eq!(updated.month, month(2024, 1));

    db.delete_budget(&budget.id).unwrap();
    assert!(db.get_budget(&budget.id).unwrap().is_none());
    assert!(matches!(
        db.delete_budget(&budget.id),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_duplicate_budget_rejected() {
    let db = Database::in_memory().unwrap();
    db.create_budget(&food_budget(month(2024, 1))).unwrap();

    match db.create_budget(&food_budget(month(2024, 1))) {
        Err(Error::Conflict(msg)) => assert_eq!(msg, budgets::DUPLICATE_BUDGET),
        other => panic!("expected conflict, got {:?}", other),
    }

    // Different month succeeds
    db.create_budget(&food_budget(month(2024, 2))).unwrap();

    // Different category succeeds
    db.create_budget(&NewBudget {
        category_id: "2".to_string(),
        ..food_budget(month(2024, 1))
    })
    .unwrap();

    assert_eq!(db.list_budgets().unwrap().len(), 3);
}

#[test]
fn test_budget_update_does_not_recheck_uniqueness() {
    let db = Database::in_memory().unwrap();
    db.create_budget(&food_budget(month(2024, 1))).unwrap();
    let february = db.create_budget(&food_budget(month(2024, 2))).unwrap();

    let update = BudgetUpdate {
        month: Some(month(2024, 1)),
        ..Default::default()
    };
    let moved = db.update_budget(&february.id, &update).unwrap();
    assert_eq!(moved.month, month(2024, 1));

    let january: Vec<_> = db
        .list_budgets()
        .unwrap()
        .into_iter()
        .filter(|b| b.month == month(2024, 1))
        .collect();
    assert_eq!(january.len(), 2);
}

#[test]
fn test_list_budgets_newest_first() {
    let db = Database::in_memory().unwrap();
    let a = db.create_budget(&food_budget(month(2024, 1))).unwrap();
    let b = db.create_budget(&food_budget(month(2024, 2))).unwrap();

    let ids: Vec<_> = db.list_budgets().unwrap().into_iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
}

#[test]
fn test_audit_log() {
    let db = Database::in_memory().unwrap();
    db.log_audit("create", "transaction", Some("abc"), Some("amount=10"))
        .unwrap();
    db.log_audit("delete", "budget", Some("def"), None).unwrap();

    let entries = db.list_audit_log(10).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, "delete");
    assert_eq!(entries[0].entity_type, "budget");
    assert_eq!(entries[1].details.as_deref(), Some("amount=10"));

    assert_eq!(db.list_audit_log(1).unwrap().len(), 1);
}

#[test]
fn test_reopen_preserves_records() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("tally.db");
    let path = path.to_str().unwrap();

    let id = {
        let db = Database::new_unencrypted(path).unwrap();
        db.create_transaction(&groceries()).unwrap().id
    };

    let db = Database::new_unencrypted(path).unwrap();
    assert!(db.get_transaction(&id).unwrap().is_some());
}
