//! Shared setup for ledger integration tests.

use chrono::NaiveDate;
use depobank_ledger::{AccountService, CustomerService, PlanService};
use depobank_persistence::Database;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Fresh in-memory database (single connection).
pub async fn setup_db() -> Database {
    Database::open_in_memory()
        .await
        .expect("failed to open in-memory database")
}

/// Fresh on-disk database for tests that need a multi-connection pool
/// (concurrency). The TempDir must outlive the Database.
pub async fn setup_file_db() -> (TempDir, Database) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db = Database::open(dir.path().join("ledger_test.db"))
        .await
        .expect("failed to open test database");
    (dir, db)
}

/// Seed one customer, one plan and one account; returns the account id.
pub async fn open_test_account(
    db: &Database,
    initial_balance: Decimal,
    yearly_return: Decimal,
    opened_at: NaiveDate,
) -> i64 {
    let customer = CustomerService::new(db.pool())
        .add("Test Customer")
        .await
        .expect("failed to add customer");
    let plan = PlanService::new(db.pool())
        .add("Test Plan", yearly_return)
        .await
        .expect("failed to add plan");
    let account = AccountService::new(db.pool())
        .open(
            "Test Packet",
            customer.id,
            plan.id,
            Some(initial_balance),
            Some(opened_at),
        )
        .await
        .expect("failed to open account");
    account.id
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("invalid test date")
}
