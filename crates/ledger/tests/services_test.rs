//! Integration tests for the CRUD services around the engine.

mod common;

use common::{date, setup_db};
use depobank_ledger::{AccountService, CustomerService, LedgerEngine, LedgerError, PlanService};
use depobank_persistence::TransactionRepo;
use rust_decimal_macros::dec;

#[tokio::test]
async fn open_account_requires_existing_customer_and_plan() {
    let db = setup_db().await;
    let accounts = AccountService::new(db.pool());

    let err = accounts
        .open("Packet", 1, 1, None, None)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let customer = CustomerService::new(db.pool()).add("Alice").await.unwrap();
    let err = accounts
        .open("Packet", customer.id, 99, None, None)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let plan = PlanService::new(db.pool()).add("Silver", dec!(3)).await.unwrap();
    let account = accounts
        .open("Packet", customer.id, plan.id, None, Some(date(2024, 5, 1)))
        .await
        .unwrap();
    assert_eq!(account.balance, dec!(0));
    assert_eq!(account.opened_at, date(2024, 5, 1));
}

#[tokio::test]
async fn open_account_rejects_negative_initial_balance() {
    let db = setup_db().await;
    let customer = CustomerService::new(db.pool()).add("Alice").await.unwrap();
    let plan = PlanService::new(db.pool()).add("Silver", dec!(3)).await.unwrap();

    let err = AccountService::new(db.pool())
        .open("Packet", customer.id, plan.id, Some(dec!(-1)), None)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
}

#[tokio::test]
async fn plan_add_rejects_negative_yield() {
    let db = setup_db().await;

    let err = PlanService::new(db.pool())
        .add("Broken", dec!(-2))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
}

#[tokio::test]
async fn account_update_keeps_opening_date_when_omitted() {
    let db = setup_db().await;
    let customer = CustomerService::new(db.pool()).add("Alice").await.unwrap();
    let plan = PlanService::new(db.pool()).add("Silver", dec!(3)).await.unwrap();
    let accounts = AccountService::new(db.pool());

    let account = accounts
        .open("Old Packet", customer.id, plan.id, None, Some(date(2024, 1, 15)))
        .await
        .unwrap();

    let updated = accounts
        .update(account.id, "New Packet", customer.id, plan.id, None)
        .await
        .unwrap();
    assert_eq!(updated.packet, "New Packet");
    assert_eq!(updated.opened_at, date(2024, 1, 15));
}

#[tokio::test]
async fn closing_an_account_orphans_its_history() {
    let db = setup_db().await;
    let customer = CustomerService::new(db.pool()).add("Alice").await.unwrap();
    let plan = PlanService::new(db.pool()).add("Silver", dec!(3)).await.unwrap();
    let accounts = AccountService::new(db.pool());

    let account = accounts
        .open("Packet", customer.id, plan.id, None, Some(date(2024, 1, 15)))
        .await
        .unwrap();

    let engine = LedgerEngine::new(db.pool().clone());
    engine.deposit(account.id, dec!(100), None).await.unwrap();

    accounts.close(account.id).await.unwrap();

    // The engine no longer serves the account...
    assert!(engine.history(account.id).await.unwrap_err().is_not_found());

    // ...but the records are still in the store, never cascaded
    let orphaned = TransactionRepo::get_by_account(db.pool(), account.id)
        .await
        .unwrap();
    assert_eq!(orphaned.len(), 1);
}

#[tokio::test]
async fn customer_listing_is_id_ascending() {
    let db = setup_db().await;
    let customers = CustomerService::new(db.pool());

    customers.add("Alice").await.unwrap();
    customers.add("Bob").await.unwrap();

    let all = customers.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Alice");
    assert_eq!(all[1].name, "Bob");
}
