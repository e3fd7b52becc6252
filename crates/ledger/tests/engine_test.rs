//! Integration tests for the ledger engine: deposit/withdraw semantics,
//! interest math end to end, per-account serialization and rollback
//! atomicity.

mod common;

use common::{date, open_test_account, setup_db, setup_file_db};
use chrono::{TimeZone, Utc};
use depobank_core::TransactionKind;
use depobank_ledger::{LedgerEngine, LedgerError, PlanService};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[tokio::test]
async fn deposit_increases_balance_and_appends_one_record() {
    let db = setup_db().await;
    let account_id = open_test_account(&db, dec!(100), dec!(6), date(2024, 1, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    let receipt = engine.deposit(account_id, dec!(250.75), None).await.unwrap();
    assert_eq!(receipt.balance, dec!(350.75));

    let history = engine.history(account_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, TransactionKind::Deposit);
    assert_eq!(history[0].amount, dec!(250.75));
}

#[tokio::test]
async fn deposit_rejects_non_positive_amounts() {
    let db = setup_db().await;
    let account_id = open_test_account(&db, dec!(100), dec!(6), date(2024, 1, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    for amount in [Decimal::ZERO, dec!(-10)] {
        let err = engine.deposit(account_id, amount, None).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)), "got {err}");
    }

    // Fail-closed means no side effects at all
    assert!(engine.history(account_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deposit_into_unknown_account_is_not_found() {
    let db = setup_db().await;
    let engine = LedgerEngine::new(db.pool().clone());

    let err = engine.deposit(9999, dec!(10), None).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn deposit_record_uses_caller_timestamp_when_given() {
    let db = setup_db().await;
    let account_id = open_test_account(&db, dec!(0), dec!(6), date(2024, 1, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    engine.deposit(account_id, dec!(50), Some(stamp)).await.unwrap();

    let history = engine.history(account_id).await.unwrap();
    assert_eq!(history[0].created_at, stamp);
}

#[tokio::test]
async fn withdraw_returns_full_interest_breakdown() {
    let db = setup_db().await;
    // 1,000,000 at 6% p.a., opened 2024-01-15: withdrawing on 2024-03-15
    // counts 3 months (day match), rate 0.005/month, interest 15,000.
    let account_id = open_test_account(&db, dec!(1000000), dec!(6), date(2024, 1, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    let receipt = engine.withdraw(account_id, date(2024, 3, 15)).await.unwrap();
    assert_eq!(receipt.starting_balance, dec!(1000000));
    assert_eq!(receipt.months, 3);
    assert_eq!(receipt.monthly_return, dec!(0.005));
    assert_eq!(receipt.interest, dec!(15000));
    assert_eq!(receipt.ending_balance, dec!(1015000));
}

#[tokio::test]
async fn withdraw_zeroes_balance_and_records_payout() {
    let db = setup_db().await;
    let account_id = open_test_account(&db, dec!(1000000), dec!(6), date(2024, 1, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    let receipt = engine.withdraw(account_id, date(2024, 3, 15)).await.unwrap();

    let history = engine.history(account_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, TransactionKind::Withdraw);
    // The record carries the payout, not the pre-interest balance
    assert_eq!(history[0].amount, receipt.ending_balance);

    // Closed out: a second withdrawal must be rejected
    let err = engine.withdraw(account_id, date(2024, 4, 15)).await.unwrap_err();
    assert!(matches!(err, LedgerError::InvalidState(_)), "got {err}");
    assert_eq!(engine.history(account_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn withdraw_from_empty_account_is_invalid_state() {
    let db = setup_db().await;
    let account_id = open_test_account(&db, Decimal::ZERO, dec!(6), date(2024, 1, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    let err = engine.withdraw(account_id, date(2024, 6, 1)).await.unwrap_err();
    assert!(matches!(err, LedgerError::InvalidState(_)));
    assert!(engine.history(account_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn withdraw_from_unknown_account_is_not_found() {
    let db = setup_db().await;
    let engine = LedgerEngine::new(db.pool().clone());

    let err = engine.withdraw(404, date(2024, 6, 1)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn withdraw_dated_before_opening_pays_no_interest() {
    let db = setup_db().await;
    let account_id = open_test_account(&db, dec!(5000), dec!(12), date(2024, 6, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    let receipt = engine.withdraw(account_id, date(2024, 1, 1)).await.unwrap();
    assert_eq!(receipt.months, 0);
    assert_eq!(receipt.interest, Decimal::ZERO);
    assert_eq!(receipt.ending_balance, dec!(5000));
}

#[tokio::test]
async fn plan_rate_edit_applies_to_open_accounts() {
    let db = setup_db().await;
    let account_id = open_test_account(&db, dec!(1000000), dec!(6), date(2024, 1, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    // No snapshot at open time: the rate read at withdrawal wins
    let plans = PlanService::new(db.pool());
    let plan = &plans.list().await.unwrap()[0];
    plans.update(plan.id, &plan.name, dec!(12)).await.unwrap();

    let receipt = engine.withdraw(account_id, date(2024, 3, 15)).await.unwrap();
    assert_eq!(receipt.monthly_return, dec!(0.01));
    assert_eq!(receipt.interest, dec!(30000));
}

#[tokio::test]
async fn concurrent_deposits_lose_no_updates() {
    let (_dir, db) = setup_file_db().await;
    let account_id = open_test_account(&db, Decimal::ZERO, dec!(6), date(2024, 1, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    const TASKS: usize = 8;
    let amount = dec!(25);

    let handles: Vec<_> = (0..TASKS)
        .map(|_| {
            let engine = engine.clone();
            tokio::spawn(async move { engine.deposit(account_id, amount, None).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let history = engine.history(account_id).await.unwrap();
    assert_eq!(history.len(), TASKS);

    let total: Decimal = history.iter().map(|r| r.amount).sum();
    assert_eq!(total, dec!(200));

    // And the balance agrees with the records
    let receipt = engine.withdraw(account_id, date(2024, 1, 15)).await.unwrap();
    assert_eq!(receipt.starting_balance, dec!(200));
}

#[tokio::test]
async fn failed_record_append_rolls_back_balance_write() {
    let db = setup_db().await;
    let account_id = open_test_account(&db, dec!(100), dec!(6), date(2024, 1, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    // Make the append step fail after the balance write has run
    sqlx::query(
        "CREATE TRIGGER block_append BEFORE INSERT ON transactions
         BEGIN SELECT RAISE(ABORT, 'append blocked'); END;",
    )
    .execute(db.pool())
    .await
    .unwrap();

    let err = engine.deposit(account_id, dec!(50), None).await.unwrap_err();
    assert!(!err.is_not_found());

    // All-or-nothing: the balance write must have been rolled back too
    sqlx::query("DROP TRIGGER block_append")
        .execute(db.pool())
        .await
        .unwrap();
    let receipt = engine.deposit(account_id, dec!(50), None).await.unwrap();
    assert_eq!(receipt.balance, dec!(150));
    assert_eq!(engine.history(account_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn deposit_refuses_corrupted_negative_balance() {
    let db = setup_db().await;
    let account_id = open_test_account(&db, dec!(100), dec!(6), date(2024, 1, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    // Break the balance invariant behind the engine's back
    depobank_persistence::AccountRepo::set_balance(db.pool(), account_id, dec!(-5))
        .await
        .unwrap();

    let err = engine.deposit(account_id, dec!(50), None).await.unwrap_err();
    assert!(matches!(err, LedgerError::Core(_)), "got {err}");
    assert!(engine.history(account_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn transaction_log_reconciles_with_balance_history() {
    let db = setup_db().await;
    let account_id = open_test_account(&db, Decimal::ZERO, dec!(6), date(2024, 1, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    engine.deposit(account_id, dec!(300000), None).await.unwrap();
    engine.deposit(account_id, dec!(700000), None).await.unwrap();
    let receipt = engine.withdraw(account_id, date(2024, 3, 15)).await.unwrap();

    let history = engine.history(account_id).await.unwrap();
    let deposited: Decimal = history
        .iter()
        .filter(|r| r.kind == TransactionKind::Deposit)
        .map(|r| r.amount)
        .sum();
    let withdrawn: Decimal = history
        .iter()
        .filter(|r| r.kind == TransactionKind::Withdraw)
        .map(|r| r.amount)
        .sum();

    assert_eq!(deposited, dec!(1000000));
    assert_eq!(withdrawn, receipt.ending_balance);
    assert_eq!(receipt.starting_balance, deposited);
}

#[tokio::test]
async fn history_is_newest_first() {
    let db = setup_db().await;
    let account_id = open_test_account(&db, Decimal::ZERO, dec!(6), date(2024, 1, 15)).await;
    let engine = LedgerEngine::new(db.pool().clone());

    engine.deposit(account_id, dec!(1), None).await.unwrap();
    engine.deposit(account_id, dec!(2), None).await.unwrap();

    let history = engine.history(account_id).await.unwrap();
    assert_eq!(history[0].amount, dec!(2));
    assert_eq!(history[1].amount, dec!(1));
    assert!(history[0].id > history[1].id);

    let err = engine.history(31337).await.unwrap_err();
    assert!(err.is_not_found());
}
