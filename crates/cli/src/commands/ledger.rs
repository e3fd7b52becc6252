//! Ledger operations: deposit, withdraw-and-close, history

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use depobank_core::TransactionKind;
use depobank_ledger::LedgerEngine;
use rust_decimal::Decimal;
use std::path::Path;

use crate::db;

fn kind_icon(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Deposit => "📥",
        TransactionKind::Withdraw => "📤",
    }
}

/// Deposit funds into an account
pub async fn deposit(
    db_path: &Path,
    account_id: i64,
    amount: Decimal,
    date: Option<DateTime<Utc>>,
    json: bool,
) -> Result<()> {
    let database = db::connect(db_path).await?;
    let engine = LedgerEngine::new(database.pool().clone());

    let receipt = engine.deposit(account_id, amount, date).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        println!("✅ Deposit successful!");
        println!("   Account:     {}", account_id);
        println!("   Amount:      {}", amount);
        println!("   New balance: {}", receipt.balance);
    }

    database.close().await;
    Ok(())
}

/// Withdraw the full balance with accrued interest and zero the account out
pub async fn withdraw(
    db_path: &Path,
    account_id: i64,
    date: NaiveDate,
    json: bool,
) -> Result<()> {
    let database = db::connect(db_path).await?;
    let engine = LedgerEngine::new(database.pool().clone());

    let receipt = engine.withdraw(account_id, date).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        println!("✅ Withdrawal successful!");
        println!("   Account:        {}", account_id);
        println!("   Balance:        {}", receipt.starting_balance);
        println!("   Months accrued: {}", receipt.months);
        println!("   Monthly rate:   {}", receipt.monthly_return);
        println!("   Interest:       {}", receipt.interest);
        println!("   Paid out:       {}", receipt.ending_balance);
    }

    database.close().await;
    Ok(())
}

/// Print an account's transaction history, newest first
pub async fn history(db_path: &Path, account_id: i64, json: bool) -> Result<()> {
    let database = db::connect(db_path).await?;
    let engine = LedgerEngine::new(database.pool().clone());

    let records = engine.history(account_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        println!("📜 History for account #{} ({} records)", account_id, records.len());
        for record in records {
            println!(
                "   {} #{:<6} {:<8} {:>16}  {}",
                kind_icon(record.kind),
                record.id,
                record.kind,
                record.amount,
                record.created_at.format("%Y-%m-%d %H:%M:%S"),
            );
        }
    }

    database.close().await;
    Ok(())
}
