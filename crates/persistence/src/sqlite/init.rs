//! Database bootstrap
//!
//! Connection pool setup and schema creation. The schema is one inline
//! batch applied at init; `CREATE TABLE IF NOT EXISTS` keeps re-runs
//! harmless.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;

use crate::error::PersistenceResult;

/// How long a connection waits on a locked database before giving up.
/// A lock-wait past this surfaces as SQLITE_BUSY, which the ledger layer
/// classifies as transient.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (or create) a database file and apply the schema.
///
/// WAL journaling lets readers proceed while a writer holds its
/// transaction, so operations on different accounts stay parallel.
pub async fn open_pool(db_path: impl AsRef<Path>) -> PersistenceResult<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;
    Ok(pool)
}

/// Open an in-memory database with the schema applied.
///
/// In-memory SQLite is per-connection, so the pool is pinned to a single
/// connection. Intended for tests and demos.
pub async fn open_in_memory_pool() -> PersistenceResult<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;
    Ok(pool)
}

/// Create the database schema.
///
/// Monetary columns (`balance`, `amount`, `yearly_return`) are TEXT: the
/// domain layer does all arithmetic in `Decimal` and never relies on SQL
/// numeric semantics. `transactions` deliberately carries no foreign key
/// to `accounts` - history must survive account removal.
pub async fn create_schema(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::query(
        r#"
        -- Account holders
        CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        -- Interest-rate tiers
        CREATE TABLE IF NOT EXISTS plans (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            yearly_return TEXT NOT NULL DEFAULT '0'
        );

        -- Savings positions
        CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            packet TEXT NOT NULL,
            customer_id INTEGER NOT NULL,
            plan_id INTEGER NOT NULL,
            balance TEXT NOT NULL DEFAULT '0',
            opened_at DATE NOT NULL,
            FOREIGN KEY (customer_id) REFERENCES customers(id),
            FOREIGN KEY (plan_id) REFERENCES plans(id)
        );

        -- Append-only ledger; no FK to accounts so history outlives them
        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            tx_type TEXT NOT NULL CHECK (tx_type IN ('DEPOSIT', 'WITHDRAW')),
            amount TEXT NOT NULL,
            created_at DATETIME NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_account
            ON transactions(account_id);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
