//! # Depobank Persistence
//!
//! Persistence layer for Depobank - SQLite state plus the append-only
//! `transactions` table that serves as the ledger's flat history log.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      Database                          │
//! │  ┌─────────────┐    ┌──────────────┐    ┌───────────┐  │
//! │  │   SQLite    │    │ transactions │    │   Repos   │  │
//! │  │  (state)    │    │ (append-only)│    │ (queries) │  │
//! │  └─────────────┘    └──────────────┘    └───────────┘  │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use depobank_persistence::{AccountRepo, Database};
//!
//! let db = Database::open("depobank.db").await?;
//! let accounts = AccountRepo::get_all_details(db.pool()).await?;
//! ```

pub mod error;
pub mod sqlite;

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::{
    create_schema, open_in_memory_pool, open_pool, AccountDetailRow, AccountRepo, AccountRow,
    CustomerRepo, CustomerRow, PlanRepo, PlanRow, TransactionRepo, TransactionRow,
};

use sqlx::SqlitePool;
use std::path::Path;

/// Database facade - owns the SQLite pool and applies the schema on open.
/// Passed explicitly wherever storage is needed, so tests can substitute
/// an in-memory database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) a database file with the schema applied
    pub async fn open(db_path: impl AsRef<Path>) -> PersistenceResult<Self> {
        let pool = open_pool(db_path).await?;
        Ok(Self { pool })
    }

    /// Open an in-memory database (tests / demos)
    pub async fn open_in_memory() -> PersistenceResult<Self> {
        let pool = open_in_memory_pool().await?;
        Ok(Self { pool })
    }

    /// Get the SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all pool connections
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
