//! Repository implementations for SQLite
//!
//! CRUD operations for all tables. Every function takes an
//! `impl SqliteExecutor` so callers can run it against the pool or inside
//! an open `sqlx::Transaction` - the ledger engine relies on the latter
//! to keep a balance write and its history append in one atomic unit.

use chrono::{DateTime, NaiveDate, Utc};
use depobank_core::TransactionKind;
use rust_decimal::Decimal;
use sqlx::SqliteExecutor;

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::schema::{AccountDetailRow, AccountRow, CustomerRow, PlanRow, TransactionRow};

const ACCOUNT_DETAIL_SQL: &str = "SELECT
    a.id, a.packet, a.customer_id, a.plan_id, a.balance, a.opened_at,
    c.name AS customer_name, p.name AS plan_name, p.yearly_return
FROM accounts a
JOIN customers c ON a.customer_id = c.id
JOIN plans p ON a.plan_id = p.id";

// ============================================================================
// Customer Repository
// ============================================================================

/// Repository for the customers table
pub struct CustomerRepo;

impl CustomerRepo {
    /// All customers, id ascending
    pub async fn get_all(
        executor: impl SqliteExecutor<'_>,
    ) -> PersistenceResult<Vec<CustomerRow>> {
        let rows = sqlx::query_as::<_, CustomerRow>("SELECT * FROM customers ORDER BY id ASC")
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    /// Customer by id
    pub async fn get_by_id(
        executor: impl SqliteExecutor<'_>,
        id: i64,
    ) -> PersistenceResult<CustomerRow> {
        sqlx::query_as::<_, CustomerRow>("SELECT * FROM customers WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Customer", id))
    }

    /// Insert a new customer, returning the assigned id
    pub async fn insert(
        executor: impl SqliteExecutor<'_>,
        name: &str,
    ) -> PersistenceResult<i64> {
        let result = sqlx::query("INSERT INTO customers (name) VALUES (?)")
            .bind(name)
            .execute(executor)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Rename a customer
    pub async fn update(
        executor: impl SqliteExecutor<'_>,
        id: i64,
        name: &str,
    ) -> PersistenceResult<()> {
        let result = sqlx::query("UPDATE customers SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Customer", id));
        }
        Ok(())
    }

    /// Delete a customer
    pub async fn delete(executor: impl SqliteExecutor<'_>, id: i64) -> PersistenceResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Customer", id));
        }
        Ok(())
    }
}

// ============================================================================
// Plan Repository
// ============================================================================

/// Repository for the plans table
pub struct PlanRepo;

impl PlanRepo {
    /// All plans, id ascending
    pub async fn get_all(executor: impl SqliteExecutor<'_>) -> PersistenceResult<Vec<PlanRow>> {
        let rows = sqlx::query_as::<_, PlanRow>("SELECT * FROM plans ORDER BY id ASC")
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    /// Plan by id
    pub async fn get_by_id(
        executor: impl SqliteExecutor<'_>,
        id: i64,
    ) -> PersistenceResult<PlanRow> {
        sqlx::query_as::<_, PlanRow>("SELECT * FROM plans WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Plan", id))
    }

    /// Insert a new plan, returning the assigned id
    pub async fn insert(
        executor: impl SqliteExecutor<'_>,
        name: &str,
        yearly_return: Decimal,
    ) -> PersistenceResult<i64> {
        let result = sqlx::query("INSERT INTO plans (name, yearly_return) VALUES (?, ?)")
            .bind(name)
            .bind(yearly_return.to_string())
            .execute(executor)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Update name and annual yield.
    /// Takes effect for every account still open against this plan.
    pub async fn update(
        executor: impl SqliteExecutor<'_>,
        id: i64,
        name: &str,
        yearly_return: Decimal,
    ) -> PersistenceResult<()> {
        let result = sqlx::query("UPDATE plans SET name = ?, yearly_return = ? WHERE id = ?")
            .bind(name)
            .bind(yearly_return.to_string())
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Plan", id));
        }
        Ok(())
    }

    /// Delete a plan
    pub async fn delete(executor: impl SqliteExecutor<'_>, id: i64) -> PersistenceResult<()> {
        let result = sqlx::query("DELETE FROM plans WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Plan", id));
        }
        Ok(())
    }
}

// ============================================================================
// Account Repository
// ============================================================================

/// Repository for the accounts table
pub struct AccountRepo;

impl AccountRepo {
    /// All accounts joined with customer and plan info, id ascending
    pub async fn get_all_details(
        executor: impl SqliteExecutor<'_>,
    ) -> PersistenceResult<Vec<AccountDetailRow>> {
        let rows = sqlx::query_as::<_, AccountDetailRow>(&format!(
            "{ACCOUNT_DETAIL_SQL} ORDER BY a.id ASC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    /// Account by id, joined with customer and plan info.
    ///
    /// The ledger engine calls this inside its transaction so the balance
    /// and the plan's current annual yield are read as one snapshot.
    pub async fn get_detail_by_id(
        executor: impl SqliteExecutor<'_>,
        id: i64,
    ) -> PersistenceResult<AccountDetailRow> {
        sqlx::query_as::<_, AccountDetailRow>(&format!("{ACCOUNT_DETAIL_SQL} WHERE a.id = ?"))
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Account", id))
    }

    /// Bare account row by id
    pub async fn get_by_id(
        executor: impl SqliteExecutor<'_>,
        id: i64,
    ) -> PersistenceResult<AccountRow> {
        sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Account", id))
    }

    /// Insert a new account, returning the assigned id
    pub async fn insert(
        executor: impl SqliteExecutor<'_>,
        packet: &str,
        customer_id: i64,
        plan_id: i64,
        balance: Decimal,
        opened_at: NaiveDate,
    ) -> PersistenceResult<i64> {
        let result = sqlx::query(
            "INSERT INTO accounts (packet, customer_id, plan_id, balance, opened_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(packet)
        .bind(customer_id)
        .bind(plan_id)
        .bind(balance.to_string())
        .bind(opened_at)
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Update packet, references and opening date.
    /// The balance is not touched here; only the ledger engine writes it.
    pub async fn update(
        executor: impl SqliteExecutor<'_>,
        id: i64,
        packet: &str,
        customer_id: i64,
        plan_id: i64,
        opened_at: NaiveDate,
    ) -> PersistenceResult<()> {
        let result = sqlx::query(
            "UPDATE accounts SET packet = ?, customer_id = ?, plan_id = ?, opened_at = ?
             WHERE id = ?",
        )
        .bind(packet)
        .bind(customer_id)
        .bind(plan_id)
        .bind(opened_at)
        .bind(id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Account", id));
        }
        Ok(())
    }

    /// Overwrite the balance. Ledger-engine use only, inside its
    /// transaction.
    pub async fn set_balance(
        executor: impl SqliteExecutor<'_>,
        id: i64,
        balance: Decimal,
    ) -> PersistenceResult<()> {
        let result = sqlx::query("UPDATE accounts SET balance = ? WHERE id = ?")
            .bind(balance.to_string())
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Account", id));
        }
        Ok(())
    }

    /// Delete an account. Transaction history is left in place.
    pub async fn delete(executor: impl SqliteExecutor<'_>, id: i64) -> PersistenceResult<()> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Account", id));
        }
        Ok(())
    }
}

// ============================================================================
// Transaction Repository
// ============================================================================

/// Repository for the transactions table. Append-only: there is no
/// update or delete here.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Append a new record, returning the assigned (monotonic) id
    pub async fn insert(
        executor: impl SqliteExecutor<'_>,
        account_id: i64,
        kind: TransactionKind,
        amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> PersistenceResult<i64> {
        let result = sqlx::query(
            "INSERT INTO transactions (account_id, tx_type, amount, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(account_id)
        .bind(kind.as_str())
        .bind(amount.to_string())
        .bind(created_at)
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Records for one account, newest first (ids are insertion-ordered)
    pub async fn get_by_account(
        executor: impl SqliteExecutor<'_>,
        account_id: i64,
    ) -> PersistenceResult<Vec<TransactionRow>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions WHERE account_id = ? ORDER BY id DESC",
        )
        .bind(account_id)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    /// Count records for one account
    pub async fn count_by_account(
        executor: impl SqliteExecutor<'_>,
        account_id: i64,
    ) -> PersistenceResult<i64> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM transactions WHERE account_id = ?")
                .bind(account_id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// Count all records
    pub async fn count(executor: impl SqliteExecutor<'_>) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions")
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }
}
