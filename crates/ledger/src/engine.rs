//! Ledger engine - the sole mutator of account balances
//!
//! Every mutation runs as: acquire the account's lock, open a storage
//! transaction, re-read state under the lock, mutate the balance, append
//! the history record, commit. Any failure before commit drops the
//! transaction and rolls both writes back, so a balance change and its
//! record are never observable half-applied. Balances are never read from
//! a prior snapshot - the re-read inside the transaction is what prevents
//! lost updates between concurrent callers.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use depobank_core::{
    calculate_interest, elapsed_months, Account, TransactionKind, TransactionRecord,
};
use depobank_persistence::{AccountRepo, TransactionRepo};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::error::{LedgerError, LedgerResult};
use crate::locks::AccountLocks;

/// Result of a successful deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReceipt {
    /// Balance after the deposit was applied
    pub balance: Decimal,
}

/// Full breakdown of a successful withdrawal (always a close-out).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    /// Balance the account held before closing
    pub starting_balance: Decimal,
    /// Whole months elapsed per the day-threshold rule
    pub months: u32,
    /// Monthly fractional rate used (annual yield / 12 / 100)
    pub monthly_return: Decimal,
    /// Interest earned over the elapsed months
    pub interest: Decimal,
    /// Payout: starting balance plus interest
    pub ending_balance: Decimal,
}

/// The transactional account-mutation engine.
///
/// Cheap to clone; clones share the pool and the lock registry, so
/// per-account serialization holds across every handle.
#[derive(Clone)]
pub struct LedgerEngine {
    pool: SqlitePool,
    locks: Arc<AccountLocks>,
}

impl LedgerEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            locks: Arc::new(AccountLocks::new()),
        }
    }

    /// Apply a deposit to an account.
    ///
    /// `occurred_at` stamps the history record; defaults to now. The
    /// amount must be positive - the boundary validates it, but the
    /// engine re-checks and fails closed.
    pub async fn deposit(
        &self,
        account_id: i64,
        amount: Decimal,
        occurred_at: Option<DateTime<Utc>>,
    ) -> LedgerResult<DepositReceipt> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::validation(format!(
                "deposit amount must be positive: {amount}"
            )));
        }

        let _guard = self.locks.acquire(account_id).await;
        let result = self.deposit_locked(account_id, amount, occurred_at).await;

        match &result {
            Ok(receipt) => {
                tracing::info!(account_id, %amount, balance = %receipt.balance, "deposit committed");
            }
            Err(err) => {
                tracing::warn!(account_id, %amount, error = %err, "deposit rolled back");
            }
        }
        result
    }

    async fn deposit_locked(
        &self,
        account_id: i64,
        amount: Decimal,
        occurred_at: Option<DateTime<Utc>>,
    ) -> LedgerResult<DepositReceipt> {
        let mut tx = self.pool.begin().await?;

        let account = Account::try_from(AccountRepo::get_by_id(&mut *tx, account_id).await?)?;
        // A negative stored balance means the invariant was already
        // broken outside the engine; refuse to build on top of it.
        account.validate()?;
        let new_balance = account.balance + amount;

        AccountRepo::set_balance(&mut *tx, account_id, new_balance).await?;
        TransactionRepo::insert(
            &mut *tx,
            account_id,
            TransactionKind::Deposit,
            amount,
            occurred_at.unwrap_or_else(Utc::now),
        )
        .await?;

        tx.commit().await?;
        Ok(DepositReceipt {
            balance: new_balance,
        })
    }

    /// Close an account out: compute interest accrued between the opening
    /// date and `withdrawal_date`, pay out the full balance plus interest,
    /// and set the balance to exactly zero.
    ///
    /// Always empties the account - this is not a partial withdrawal.
    /// Withdrawing from a zero-balance account fails with `InvalidState`.
    pub async fn withdraw(
        &self,
        account_id: i64,
        withdrawal_date: NaiveDate,
    ) -> LedgerResult<WithdrawalReceipt> {
        let _guard = self.locks.acquire(account_id).await;
        let result = self.withdraw_locked(account_id, withdrawal_date).await;

        match &result {
            Ok(receipt) => {
                tracing::info!(
                    account_id,
                    %withdrawal_date,
                    months = receipt.months,
                    payout = %receipt.ending_balance,
                    "withdrawal committed"
                );
            }
            Err(err) => {
                tracing::warn!(account_id, %withdrawal_date, error = %err, "withdrawal rolled back");
            }
        }
        result
    }

    async fn withdraw_locked(
        &self,
        account_id: i64,
        withdrawal_date: NaiveDate,
    ) -> LedgerResult<WithdrawalReceipt> {
        let mut tx = self.pool.begin().await?;

        // One snapshot: balance, opening date and the plan's current
        // annual yield. Plan edits apply to any account still open here.
        let detail = AccountRepo::get_detail_by_id(&mut *tx, account_id).await?;
        let account = detail.account()?;
        let yearly_return = detail.yearly_return()?;

        if !account.has_funds() {
            return Err(LedgerError::invalid_state(
                "account balance is zero or negative",
            ));
        }

        let months = elapsed_months(account.opened_at, withdrawal_date);
        let breakdown = calculate_interest(account.balance, yearly_return, months);

        AccountRepo::set_balance(&mut *tx, account_id, Decimal::ZERO).await?;
        TransactionRepo::insert(
            &mut *tx,
            account_id,
            TransactionKind::Withdraw,
            breakdown.ending_balance,
            withdrawal_date.and_time(NaiveTime::MIN).and_utc(),
        )
        .await?;

        tx.commit().await?;
        Ok(WithdrawalReceipt {
            starting_balance: account.balance,
            months,
            monthly_return: breakdown.monthly_return,
            interest: breakdown.interest,
            ending_balance: breakdown.ending_balance,
        })
    }

    /// Transaction history for an account, newest first.
    ///
    /// Fails with `NotFound` for accounts that never existed; history of
    /// a deleted account is reachable through the repos but not through
    /// the engine.
    pub async fn history(&self, account_id: i64) -> LedgerResult<Vec<TransactionRecord>> {
        AccountRepo::get_by_id(&self.pool, account_id).await?;

        let rows = TransactionRepo::get_by_account(&self.pool, account_id).await?;
        rows.into_iter()
            .map(|row| TransactionRecord::try_from(row).map_err(LedgerError::from))
            .collect()
    }
}
