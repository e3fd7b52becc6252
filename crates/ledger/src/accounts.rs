//! Account operations - opening, lookup, edits and removal
//!
//! Opening validates that the referenced customer and plan exist and that
//! any initial balance is non-negative. Balance mutation is not here:
//! only the ledger engine writes balances.

use chrono::{NaiveDate, Utc};
use depobank_core::Account;
use depobank_persistence::{AccountDetailRow, AccountRepo, CustomerRepo, PlanRepo};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::{LedgerError, LedgerResult};

/// An account joined with its customer and plan for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOverview {
    pub account: Account,
    pub customer_name: String,
    pub plan_name: String,
    /// The plan's current annual yield in percent
    pub yearly_return: Decimal,
}

impl AccountOverview {
    fn from_row(row: AccountDetailRow) -> LedgerResult<Self> {
        Ok(Self {
            account: row.account()?,
            yearly_return: row.yearly_return()?,
            customer_name: row.customer_name,
            plan_name: row.plan_name,
        })
    }
}

/// Account Service - lifecycle CRUD around the engine
pub struct AccountService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a new account.
    ///
    /// `initial_balance` defaults to zero and must not be negative;
    /// `opened_at` defaults to today. Customer and plan must exist.
    pub async fn open(
        &self,
        packet: &str,
        customer_id: i64,
        plan_id: i64,
        initial_balance: Option<Decimal>,
        opened_at: Option<NaiveDate>,
    ) -> LedgerResult<Account> {
        let balance = initial_balance.unwrap_or(Decimal::ZERO);
        if balance < Decimal::ZERO {
            return Err(LedgerError::validation(format!(
                "initial balance must not be negative: {balance}"
            )));
        }

        // Reject dangling references up front with a clean NotFound
        // instead of a foreign-key violation from the store.
        CustomerRepo::get_by_id(self.pool, customer_id).await?;
        PlanRepo::get_by_id(self.pool, plan_id).await?;

        let opened_at = opened_at.unwrap_or_else(|| Utc::now().date_naive());
        let id =
            AccountRepo::insert(self.pool, packet, customer_id, plan_id, balance, opened_at)
                .await?;

        Ok(Account {
            id,
            packet: packet.to_string(),
            customer_id,
            plan_id,
            balance,
            opened_at,
        })
    }

    /// All accounts with customer and plan info, id ascending
    pub async fn list(&self) -> LedgerResult<Vec<AccountOverview>> {
        let rows = AccountRepo::get_all_details(self.pool).await?;
        rows.into_iter().map(AccountOverview::from_row).collect()
    }

    /// One account with customer and plan info
    pub async fn get(&self, id: i64) -> LedgerResult<AccountOverview> {
        let row = AccountRepo::get_detail_by_id(self.pool, id).await?;
        AccountOverview::from_row(row)
    }

    /// Edit packet, references and opening date. `opened_at = None`
    /// keeps the current opening date. The balance is untouched.
    pub async fn update(
        &self,
        id: i64,
        packet: &str,
        customer_id: i64,
        plan_id: i64,
        opened_at: Option<NaiveDate>,
    ) -> LedgerResult<Account> {
        CustomerRepo::get_by_id(self.pool, customer_id).await?;
        PlanRepo::get_by_id(self.pool, plan_id).await?;

        let current = Account::try_from(AccountRepo::get_by_id(self.pool, id).await?)?;
        let opened_at = opened_at.unwrap_or(current.opened_at);

        AccountRepo::update(self.pool, id, packet, customer_id, plan_id, opened_at).await?;

        Ok(Account {
            id,
            packet: packet.to_string(),
            customer_id,
            plan_id,
            balance: current.balance,
            opened_at,
        })
    }

    /// Remove an account. Its transaction history is deliberately left
    /// in place - records outlive the accounts they describe.
    pub async fn close(&self, id: i64) -> LedgerResult<()> {
        AccountRepo::delete(self.pool, id).await?;
        Ok(())
    }
}
