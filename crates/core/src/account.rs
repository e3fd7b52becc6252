//! # Account Module
//!
//! An Account is a customer's open savings position: a balance, the plan
//! it accrues against, and the date it was opened. The balance is only
//! ever mutated through the ledger engine; everything else is plain CRUD.

use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A customer's savings position.
///
/// Invariant: `balance >= 0` at all times. A withdrawal is always a full
/// close-out, so the balance goes back to exactly zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Storage-assigned id (monotonic integer)
    pub id: i64,
    /// Free-text plan label chosen when the account was opened.
    /// Distinct from the referenced [`crate::Plan`] entity.
    pub packet: String,
    /// Owning customer
    pub customer_id: i64,
    /// Interest-rate tier the account accrues against
    pub plan_id: i64,
    /// Current balance, non-negative
    pub balance: Decimal,
    /// Opening date; interest months count from here
    pub opened_at: NaiveDate,
}

impl Account {
    /// Check domain invariants: the balance must not be negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.balance < Decimal::ZERO {
            return Err(CoreError::NegativeBalance {
                account_id: self.id,
                balance: self.balance,
            });
        }
        Ok(())
    }

    /// Whether a withdrawal can run against this account.
    /// Zero or negative balances are rejected by the engine.
    pub fn has_funds(&self) -> bool {
        self.balance > Decimal::ZERO
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account #{} ({}, customer #{}, balance {})",
            self.id, self.packet, self.customer_id, self.balance
        )
    }
}
