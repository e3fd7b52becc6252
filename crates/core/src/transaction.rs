//! # Transaction Module
//!
//! Immutable history entries for the ledger. A record is appended in the
//! same storage transaction as the balance change it describes, and is
//! never mutated or deleted afterwards - not even when its account is
//! removed (history outlives the account).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of ledger mutation a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Amount added to the balance
    Deposit,
    /// Full close-out; amount is the payout including interest
    Withdraw,
}

impl TransactionKind {
    /// Code string stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdraw => "WITHDRAW",
        }
    }

    /// Parse from the stored code string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DEPOSIT" => Some(TransactionKind::Deposit),
            "WITHDRAW" => Some(TransactionKind::Withdraw),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One append-only ledger entry.
///
/// For deposits `amount` is the deposited amount; for withdrawals it is
/// the final payout including accrued interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Storage-assigned id; monotonic, so ids double as insertion order
    pub id: i64,
    /// Account this record belongs to. Kept as a plain reference so the
    /// record survives account removal.
    pub account_id: i64,
    /// Deposit or withdraw
    pub kind: TransactionKind,
    /// Deposited amount, or payout including interest
    pub amount: Decimal,
    /// Caller-supplied timestamp, or the time the engine ran
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} on account #{} at {}",
            self.id, self.kind, self.amount, self.account_id, self.created_at
        )
    }
}
