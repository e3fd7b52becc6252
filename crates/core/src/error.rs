//! # Error Module
//!
//! Core domain errors, independent of any storage or transport concern.

use rust_decimal::Decimal;
use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("account #{account_id} has negative balance {balance}")]
    NegativeBalance { account_id: i64, balance: Decimal },

    #[error("plan annual yield must not be negative: {0}")]
    NegativeRate(Decimal),
}
