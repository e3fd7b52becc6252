//! # Depobank Core
//!
//! Core domain types for a savings-account ledger:
//! - [`Customer`]: account holder
//! - [`Plan`]: named interest-rate tier (annual yield percent)
//! - [`Account`]: a customer's open savings position
//! - [`TransactionRecord`]: append-only deposit/withdraw history entry
//! - [`interest`]: pure interest math and the month-counting rule
//!
//! This crate has no I/O and no async. Everything here is plain data and
//! pure functions, so the persistence and ledger layers can be tested
//! against it directly.

pub mod account;
pub mod customer;
pub mod error;
pub mod interest;
pub mod plan;
pub mod transaction;

pub use account::Account;
pub use customer::Customer;
pub use error::CoreError;
pub use interest::{calculate_interest, elapsed_months, InterestBreakdown};
pub use plan::Plan;
pub use transaction::{TransactionKind, TransactionRecord};
