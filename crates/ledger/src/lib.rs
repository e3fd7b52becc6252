//! # Depobank Ledger
//!
//! The transactional account-mutation engine and the services around it.
//!
//! [`LedgerEngine`] is the sole mutator of account balances: deposits and
//! withdrawals run under a per-account exclusive lock inside one storage
//! transaction, so the balance write and the history append commit or
//! roll back together. [`AccountService`], [`CustomerService`] and
//! [`PlanService`] are the plain CRUD surface the engine's data model
//! depends on.

pub mod accounts;
pub mod customers;
pub mod engine;
pub mod error;
pub mod locks;
pub mod plans;

pub use accounts::{AccountOverview, AccountService};
pub use customers::CustomerService;
pub use engine::{DepositReceipt, LedgerEngine, WithdrawalReceipt};
pub use error::{LedgerError, LedgerResult};
pub use locks::AccountLocks;
pub use plans::PlanService;
