//! Command handlers, one module per area.

pub mod account;
pub mod customer;
pub mod ledger;
pub mod plan;
