//! SQLite persistence module
//!
//! Repository pattern for SQLite database access.

pub mod init;
pub mod repos;
pub mod schema;

pub use init::{create_schema, open_in_memory_pool, open_pool};
pub use repos::{AccountRepo, CustomerRepo, PlanRepo, TransactionRepo};
pub use schema::{AccountDetailRow, AccountRow, CustomerRow, PlanRow, TransactionRow};
