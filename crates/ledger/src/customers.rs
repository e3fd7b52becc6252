//! Customer operations - plain CRUD over the customers table

use depobank_core::Customer;
use depobank_persistence::CustomerRepo;
use sqlx::SqlitePool;

use crate::error::LedgerResult;

/// Customer Service - identity CRUD, no invariants beyond uniqueness
pub struct CustomerService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new customer
    pub async fn add(&self, name: &str) -> LedgerResult<Customer> {
        let id = CustomerRepo::insert(self.pool, name).await?;
        Ok(Customer::new(id, name))
    }

    /// All customers, id ascending
    pub async fn list(&self) -> LedgerResult<Vec<Customer>> {
        let rows = CustomerRepo::get_all(self.pool).await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// One customer by id
    pub async fn get(&self, id: i64) -> LedgerResult<Customer> {
        let row = CustomerRepo::get_by_id(self.pool, id).await?;
        Ok(Customer::from(row))
    }

    /// Rename a customer
    pub async fn rename(&self, id: i64, name: &str) -> LedgerResult<Customer> {
        CustomerRepo::update(self.pool, id, name).await?;
        Ok(Customer::new(id, name))
    }

    /// Remove a customer
    pub async fn remove(&self, id: i64) -> LedgerResult<()> {
        CustomerRepo::delete(self.pool, id).await?;
        Ok(())
    }
}
