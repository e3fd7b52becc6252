//! Plan operations - CRUD for interest-rate tiers
//!
//! Rate edits are live: a withdrawal reads the plan's annual yield at
//! withdrawal time, so changing a plan changes future interest for every
//! account still open against it.

use depobank_core::Plan;
use depobank_persistence::PlanRepo;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::error::{LedgerError, LedgerResult};

/// Plan Service - interest-rate tier CRUD
pub struct PlanService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PlanService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new tier. The annual yield must not be negative.
    pub async fn add(&self, name: &str, yearly_return: Decimal) -> LedgerResult<Plan> {
        check_rate(yearly_return)?;
        let id = PlanRepo::insert(self.pool, name, yearly_return).await?;
        Ok(Plan::new(id, name, yearly_return))
    }

    /// All plans, id ascending
    pub async fn list(&self) -> LedgerResult<Vec<Plan>> {
        let rows = PlanRepo::get_all(self.pool).await?;
        rows.into_iter()
            .map(|row| Plan::try_from(row).map_err(LedgerError::from))
            .collect()
    }

    /// One plan by id
    pub async fn get(&self, id: i64) -> LedgerResult<Plan> {
        let row = PlanRepo::get_by_id(self.pool, id).await?;
        Ok(Plan::try_from(row)?)
    }

    /// Edit name and annual yield
    pub async fn update(&self, id: i64, name: &str, yearly_return: Decimal) -> LedgerResult<Plan> {
        check_rate(yearly_return)?;
        PlanRepo::update(self.pool, id, name, yearly_return).await?;
        Ok(Plan::new(id, name, yearly_return))
    }

    /// Remove a plan
    pub async fn remove(&self, id: i64) -> LedgerResult<()> {
        PlanRepo::delete(self.pool, id).await?;
        Ok(())
    }
}

/// The rate invariant lives in the domain type; a violation is still a
/// caller-input rejection at this layer.
fn check_rate(yearly_return: Decimal) -> LedgerResult<()> {
    Plan::check_rate(yearly_return).map_err(|err| LedgerError::validation(err.to_string()))
}
