//! # Plan Module
//!
//! A Plan is a named interest-rate tier: accounts reference a plan, and
//! withdrawals use the plan's annual yield at withdrawal time. Editing a
//! plan therefore changes future interest for every account still open
//! against it - there is no per-account rate snapshot.

use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named interest-rate tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Storage-assigned id (monotonic integer)
    pub id: i64,
    /// Tier name (e.g. "Silver 6M")
    pub name: String,
    /// Annual yield in percent (e.g. 6 for 6% p.a.), non-negative
    pub yearly_return: Decimal,
}

impl Plan {
    /// Create a plan with a known id (used when loading from storage)
    pub fn new(id: i64, name: impl Into<String>, yearly_return: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            yearly_return,
        }
    }

    /// Check that an annual yield is valid before a plan carries it.
    pub fn check_rate(yearly_return: Decimal) -> Result<(), CoreError> {
        if yearly_return < Decimal::ZERO {
            return Err(CoreError::NegativeRate(yearly_return));
        }
        Ok(())
    }

    /// Check domain invariants: the annual yield must not be negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        Self::check_rate(self.yearly_return)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plan #{} ({}, {}% p.a.)", self.id, self.name, self.yearly_return)
    }
}
