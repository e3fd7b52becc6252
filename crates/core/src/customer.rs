//! # Customer Module
//!
//! A customer is an account holder. Plain identity + display name,
//! no invariants beyond uniqueness of the id (enforced by storage).

use serde::{Deserialize, Serialize};
use std::fmt;

/// An account holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Storage-assigned id (monotonic integer)
    pub id: i64,
    /// Display name
    pub name: String,
}

impl Customer {
    /// Create a customer with a known id (used when loading from storage)
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer #{} ({})", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_display() {
        let alice = Customer::new(1, "Alice");
        assert_eq!(format!("{}", alice), "Customer #1 (Alice)");
    }
}
