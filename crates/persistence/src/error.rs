//! # Persistence Errors
//!
//! Error types for the persistence layer, wrapping sqlx errors.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === Database errors ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: i64 },

    // === Conversion errors ===
    #[error("Invalid decimal value in {field}: {value}")]
    InvalidDecimal { field: String, value: String },

    #[error("Invalid enum value: {field} = {value}")]
    InvalidEnumValue { field: String, value: String },
}

/// Result type alias for PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Create a NotFound error
    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id,
        }
    }

    /// Create an InvalidDecimal error
    pub fn invalid_decimal(field: &str, value: &str) -> Self {
        Self::InvalidDecimal {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the underlying store reported lock contention (SQLITE_BUSY
    /// or SQLITE_LOCKED) or the pool timed out waiting for a connection.
    /// Such failures are transient: the caller may retry the whole
    /// operation.
    pub fn is_busy(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::PoolTimedOut) => true,
            Self::Database(sqlx::Error::Database(db)) => {
                matches!(db.code().as_deref(), Some("5") | Some("6"))
            }
            _ => false,
        }
    }
}
