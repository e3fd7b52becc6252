//! Ledger layer errors
//!
//! The taxonomy callers match on: `NotFound`, `InvalidState` and
//! `Validation` are clean rejections; `Transient` means the store timed
//! out under contention and the whole operation may be retried. Every
//! failure leaves storage untouched - the engine commits all-or-nothing.

use depobank_core::CoreError;
use depobank_persistence::PersistenceError;
use thiserror::Error;

/// Ledger operation errors
#[derive(Debug, Error)]
pub enum LedgerError {
    // === Lookup errors ===
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: i64 },

    // === Precondition errors ===
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("validation error: {0}")]
    Validation(String),

    // === Store contention ===
    #[error("transient storage failure: {0}")]
    Transient(String),

    // === Wrapped errors ===
    #[error("persistence error: {0}")]
    Persistence(#[source] PersistenceError),

    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    /// Create a NotFound error
    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id,
        }
    }

    /// Create an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this is a not-found rejection
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this failure is worth retrying as a whole operation
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

impl From<PersistenceError> for LedgerError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { entity, id } => Self::NotFound { entity, id },
            err if err.is_busy() => Self::Transient(err.to_string()),
            err => Self::Persistence(err),
        }
    }
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        Self::from(PersistenceError::from(err))
    }
}
