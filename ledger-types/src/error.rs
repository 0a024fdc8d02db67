//! Error types for the ledger.

use crate::domain::{Step, TransactionId};

/// Domain-level errors (business rule violations and integrity faults).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Amount overflows the minor-unit range")]
    AmountOverflow,

    #[error("Unknown transaction variant: {0}")]
    UnknownTransactionVariant(String),

    #[error("Unknown step: {0}")]
    UnknownStep(String),

    #[error("Illegal step transition: {from} -> {to}")]
    InvalidStepTransition { from: Step, to: Step },

    #[error("Transaction graph contains a cycle at {0}")]
    CyclicTransactionGraph(TransactionId),

    #[error("Parent transaction belongs to a different service")]
    ParentServiceMismatch,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Store-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Errors surfaced to the query layer.
///
/// Integrity faults keep their own variants so callers can tell them
/// apart from plain bad input; provider failures never appear here,
/// they are absorbed at the capability boundary.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Illegal step transition: {from} -> {to}")]
    InvalidStepTransition { from: Step, to: Step },

    #[error("Transaction graph contains a cycle at {0}")]
    CyclicTransactionGraph(TransactionId),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for LedgerError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidStepTransition { from, to } => {
                LedgerError::InvalidStepTransition { from, to }
            }
            DomainError::CyclicTransactionGraph(id) => LedgerError::CyclicTransactionGraph(id),
            e => LedgerError::BadRequest(e.to_string()),
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(e) => e.into(),
            StoreError::NotFound => LedgerError::NotFound("Resource not found".into()),
            StoreError::Conflict(e) => LedgerError::Conflict(e),
            StoreError::Backend(e) => LedgerError::Internal(e),
        }
    }
}
