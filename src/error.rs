//! Error types shared by the store, the HTTP layer and the operator shell

use thiserror::Error;

/// A mutation was refused before touching the stored question
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("time_left must be non-negative")]
    NegativeDuration,

    #[error("time_left must be a finite number of seconds")]
    InvalidDuration,

    #[error("invalid type '{0}'. Must be one of: pomoc, rozstrel, waiting, end")]
    UnknownType(String),

    #[error("question text must not be empty")]
    EmptyText,

    #[error("invalid request body: {0}")]
    MalformedBody(String),
}

/// Failures of the state store itself
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to lock question state: {0}")]
    Poisoned(String),
}
