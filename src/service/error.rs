//! Error types for entity service operations.

use thiserror::Error;

use crate::entity::StoreError;
use crate::validate::ValidationError;

/// Coarse classification of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    NotFoundMany,
    DuplicateKey,
    FieldRequired,
    InvalidField,
    Unknown,
}

/// Error type for service operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Input rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Store rejected the operation.
    #[error(transparent)]
    Store(StoreError),
    /// Unexpected failure (e.g. a poisoned lock).
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::LockPoisoned(_) => ServiceError::Unknown(err.to_string()),
            other => ServiceError::Store(other),
        }
    }
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(ValidationError::FieldRequired { .. }) => {
                ErrorKind::FieldRequired
            }
            ServiceError::Validation(ValidationError::InvalidField { .. }) => {
                ErrorKind::InvalidField
            }
            ServiceError::Store(StoreError::NotFound { .. }) => ErrorKind::NotFound,
            ServiceError::Store(StoreError::NotFoundMany { .. }) => ErrorKind::NotFoundMany,
            ServiceError::Store(StoreError::DuplicateKey { .. }) => ErrorKind::DuplicateKey,
            ServiceError::Store(StoreError::IdsExhausted { .. })
            | ServiceError::Store(StoreError::LockPoisoned(_))
            | ServiceError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::NotFound | ErrorKind::NotFoundMany => 404,
            ErrorKind::DuplicateKey => 409,
            ErrorKind::FieldRequired => 400,
            ErrorKind::InvalidField => 422,
            ErrorKind::Unknown => 500,
        }
    }
}
