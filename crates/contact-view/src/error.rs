//! Error types for view operations.

use contact_core::{StoreError, ValidationError};
use thiserror::Error;

/// Errors reported by engine operations.
///
/// Each error belongs to the single operation that produced it; none of them
/// invalidate previously loaded state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The collection scan (or a single-record read) failed.
    #[error("failed to fetch contacts: {0}")]
    FetchFailed(String),

    /// The target record of a read, update, or delete is missing.
    #[error("contact not found: {0}")]
    RecordNotFound(String),

    /// The store rejected a create, update, or delete.
    #[error("failed to save contact: {0}")]
    WriteFailed(String),

    /// A required field is missing or malformed; nothing was written.
    #[error("invalid contact: {0}")]
    ValidationFailed(#[from] ValidationError),
}

impl ViewError {
    /// Map a store error raised by a read.
    pub(crate) fn from_read(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Self::RecordNotFound(id),
            other => Self::FetchFailed(other.to_string()),
        }
    }

    /// Map a store error raised by a write.
    pub(crate) fn from_write(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Self::RecordNotFound(id),
            other => Self::WriteFailed(other.to_string()),
        }
    }
}
