//! Error types for store operations.

use thiserror::Error;

/// Errors that a contact store can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The addressed record does not exist (or no longer exists).
    #[error("contact not found: {id}")]
    NotFound { id: String },

    /// The store could not be reached or the call did not complete.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write.
    #[error("write rejected: {0}")]
    Rejected(String),

    /// A stored document could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Shorthand for a [`StoreError::NotFound`] on the given id.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Whether this error means the addressed record is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StoreError::not_found("abc123");
        assert_eq!(err.to_string(), "contact not found: abc123");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_other_errors_are_not_not_found() {
        assert!(!StoreError::Unavailable("offline".to_string()).is_not_found());
        assert!(!StoreError::Rejected("quota".to_string()).is_not_found());
    }
}
