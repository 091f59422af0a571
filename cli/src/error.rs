//! Errors raised by user actions.
//!
//! Every variant is recoverable: the controller shows the message and the
//! session carries on.

use library_core::ValidationError;
use library_sqlite::StoreError;
use thiserror::Error;

/// Why a user action stopped before (or while) touching the store.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A required field or the borrower card id is empty.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Adding a book whose id is already in the inventory.
    #[error("Book ID already exists!")]
    DuplicateKey(String),

    /// The action needs a selected record and none is selected.
    #[error("Please select a record to {0}")]
    NoSelection(&'static str),

    /// The book id is not in the current list.
    #[error("No record with Book ID '{0}'")]
    UnknownBook(String),

    /// The list has no row at this position.
    #[error("No row #{0} in the list")]
    UnknownRow(usize),

    /// The id field is read-only while a record is selected.
    #[error("Book ID cannot be changed while a record is selected")]
    IdLocked,

    /// The user declined a confirmation.
    #[error("cancelled")]
    Cancelled,

    /// Storage failure other than a key conflict.
    #[error(transparent)]
    Store(StoreError),
}

impl ActionError {
    /// Returns `true` when the action stopped because the user backed out.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<StoreError> for ActionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(id) => Self::DuplicateKey(id),
            StoreError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

/// Convenience alias for results with [`ActionError`].
pub type Result<T> = std::result::Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_duplicate_maps_to_duplicate_key() {
        let err: ActionError = StoreError::DuplicateKey("B1".to_string()).into();
        assert!(matches!(err, ActionError::DuplicateKey(ref id) if id == "B1"));
        assert_eq!(err.to_string(), "Book ID already exists!");
    }

    #[test]
    fn test_store_validation_maps_to_validation() {
        let err: ActionError = StoreError::Validation(ValidationError::EmptyCardId).into();
        assert!(matches!(err, ActionError::Validation(_)));
    }

    #[test]
    fn test_store_not_found_stays_store_error() {
        let err: ActionError = StoreError::NotFound("B1".to_string()).into();
        assert!(matches!(err, ActionError::Store(StoreError::NotFound(_))));
    }

    #[test]
    fn test_no_selection_message() {
        assert_eq!(
            ActionError::NoSelection("update").to_string(),
            "Please select a record to update"
        );
    }
}
