//! Field validation for book records.
//!
//! Required text fields must be non-empty after trimming, and a borrower
//! card id must be present whenever a book is issued.
//!
//! # Examples
//!
//! ```
//! use library_core::*;
//!
//! let book = BookRecord::new("Dune", "B-001", "Frank Herbert", BookStatus::Available).unwrap();
//! assert!(validate_record(&book).is_empty());
//!
//! let mut bad = book.clone();
//! bad.author.clear();
//! assert_eq!(validate_record(&bad), vec![ValidationError::EmptyField(Field::Author)]);
//! ```

use std::fmt;

use thiserror::Error;

use crate::types::{BookRecord, BookStatus, BookUpdate, NO_CARD};

/// Required form field of a book record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Book title.
    Name,
    /// Unique book identifier.
    Id,
    /// Author name.
    Author,
}

impl Field {
    /// Human-readable label, as shown on the form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Book Name",
            Self::Id => "Book ID",
            Self::Author => "Author Name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Book record validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty or whitespace-only.
    #[error("{0} cannot be empty")]
    EmptyField(Field),
    /// An issued book has no borrower card id.
    #[error("Issuer ID cannot be empty!")]
    EmptyCardId,
    /// The card id is the placeholder used for available books.
    #[error("'{0}' is reserved and cannot be used as a card id")]
    ReservedCardId(String),
    /// Status text is neither `Available` nor `Issued`.
    #[error("unknown book status: {0}")]
    UnknownStatus(String),
}

/// Convenience alias for results with [`ValidationError`].
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Returns the trimmed value, or [`ValidationError::EmptyField`] if nothing is left.
pub fn require(field: Field, value: &str) -> Result<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed)
}

/// Validates a record whose fields were set directly.
///
/// Returns every problem found, in field order. An empty vector means the
/// record can be stored.
pub fn validate_record(record: &BookRecord) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (field, value) in [
        (Field::Name, record.name.as_str()),
        (Field::Id, record.id.as_str()),
        (Field::Author, record.author.as_str()),
    ] {
        if let Err(err) = require(field, value) {
            errors.push(err);
        }
    }

    errors.extend(check_status(&record.status));
    errors
}

/// Validates an update whose fields were set directly.
///
/// Same rules as [`validate_record`], without the id.
pub fn validate_update(update: &BookUpdate) -> Vec<ValidationError> {
    let mut errors: Vec<_> = [
        (Field::Name, update.name.as_str()),
        (Field::Author, update.author.as_str()),
    ]
    .into_iter()
    .filter_map(|(field, value)| require(field, value).err())
    .collect();

    errors.extend(check_status(&update.status));
    errors
}

fn check_status(status: &BookStatus) -> Option<ValidationError> {
    let BookStatus::Issued { card_id } = status else {
        return None;
    };
    if card_id.trim().is_empty() {
        Some(ValidationError::EmptyCardId)
    } else if card_id.trim() == NO_CARD {
        Some(ValidationError::ReservedCardId(card_id.clone()))
    } else {
        None
    }
}
