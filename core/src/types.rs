//! Book record type definitions.
//!
//! This module defines the data model for the inventory: a [`BookRecord`]
//! with its lending [`BookStatus`]. The issued/available invariant is held
//! by the type itself, so a record can never be `Issued` without a card id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validate::{Field, ValidationError, require};

/// Card id placeholder stored and displayed for books that are not issued.
///
/// Never a valid borrower card id.
pub const NO_CARD: &str = "N/A";

/// Lending state of a book selected on the form, without a card id.
///
/// The form only chooses between the two states; the card id is asked for
/// separately when an action needs it.
///
/// # Examples
///
/// ```
/// use library_core::StatusKind;
///
/// assert_eq!(StatusKind::default(), StatusKind::Available);
/// assert_eq!("issued".parse::<StatusKind>().unwrap(), StatusKind::Issued);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StatusKind {
    /// On the shelf (the default).
    #[default]
    Available,
    /// Lent to a cardholder.
    Issued,
}

impl StatusKind {
    /// Stored/displayed label (`"Available"` or `"Issued"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Issued => "Issued",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "issued" => Ok(Self::Issued),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}

/// Lending status of a stored book.
///
/// # Examples
///
/// ```
/// use library_core::{BookStatus, NO_CARD};
///
/// let status = BookStatus::issued("C-1042").unwrap();
/// assert_eq!(status.card_id(), "C-1042");
///
/// assert_eq!(BookStatus::Available.card_id(), NO_CARD);
/// assert!(BookStatus::issued("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "status", try_from = "StatusRepr")]
pub enum BookStatus {
    /// On the shelf; the card id reads as [`NO_CARD`].
    #[default]
    Available,
    /// Lent to the holder of `card_id`.
    Issued {
        /// Borrower card id, non-empty and never [`NO_CARD`].
        card_id: String,
    },
}

impl BookStatus {
    /// Builds an `Issued` status for the given borrower card.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCardId`] for an empty or blank card id
    /// and [`ValidationError::ReservedCardId`] for the [`NO_CARD`] placeholder.
    pub fn issued(card_id: impl AsRef<str>) -> Result<Self, ValidationError> {
        let card_id = card_id.as_ref().trim();
        if card_id.is_empty() {
            return Err(ValidationError::EmptyCardId);
        }
        if card_id == NO_CARD {
            return Err(ValidationError::ReservedCardId(card_id.to_string()));
        }
        Ok(Self::Issued {
            card_id: card_id.to_string(),
        })
    }

    /// Rebuilds a status from its stored `(status, card id)` columns.
    ///
    /// An `Available` row ignores whatever card id it carries; the column is
    /// rewritten as [`NO_CARD`] on the next write.
    pub fn from_parts(status: &str, card_id: Option<&str>) -> Result<Self, ValidationError> {
        match status.parse::<StatusKind>()? {
            StatusKind::Available => Ok(Self::Available),
            StatusKind::Issued => Self::issued(card_id.unwrap_or_default()),
        }
    }

    /// The state without its card id.
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::Available => StatusKind::Available,
            Self::Issued { .. } => StatusKind::Issued,
        }
    }

    /// Card id column value: the borrower card, or [`NO_CARD`].
    pub fn card_id(&self) -> &str {
        match self {
            Self::Available => NO_CARD,
            Self::Issued { card_id } => card_id,
        }
    }

    /// Returns `true` if the book is currently lent out.
    pub fn is_issued(&self) -> bool {
        matches!(self, Self::Issued { .. })
    }
}

/// Wire shape of [`BookStatus`], checked through [`BookStatus::issued`].
#[derive(Deserialize)]
#[serde(tag = "status")]
enum StatusRepr {
    Available,
    Issued { card_id: String },
}

impl TryFrom<StatusRepr> for BookStatus {
    type Error = ValidationError;

    fn try_from(repr: StatusRepr) -> Result<Self, Self::Error> {
        match repr {
            StatusRepr::Available => Ok(Self::Available),
            StatusRepr::Issued { card_id } => Self::issued(card_id),
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().as_str())
    }
}

/// A single book in the inventory.
///
/// `id` is the unique key; `name` and `author` may repeat across records.
///
/// # Examples
///
/// ```
/// use library_core::{BookRecord, BookStatus};
///
/// let book = BookRecord::new("Dune", "B-001", "Frank Herbert", BookStatus::Available).unwrap();
/// assert_eq!(book.card_id(), "N/A");
///
/// assert!(BookRecord::new("", "B-002", "Anon", BookStatus::Available).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Book title.
    pub name: String,
    /// Unique book identifier.
    pub id: String,
    /// Author name.
    pub author: String,
    /// Lending status, carrying the card id when issued.
    #[serde(flatten)]
    pub status: BookStatus,
}

impl BookRecord {
    /// Creates a record, rejecting empty required fields.
    ///
    /// Fields are stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] naming the first empty field,
    /// checked in form order (name, id, author).
    pub fn new(
        name: impl AsRef<str>,
        id: impl AsRef<str>,
        author: impl AsRef<str>,
        status: BookStatus,
    ) -> Result<Self, ValidationError> {
        let name = require(Field::Name, name.as_ref())?;
        let id = require(Field::Id, id.as_ref())?;
        let author = require(Field::Author, author.as_ref())?;
        Ok(Self {
            name: name.to_string(),
            id: id.to_string(),
            author: author.to_string(),
            status,
        })
    }

    /// Card id column value for this record.
    pub fn card_id(&self) -> &str {
        self.status.card_id()
    }
}

/// Replacement values for an existing record.
///
/// Everything except the id, which identifies the row and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookUpdate {
    /// New title.
    pub name: String,
    /// New author.
    pub author: String,
    /// New lending status.
    pub status: BookStatus,
}

impl BookUpdate {
    /// Creates an update, rejecting an empty name or author.
    pub fn new(
        name: impl AsRef<str>,
        author: impl AsRef<str>,
        status: BookStatus,
    ) -> Result<Self, ValidationError> {
        let name = require(Field::Name, name.as_ref())?;
        let author = require(Field::Author, author.as_ref())?;
        Ok(Self {
            name: name.to_string(),
            author: author.to_string(),
            status,
        })
    }
}
