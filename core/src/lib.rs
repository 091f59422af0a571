//! Core types for the library inventory.
//!
//! This crate defines the single entity the inventory tracks:
//!
//! - [`BookRecord`] — a book with its unique id, title, author and status.
//! - [`BookStatus`] — `Available`, or `Issued` to a borrower card.
//! - [`StatusKind`] — the two states as chosen on the form, without a card.
//! - [`BookUpdate`] — replacement values for an existing record.
//!
//! Validation ([`require`], [`validate_record`], [`validate_update`]) rejects
//! empty required fields and issued books without a card id.
//!
//! # Example
//!
//! ```
//! use library_core::*;
//!
//! let mut book = BookRecord::new("Dune", "B-001", "Frank Herbert", BookStatus::Available).unwrap();
//! assert_eq!(book.card_id(), NO_CARD);
//!
//! book.status = BookStatus::issued("C-1042").unwrap();
//! assert_eq!(book.status.kind(), StatusKind::Issued);
//! assert!(validate_record(&book).is_empty());
//! ```

mod types;
mod validate;

pub use types::*;
pub use validate::{Field, ValidationError, require, validate_record, validate_update};
