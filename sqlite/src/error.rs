//! Error types for inventory storage.
//!
//! Provides a unified error type covering database access, key conflicts,
//! missing rows, and rows that no longer decode into a valid record.

use library_core::ValidationError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite database operation failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record with this book id already exists.
    #[error("Book ID already exists: {0}")]
    DuplicateKey(String),

    /// No record has this book id.
    #[error("no record found for book id: {0}")]
    NotFound(String),

    /// Stored row does not decode into a valid record.
    #[error("conversion error: {0}")]
    Conversion(String),

    /// Record rejected before reaching the database.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
