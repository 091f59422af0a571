//! Book record storage backed by a single SQLite table.
//!
//! Provides [`LibraryStore`] for create/read/update/delete operations on
//! the `Library` table. Every mutation is committed before the call
//! returns, so a following [`list_all`](LibraryStore::list_all) always
//! sees it.
//!
//! # Example
//!
//! ```no_run
//! use library_core::{BookRecord, BookStatus};
//! use library_sqlite::LibraryStore;
//!
//! let store = LibraryStore::open("Library.db").unwrap();
//!
//! let book = BookRecord::new("Dune", "B-001", "Frank Herbert", BookStatus::Available).unwrap();
//! store.insert(&book).unwrap();
//!
//! store.set_status("B-001", &BookStatus::issued("C-1042").unwrap()).unwrap();
//! assert!(store.get("B-001").unwrap().unwrap().status.is_issued());
//!
//! store.delete_one("B-001").unwrap();
//! ```

use std::path::Path;

use library_core::{BookRecord, BookStatus, BookUpdate, ValidationError, validate_record, validate_update};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use tracing::{debug, info, warn};

use crate::convert::{RawRow, status_to_columns};
use crate::error::{Result, StoreError};
use crate::migration::{self, StoreStatus};
use crate::schema::{COLUMNS, TABLE};

/// Owned handle to the inventory database.
///
/// Opening a store creates the `Library` table when it is missing. The
/// connection lives as long as the store and is released by
/// [`close`](Self::close) or on drop.
///
/// # Examples
///
/// ```
/// use library_core::{BookRecord, BookStatus};
/// use library_sqlite::{LibraryStore, StoreError};
///
/// let store = LibraryStore::open_in_memory().unwrap();
/// let book = BookRecord::new("Emma", "B1", "Jane Austen", BookStatus::Available).unwrap();
///
/// store.insert(&book).unwrap();
/// assert!(matches!(store.insert(&book), Err(StoreError::DuplicateKey(_))));
/// assert_eq!(store.list_all().unwrap(), vec![book]);
/// ```
pub struct LibraryStore {
    conn: Connection,
}

impl LibraryStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening inventory database");
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wraps an existing connection, creating the table if needed.
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        migration::up(&mut conn)?;
        Ok(Self { conn })
    }

    /// Loads every record in insertion order.
    ///
    /// Rows that cannot be read as a record (unknown status, issued without
    /// a card, blank id) are skipped with a warning; [`get`](Self::get)
    /// still reports them as [`StoreError::Conversion`].
    pub fn list_all(&self) -> Result<Vec<BookRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY rowid"))?;

        let rows: Vec<RawRow> = stmt
            .query_map([], RawRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let records: Vec<BookRecord> = rows
            .into_iter()
            .filter_map(|row| match row.into_record() {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable row");
                    None
                }
            })
            .collect();
        debug!(count = records.len(), "listed inventory");
        Ok(records)
    }

    /// Loads one record by book id.
    ///
    /// Returns `None` if no record has that id.
    pub fn get(&self, id: &str) -> Result<Option<BookRecord>> {
        let raw = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM {TABLE} WHERE BK_ID = ?1"),
                params![id],
                RawRow::from_row,
            )
            .optional()?;
        raw.map(RawRow::into_record).transpose()
    }

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if a record with the same id
    /// already exists, and [`StoreError::Validation`] if the record has an
    /// empty required field or an issued status without a card.
    pub fn insert(&self, record: &BookRecord) -> Result<()> {
        reject_invalid(validate_record(record))?;
        let (status, card_id) = status_to_columns(&record.status);

        let inserted = self.conn.execute(
            &format!("INSERT INTO {TABLE} ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            params![record.name, record.id, record.author, status, card_id],
        );

        match inserted {
            Ok(_) => {
                info!(id = %record.id, status, "record added");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
                    && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                Err(StoreError::DuplicateKey(record.id.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Overwrites name, author, status and card id of the record with `id`.
    ///
    /// The id itself never changes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that id, and
    /// [`StoreError::Validation`] if the update has an empty name or author
    /// or an issued status without a card.
    pub fn update(&self, id: &str, update: &BookUpdate) -> Result<()> {
        reject_invalid(validate_update(update))?;
        let (status, card_id) = status_to_columns(&update.status);
        let rows = self.conn.execute(
            &format!(
                "UPDATE {TABLE} SET BK_NAME = ?1, AUTHOR_NAME = ?2, BK_STATUS = ?3, CARD_ID = ?4 \
                 WHERE BK_ID = ?5"
            ),
            params![update.name, update.author, status, card_id, id],
        )?;
        ensure_found(rows, id)?;
        info!(id, status, "record updated");
        Ok(())
    }

    /// Overwrites only the status and card id of the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that id.
    pub fn set_status(&self, id: &str, status: &BookStatus) -> Result<()> {
        let (label, card_id) = status_to_columns(status);
        let rows = self.conn.execute(
            &format!("UPDATE {TABLE} SET BK_STATUS = ?1, CARD_ID = ?2 WHERE BK_ID = ?3"),
            params![label, card_id, id],
        )?;
        ensure_found(rows, id)?;
        info!(id, status = label, card_id, "availability changed");
        Ok(())
    }

    /// Deletes the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that id.
    pub fn delete_one(&self, id: &str) -> Result<()> {
        let rows = self.conn.execute(
            &format!("DELETE FROM {TABLE} WHERE BK_ID = ?1"),
            params![id],
        )?;
        ensure_found(rows, id)?;
        info!(id, "record deleted");
        Ok(())
    }

    /// Deletes every record and returns how many were removed.
    ///
    /// Succeeds on an empty table.
    pub fn delete_all(&self) -> Result<usize> {
        let rows = self.conn.execute(&format!("DELETE FROM {TABLE}"), [])?;
        info!(count = rows, "inventory cleared");
        Ok(rows)
    }

    /// Returns the number of stored records.
    pub fn count(&self) -> Result<usize> {
        Ok(self.status()?.record_count)
    }

    /// Returns table presence and record counts.
    pub fn status(&self) -> Result<StoreStatus> {
        migration::status(&self.conn)
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection, reporting any error from SQLite.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err.into())
    }
}

fn reject_invalid(errors: Vec<ValidationError>) -> Result<()> {
    match errors.into_iter().next() {
        Some(err) => Err(StoreError::Validation(err)),
        None => Ok(()),
    }
}

fn ensure_found(rows: usize, id: &str) -> Result<()> {
    if rows == 0 {
        return Err(StoreError::NotFound(id.to_string()));
    }
    Ok(())
}
