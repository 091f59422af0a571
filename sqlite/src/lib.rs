//! SQLite storage for the library inventory.
//!
//! This crate keeps [`BookRecord`](library_core::BookRecord)s in a single
//! `Library` table with the book id as primary key. It creates the table on
//! open, converts between records and rows, and maps key conflicts to
//! [`StoreError::DuplicateKey`].
//!
//! # Architecture
//!
//! - **`schema`** — `CREATE`/`DROP` statements for the `Library` table
//! - **`migration`** — table lifecycle (up/down/status)
//! - **`convert`** — `BookRecord` ↔ row transformations
//! - **`store`** — [`LibraryStore`], the CRUD interface
//!
//! # Quick start
//!
//! ```
//! use library_core::{BookRecord, BookStatus};
//! use library_sqlite::LibraryStore;
//!
//! let store = LibraryStore::open_in_memory().unwrap();
//! store
//!     .insert(&BookRecord::new("Dune", "B-001", "Frank Herbert", BookStatus::Available).unwrap())
//!     .unwrap();
//!
//! let status = store.status().unwrap();
//! assert_eq!(status.record_count, 1);
//! assert_eq!(status.issued_count, 0);
//!
//! assert_eq!(store.delete_all().unwrap(), 1);
//! assert!(store.list_all().unwrap().is_empty());
//! ```

mod convert;
mod error;
pub mod migration;
mod schema;
mod store;

pub use error::{Result, StoreError};
pub use migration::StoreStatus;
pub use schema::{TABLE, generate_drop_sql, generate_schema_sql};
pub use store::LibraryStore;
