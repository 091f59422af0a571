//! Table lifecycle for the inventory database.
//!
//! [`up`] creates the `Library` table if it is missing and runs every time
//! a store is opened. [`down`] drops it. [`status`] reports whether the
//! table exists and how many books it holds.

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;
use crate::schema::{TABLE, generate_drop_sql, generate_schema_sql};

/// Creates the inventory table.
///
/// Safe to call on a database that already has it.
pub fn up(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(&generate_schema_sql())?;
    tx.commit()?;
    debug!(table = TABLE, "inventory table ready");
    Ok(())
}

/// Drops the inventory table and every record in it.
pub fn down(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(&generate_drop_sql())?;
    tx.commit()?;
    debug!(table = TABLE, "inventory table dropped");
    Ok(())
}

/// Returns the current state of the inventory table.
pub fn status(conn: &Connection) -> Result<StoreStatus> {
    if !table_exists(conn)? {
        return Ok(StoreStatus::default());
    }

    let (record_count, issued_count): (i64, i64) = conn.query_row(
        &format!(
            "SELECT COUNT(*), COALESCE(SUM(BK_STATUS = 'Issued'), 0) FROM {TABLE}"
        ),
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(StoreStatus {
        table_exists: true,
        record_count: record_count as usize,
        issued_count: issued_count as usize,
    })
}

fn table_exists(conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
        [TABLE],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Snapshot of the inventory table.
///
/// Returned by [`status`] and [`LibraryStore::status`](crate::LibraryStore::status).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    /// Whether the `Library` table exists.
    pub table_exists: bool,
    /// Number of books stored.
    pub record_count: usize,
    /// Number of books currently issued.
    pub issued_count: usize,
}

impl StoreStatus {
    /// Number of books on the shelf.
    pub fn available_count(&self) -> usize {
        self.record_count - self.issued_count
    }
}
