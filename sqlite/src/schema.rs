//! SQL schema generation for the inventory table.
//!
//! The inventory is one table:
//!
//! ```text
//! Library(BK_NAME, BK_ID PRIMARY KEY, AUTHOR_NAME, BK_STATUS, CARD_ID)
//! ```
//!
//! Column names are kept as-is so existing `Library.db` files open unchanged.

/// Name of the inventory table.
pub const TABLE: &str = "Library";

/// Column list in storage order, shared by every `SELECT`.
pub(crate) const COLUMNS: &str = "BK_NAME, BK_ID, AUTHOR_NAME, BK_STATUS, CARD_ID";

/// Generates the `CREATE TABLE` statement for the inventory table.
///
/// Uses `IF NOT EXISTS` so opening an existing database is a no-op.
pub fn generate_schema_sql() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {TABLE} (\
         BK_NAME TEXT, \
         BK_ID TEXT PRIMARY KEY NOT NULL, \
         AUTHOR_NAME TEXT, \
         BK_STATUS TEXT, \
         CARD_ID TEXT\
         );"
    )
}

/// Generates SQL to drop the inventory table.
pub fn generate_drop_sql() -> String {
    format!("DROP TABLE IF EXISTS {TABLE};")
}
