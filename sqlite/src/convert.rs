//! Conversion between [`BookRecord`] and `Library` table rows.
//!
//! The status enum is stored as two text columns: `BK_STATUS`
//! (`Available`/`Issued`) and `CARD_ID` (the borrower card, or `N/A`).

use library_core::{BookRecord, BookStatus};
use rusqlite::Row;

use crate::error::{Result, StoreError};

/// Converts a [`BookStatus`] into its `(BK_STATUS, CARD_ID)` column values.
pub(crate) fn status_to_columns(status: &BookStatus) -> (&'static str, &str) {
    (status.kind().as_str(), status.card_id())
}

/// Raw column values of one `Library` row, read in [`COLUMNS`](crate::schema::COLUMNS) order.
///
/// Every column except the key is nullable in the table definition, so
/// nothing is assumed until [`into_record`](Self::into_record) checks it.
pub(crate) struct RawRow {
    name: Option<String>,
    id: String,
    author: Option<String>,
    status: Option<String>,
    card_id: Option<String>,
}

impl RawRow {
    /// Reads a row selected with [`COLUMNS`](crate::schema::COLUMNS).
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            id: row.get(1)?,
            author: row.get(2)?,
            status: row.get(3)?,
            card_id: row.get(4)?,
        })
    }

    /// Rebuilds the record, rejecting rows that break the status invariant.
    ///
    /// Text columns are kept exactly as stored, so the id still matches its
    /// row on the next write. Older databases may hold blank names or
    /// authors; those are read as they are so the row can be fixed or
    /// deleted.
    pub(crate) fn into_record(self) -> Result<BookRecord> {
        let id = self.id;
        if id.trim().is_empty() {
            return Err(StoreError::Conversion("book with a blank id".to_string()));
        }
        let status = BookStatus::from_parts(
            self.status.as_deref().unwrap_or_default(),
            self.card_id.as_deref(),
        )
        .map_err(|e| StoreError::Conversion(format!("book '{id}': {e}")))?;

        Ok(BookRecord {
            name: self.name.unwrap_or_default(),
            id,
            author: self.author.unwrap_or_default(),
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: Option<&str>, card_id: Option<&str>) -> RawRow {
        RawRow {
            name: Some("Emma".to_string()),
            id: "B1".to_string(),
            author: Some("Jane Austen".to_string()),
            status: status.map(String::from),
            card_id: card_id.map(String::from),
        }
    }

    #[test]
    fn test_status_to_columns() {
        assert_eq!(status_to_columns(&BookStatus::Available), ("Available", "N/A"));
        let issued = BookStatus::issued("C5").unwrap();
        assert_eq!(status_to_columns(&issued), ("Issued", "C5"));
    }

    #[test]
    fn test_available_row() {
        let record = raw(Some("Available"), Some("N/A")).into_record().unwrap();
        assert_eq!(record.status, BookStatus::Available);
        assert_eq!(record.name, "Emma");
    }

    #[test]
    fn test_issued_row_keeps_card() {
        let record = raw(Some("Issued"), Some("C5")).into_record().unwrap();
        assert_eq!(record.card_id(), "C5");
    }

    #[test]
    fn test_issued_row_without_card_is_rejected() {
        let err = raw(Some("Issued"), Some("N/A")).into_record().unwrap_err();
        assert!(matches!(err, StoreError::Conversion(msg) if msg.contains("B1")));
    }

    #[test]
    fn test_null_status_is_rejected() {
        assert!(raw(None, None).into_record().is_err());
    }

    #[test]
    fn test_null_name_reads_as_empty() {
        let mut row = raw(Some("Available"), None);
        row.name = None;
        let record = row.into_record().unwrap();
        assert!(record.name.is_empty());
        assert_eq!(record.author, "Jane Austen");
    }

    #[test]
    fn test_padded_id_is_kept_as_stored() {
        let mut row = raw(Some("Available"), Some("N/A"));
        row.id = " B3".to_string();
        row.name = Some(" Emma ".to_string());
        let record = row.into_record().unwrap();
        assert_eq!(record.id, " B3");
        assert_eq!(record.name, " Emma ");
    }

    #[test]
    fn test_blank_id_is_rejected() {
        let mut row = raw(Some("Available"), None);
        row.id = "  ".to_string();
        assert!(matches!(row.into_record(), Err(StoreError::Conversion(_))));
    }
}
