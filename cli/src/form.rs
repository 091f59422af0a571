//! Editable form state for a single book.

use library_core::{BookRecord, StatusKind};

use crate::error::{ActionError, Result};

/// The input fields of the entry form.
///
/// Loading a record locks the id field so an update can only ever target
/// the selected row. [`clear`](Self::clear) unlocks it again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    /// Book title.
    pub name: String,
    /// Author name.
    pub author: String,
    /// Status selector (the card id is asked for when needed).
    pub status: StatusKind,
    id: String,
    id_locked: bool,
}

impl BookForm {
    /// Book id field.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets the book id field.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::IdLocked`] while a record is loaded.
    pub fn set_id(&mut self, id: impl Into<String>) -> Result<()> {
        if self.id_locked {
            return Err(ActionError::IdLocked);
        }
        self.id = id.into();
        Ok(())
    }

    /// Returns `true` while the id field is read-only.
    pub fn is_id_locked(&self) -> bool {
        self.id_locked
    }

    /// Fills the form from a record and locks the id field.
    pub fn load(&mut self, record: &BookRecord) {
        self.name = record.name.clone();
        self.id = record.id.clone();
        self.author = record.author.clone();
        self.status = record.status.kind();
        self.id_locked = true;
    }

    /// Resets every field: empty text, status `Available`, id unlocked.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
