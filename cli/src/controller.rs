//! Form-and-list controller for the inventory.
//!
//! [`Controller`] owns the store, the entry form, the current selection and
//! the last rendered list. Each action validates its input, asks the user
//! through [`Dialogs`] where needed, performs one store operation, and then
//! clears the form and re-reads the list.
//!
//! # Example
//!
//! ```
//! use library_cli::{Action, Controller, Dialogs};
//! use library_sqlite::LibraryStore;
//!
//! struct AlwaysYes;
//!
//! impl Dialogs for AlwaysYes {
//!     fn confirm(&mut self, _: &str, _: &str) -> bool { true }
//!     fn ask_string(&mut self, _: &str, _: &str) -> Option<String> { None }
//!     fn show_info(&mut self, _: &str, _: &str) {}
//!     fn show_error(&mut self, _: &str, _: &str) {}
//! }
//!
//! let mut controller = Controller::new(LibraryStore::open_in_memory().unwrap()).unwrap();
//! controller.form_mut().name = "Dune".to_string();
//! controller.form_mut().set_id("B-001").unwrap();
//! controller.form_mut().author = "Frank Herbert".to_string();
//!
//! controller.run(Action::Add, &mut AlwaysYes).unwrap();
//! assert_eq!(controller.records().len(), 1);
//! assert!(controller.form().name.is_empty());
//! ```

use library_core::{BookRecord, BookStatus, BookUpdate, StatusKind};
use library_sqlite::LibraryStore;
use tracing::{debug, warn};

use crate::dialogs::Dialogs;
use crate::error::{ActionError, Result};
use crate::form::BookForm;

/// A mutating user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Add the form contents as a new record.
    Add,
    /// Overwrite the selected record with the form contents.
    Update,
    /// Delete the selected record.
    Delete,
    /// Delete every record.
    DeleteAll,
    /// Issue the selected record, or take it back if already issued.
    ToggleAvailability,
}

/// Drives the inventory from form input.
pub struct Controller {
    store: LibraryStore,
    form: BookForm,
    selection: Option<String>,
    records: Vec<BookRecord>,
}

impl Controller {
    /// Takes ownership of the store and loads the initial list.
    pub fn new(store: LibraryStore) -> Result<Self> {
        let mut controller = Self {
            store,
            form: BookForm::default(),
            selection: None,
            records: Vec::new(),
        };
        controller.refresh()?;
        Ok(controller)
    }

    /// Runs an action and reports its outcome through `ui`.
    ///
    /// Failures are shown with [`Dialogs::show_error`] and also returned so
    /// callers can inspect them. Cancellation is returned without a message.
    pub fn run(&mut self, action: Action, ui: &mut dyn Dialogs) -> Result<()> {
        let result = match action {
            Action::Add => self.add_record(ui),
            Action::Update => self.update_record(ui),
            Action::Delete => self.remove_record(ui),
            Action::DeleteAll => self.delete_inventory(ui),
            Action::ToggleAvailability => self.change_availability(ui),
        };

        if let Err(err) = &result {
            if err.is_cancelled() {
                debug!(?action, "action cancelled");
            } else {
                warn!(?action, error = %err, "action rejected");
                ui.show_error("Error", &err.to_string());
            }
        }
        result
    }

    /// Adds the form contents as a new record.
    ///
    /// Requires name, id and author. An `Issued` status asks for the
    /// borrower card. On a duplicate id the form is left as it was.
    pub fn add_record(&mut self, ui: &mut dyn Dialogs) -> Result<()> {
        let mut record = BookRecord::new(
            &self.form.name,
            self.form.id(),
            &self.form.author,
            BookStatus::Available,
        )?;
        record.status = self.status_from_form(ui)?;

        if !ui.confirm("Confirm", "Are you sure you want to add this record?") {
            return Err(ActionError::Cancelled);
        }

        self.store.insert(&record)?;
        self.clear_and_display()?;
        ui.show_info("Success", "Record added successfully");
        Ok(())
    }

    /// Overwrites the selected record with the form's name, author and status.
    ///
    /// The id always comes from the selection.
    pub fn update_record(&mut self, ui: &mut dyn Dialogs) -> Result<()> {
        let id = self.selected_id("update")?;
        let mut update = BookUpdate::new(&self.form.name, &self.form.author, BookStatus::Available)?;
        update.status = self.status_from_form(ui)?;

        self.store.update(&id, &update)?;
        self.clear_and_display()?;
        ui.show_info("Success", "Record updated successfully");
        Ok(())
    }

    /// Deletes the selected record.
    pub fn remove_record(&mut self, ui: &mut dyn Dialogs) -> Result<()> {
        let id = self.selected_id("delete")?;

        self.store.delete_one(&id)?;
        self.clear_and_display()?;
        ui.show_info("Success", "Record deleted successfully");
        Ok(())
    }

    /// Deletes every record after a single confirmation.
    pub fn delete_inventory(&mut self, ui: &mut dyn Dialogs) -> Result<()> {
        if !ui.confirm("Confirm", "Are you sure you want to delete all records?") {
            return Err(ActionError::Cancelled);
        }

        self.store.delete_all()?;
        self.clear_and_display()?;
        ui.show_info("Success", "All records deleted successfully");
        Ok(())
    }

    /// Returns an issued book or issues an available one.
    ///
    /// Uses the stored status of the selected record, not the form's.
    /// Declining the return still clears the form and selection.
    pub fn change_availability(&mut self, ui: &mut dyn Dialogs) -> Result<()> {
        let id = self.selected_id("change availability")?;
        let record = self
            .store
            .get(&id)?
            .ok_or_else(|| ActionError::UnknownBook(id.clone()))?;

        let status = if record.status.is_issued() {
            if !ui.confirm("Confirm", "Has the book been returned?") {
                self.clear_and_display()?;
                return Err(ActionError::Cancelled);
            }
            BookStatus::Available
        } else {
            ask_card_id(ui)?
        };

        self.store.set_status(&id, &status)?;
        self.clear_and_display()
    }

    /// Selects the record with `id` and loads it into the form.
    pub fn select(&mut self, id: &str) -> Result<&BookRecord> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| ActionError::UnknownBook(id.to_string()))?;
        Ok(self.select_index(index))
    }

    /// Selects the record at 1-based list position `row`.
    pub fn select_row(&mut self, row: usize) -> Result<&BookRecord> {
        if row == 0 || row > self.records.len() {
            return Err(ActionError::UnknownRow(row));
        }
        Ok(self.select_index(row - 1))
    }

    fn select_index(&mut self, index: usize) -> &BookRecord {
        let record = &self.records[index];
        self.form.load(record);
        self.selection = Some(record.id.clone());
        debug!(id = %record.id, "record selected");
        record
    }

    /// Resets the form and drops the selection.
    pub fn clear_form(&mut self) {
        self.form.clear();
        self.selection = None;
    }

    /// Re-reads the list from the store.
    ///
    /// A selection whose record is gone is dropped.
    pub fn refresh(&mut self) -> Result<()> {
        self.records = self.store.list_all()?;
        let stale = self
            .selection
            .as_deref()
            .is_some_and(|id| !self.records.iter().any(|record| record.id == id));
        if stale {
            self.clear_form();
        }
        Ok(())
    }

    fn clear_and_display(&mut self) -> Result<()> {
        self.clear_form();
        self.refresh()
    }

    fn selected_id(&self, action: &'static str) -> Result<String> {
        self.selection
            .clone()
            .ok_or(ActionError::NoSelection(action))
    }

    fn status_from_form(&self, ui: &mut dyn Dialogs) -> Result<BookStatus> {
        match self.form.status {
            StatusKind::Available => Ok(BookStatus::Available),
            StatusKind::Issued => ask_card_id(ui),
        }
    }

    /// The entry form.
    pub fn form(&self) -> &BookForm {
        &self.form
    }

    /// The entry form, for editing.
    pub fn form_mut(&mut self) -> &mut BookForm {
        &mut self.form
    }

    /// The list as last read from the store.
    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    /// The selected record, if any.
    pub fn selection(&self) -> Option<&BookRecord> {
        let id = self.selection.as_deref()?;
        self.records.iter().find(|record| record.id == id)
    }

    /// The underlying store.
    pub fn store(&self) -> &LibraryStore {
        &self.store
    }

    /// Gives the store back, e.g. to close it at shutdown.
    pub fn into_store(self) -> LibraryStore {
        self.store
    }
}

/// Asks for the borrower card id.
///
/// A dismissed prompt counts as an empty answer and is reported the same way.
fn ask_card_id(ui: &mut dyn Dialogs) -> Result<BookStatus> {
    let answer = ui
        .ask_string("Issuer Card ID", "What is the Issuer's Card ID?")
        .unwrap_or_default();
    Ok(BookStatus::issued(&answer)?)
}
