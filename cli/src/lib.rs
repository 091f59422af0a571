//! Form-and-list front end for the library inventory.
//!
//! - [`Controller`] — runs add/update/delete/toggle actions against a
//!   [`LibraryStore`](library_sqlite::LibraryStore) and keeps the list fresh.
//! - [`BookForm`] — the editable entry form.
//! - [`Dialogs`] — blocking confirm/prompt/message calls.
//! - [`shell`] — the interactive terminal session behind the `library` binary.

mod controller;
mod dialogs;
mod error;
mod form;
pub mod render;
pub mod shell;

pub use controller::{Action, Controller};
pub use dialogs::Dialogs;
pub use error::{ActionError, Result};
pub use form::BookForm;
