//! Blocking dialogs the controller talks to the user through.
//!
//! Each call returns only after the user has answered, so actions read as
//! straight-line code: a declined confirmation is `false` and a dismissed
//! prompt is `None`.

/// User-facing confirm/prompt/message surface.
pub trait Dialogs {
    /// Asks a yes/no question. `false` when declined or dismissed.
    fn confirm(&mut self, title: &str, message: &str) -> bool;

    /// Asks for a line of text. `None` when dismissed.
    fn ask_string(&mut self, title: &str, prompt: &str) -> Option<String>;

    /// Shows a success or informational message.
    fn show_info(&mut self, title: &str, message: &str);

    /// Shows an error message.
    fn show_error(&mut self, title: &str, message: &str);
}
