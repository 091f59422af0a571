//! Interactive terminal session.
//!
//! The shell plays the part of the application window: the form is edited
//! with field commands, the list is printed as a table after every change,
//! and dialogs are answered on the prompt line.

use std::io::{self, Write};
use std::str::FromStr;

use library_core::StatusKind;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::controller::{Action, Controller};
use crate::dialogs::Dialogs;
use crate::render::{render_form, render_table};

/// Help text listing every shell command.
pub const HELP: &str = "\
Commands:
  list                     show all records
  select <id> | #<row>     select a record and load it into the form
  name <text>              set Book Name
  id <text>                set Book ID (not while a record is selected)
  author <text>            set Author Name
  status available|issued  set Status
  form                     show the form
  add                      add the form as a new record
  update                   update the selected record from the form
  delete                   delete the selected record
  delete-all               delete every record
  toggle                   issue or return the selected record
  clear                    clear the form and selection
  stats                    show record counts
  help                     show this help
  quit                     leave the shell
";

/// How a selection names its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// By book id.
    Id(String),
    /// By 1-based position in the list.
    Row(usize),
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Select(Selector),
    Name(String),
    Id(String),
    Author(String),
    Status(StatusKind),
    Form,
    Action(Action),
    Clear,
    Stats,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "select" | "sel" => Self::Select(parse_selector(rest)?),
            "name" => Self::Name(rest.to_string()),
            "id" => Self::Id(rest.to_string()),
            "author" => Self::Author(rest.to_string()),
            "status" => Self::Status(rest.parse::<StatusKind>().map_err(|e| e.to_string())?),
            "form" => Self::Form,
            "add" => Self::Action(Action::Add),
            "update" => Self::Action(Action::Update),
            "delete" | "rm" => Self::Action(Action::Delete),
            "delete-all" => Self::Action(Action::DeleteAll),
            "toggle" | "availability" => Self::Action(Action::ToggleAvailability),
            "clear" => Self::Clear,
            "stats" => Self::Stats,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(command)
    }
}

fn parse_selector(rest: &str) -> Result<Selector, String> {
    if rest.is_empty() {
        return Err("select needs a book id or #row".to_string());
    }
    match rest.strip_prefix('#') {
        Some(row) => row
            .parse()
            .map(Selector::Row)
            .map_err(|_| format!("invalid row number '{row}'")),
        None => Ok(Selector::Id(rest.to_string())),
    }
}

/// Whether the session continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Executes one command, writing listings to `out`.
///
/// Action failures have already been shown through `ui`; they do not end
/// the session.
pub fn execute(
    controller: &mut Controller,
    command: ShellCommand,
    ui: &mut dyn Dialogs,
    out: &mut dyn Write,
) -> io::Result<Flow> {
    match command {
        ShellCommand::List => {
            if let Err(err) = controller.refresh() {
                ui.show_error("Error", &err.to_string());
            }
            print_list(controller, out)?;
        }
        ShellCommand::Select(selector) => {
            let selected = match &selector {
                Selector::Id(id) => controller.select(id).map(|_| ()),
                Selector::Row(row) => controller.select_row(*row).map(|_| ()),
            };
            match selected {
                Ok(()) => write!(out, "{}", render_form(controller.form()))?,
                Err(err) => ui.show_error("Error", &err.to_string()),
            }
        }
        ShellCommand::Name(name) => controller.form_mut().name = name,
        ShellCommand::Id(id) => {
            if let Err(err) = controller.form_mut().set_id(id) {
                ui.show_error("Error", &err.to_string());
            }
        }
        ShellCommand::Author(author) => controller.form_mut().author = author,
        ShellCommand::Status(status) => controller.form_mut().status = status,
        ShellCommand::Form => write!(out, "{}", render_form(controller.form()))?,
        ShellCommand::Action(action) => {
            // Failures are reported by the controller itself.
            if controller.run(action, ui).is_ok() {
                print_list(controller, out)?;
            }
        }
        ShellCommand::Clear => controller.clear_form(),
        ShellCommand::Stats => match controller.store().status() {
            Ok(status) => writeln!(
                out,
                "{} record(s): {} available, {} issued",
                status.record_count,
                status.available_count(),
                status.issued_count
            )?,
            Err(err) => ui.show_error("Error", &err.to_string()),
        },
        ShellCommand::Help => write!(out, "{HELP}")?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn print_list(controller: &Controller, out: &mut dyn Write) -> io::Result<()> {
    let selected = controller.selection().map(|record| record.id.as_str());
    write!(out, "{}", render_table(controller.records(), selected))
}

/// Dialogs answered on the terminal through a line editor.
pub struct TerminalDialogs {
    editor: DefaultEditor,
}

impl TerminalDialogs {
    /// Creates the line editor.
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    /// Reads the next command line. `None` on Ctrl-C or Ctrl-D.
    pub fn read_command(&mut self) -> rustyline::Result<Option<String>> {
        match self.editor.readline("library> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn prompt(&mut self, prompt: &str) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Some(line),
            Err(err) => {
                debug!(error = %err, "prompt dismissed");
                None
            }
        }
    }
}

impl Dialogs for TerminalDialogs {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self.prompt(&format!("[{title}] {message} [y/N] "))
            .is_some_and(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn ask_string(&mut self, title: &str, prompt: &str) -> Option<String> {
        self.prompt(&format!("[{title}] {prompt} "))
    }

    fn show_info(&mut self, title: &str, message: &str) {
        println!("[{title}] {message}");
    }

    fn show_error(&mut self, title: &str, message: &str) {
        eprintln!("[{title}] {message}");
    }
}

/// Runs the session until `quit`, Ctrl-C or Ctrl-D.
pub fn run(controller: &mut Controller, dialogs: &mut TerminalDialogs) -> Result<(), String> {
    let mut stdout = io::stdout();
    println!("LIBRARY MANAGEMENT SYSTEM  (type 'help' for commands)");
    print_list(controller, &mut stdout).map_err(|e| format!("Failed to write output: {e}"))?;

    while let Some(line) = dialogs
        .read_command()
        .map_err(|e| format!("Failed to read input: {e}"))?
    {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(message) => {
                dialogs.show_error("Error", &message);
                continue;
            }
        };
        let flow = execute(controller, command, dialogs, &mut stdout)
            .map_err(|e| format!("Failed to write output: {e}"))?;
        stdout
            .flush()
            .map_err(|e| format!("Failed to write output: {e}"))?;
        if flow == Flow::Quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_commands_keep_inner_spaces() {
        assert_eq!(
            "name  The Left Hand of Darkness ".parse::<ShellCommand>().unwrap(),
            ShellCommand::Name("The Left Hand of Darkness".to_string())
        );
        assert_eq!(
            "author Ursula K. Le Guin".parse::<ShellCommand>().unwrap(),
            ShellCommand::Author("Ursula K. Le Guin".to_string())
        );
    }

    #[test]
    fn test_parse_select() {
        assert_eq!(
            "select B-7".parse::<ShellCommand>().unwrap(),
            ShellCommand::Select(Selector::Id("B-7".to_string()))
        );
        assert_eq!(
            "select #3".parse::<ShellCommand>().unwrap(),
            ShellCommand::Select(Selector::Row(3))
        );
        assert!("select #x".parse::<ShellCommand>().is_err());
        assert!("select".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(
            "status Issued".parse::<ShellCommand>().unwrap(),
            ShellCommand::Status(StatusKind::Issued)
        );
        assert!("status lost".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            "ADD".parse::<ShellCommand>().unwrap(),
            ShellCommand::Action(Action::Add)
        );
        assert_eq!(
            "delete-all".parse::<ShellCommand>().unwrap(),
            ShellCommand::Action(Action::DeleteAll)
        );
        assert_eq!(
            "toggle".parse::<ShellCommand>().unwrap(),
            ShellCommand::Action(Action::ToggleAvailability)
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = "frobnicate".parse::<ShellCommand>().unwrap_err();
        assert!(err.contains("frobnicate"));
        assert!("   ".parse::<ShellCommand>().is_err());
    }
}
