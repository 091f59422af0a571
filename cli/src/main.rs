use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use library_cli::Controller;
use library_cli::render::{OutputFormat, format_records};
use library_cli::shell::{self, TerminalDialogs};
use library_sqlite::LibraryStore;
use tracing_subscriber::EnvFilter;

/// Database file used when neither `--db` nor `LIBRARY_DB` is given.
const DEFAULT_DB_PATH: &str = "Library.db";

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Table,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Table => Self::Table,
            CliOutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "library")]
#[command(about = "Library book inventory: add, update, issue and return books")]
struct Cli {
    /// Database file path.
    #[arg(long, env = "LIBRARY_DB", default_value = DEFAULT_DB_PATH, global = true)]
    db: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the interactive inventory session (the default).
    Shell,
    /// Print the inventory once and exit.
    List(ListArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => run_shell(&cli.db),
        Command::List(args) => run_list(&cli.db, args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(db: &Path) -> Result<LibraryStore, String> {
    LibraryStore::open(db)
        .map_err(|e| format!("Failed to open database '{}': {e}", db.display()))
}

fn run_shell(db: &Path) -> Result<(), String> {
    let store = open_store(db)?;
    let mut controller =
        Controller::new(store).map_err(|e| format!("Failed to load records: {e}"))?;
    let mut dialogs =
        TerminalDialogs::new().map_err(|e| format!("Failed to start line editor: {e}"))?;

    shell::run(&mut controller, &mut dialogs)?;

    controller
        .into_store()
        .close()
        .map_err(|e| format!("Failed to close database '{}': {e}", db.display()))
}

fn run_list(db: &Path, args: ListArgs) -> Result<(), String> {
    let store = open_store(db)?;
    let records = store
        .list_all()
        .map_err(|e| format!("Failed to load records: {e}"))?;
    print!("{}", format_records(&records, args.format.into())?);
    store
        .close()
        .map_err(|e| format!("Failed to close database '{}': {e}", db.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_shell() {
        let cli = Cli::try_parse_from(["library", "--db", "x.db"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.db, PathBuf::from("x.db"));
    }

    #[test]
    fn test_list_format_parses() {
        let cli = Cli::try_parse_from(["library", "list", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::List(ListArgs {
                format: CliOutputFormat::Json
            }))
        ));
    }
}
