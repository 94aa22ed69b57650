//! Command-line interface for `libms`.
//!
//! Parses flags with clap, sets up logging, opens the store and hands
//! control to the interactive menu.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use libms_lib::LibraryStore;
use tracing::debug;

use crate::config::{CliOverrides, Config};
use crate::console::Console;
use crate::logging;

/// `libms` - Library management console.
#[derive(Parser, Debug, Default)]
#[command(name = "libms")]
#[command(
    author,
    version,
    about = "Library management console (books, issues, reservations)",
    long_about = None,
    after_help = "The book list is saved after every change; issue history and reservations last for one session."
)]
pub struct Cli {
    /// Book list file (default: library_data.jsonl)
    #[arg(long, env = "LIBMS_DATA_FILE", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Flag values that feed configuration resolution.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            data_file: self.data_file.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized or reading/writing the
/// terminal fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli.overrides());

    logging::init_logging(cli.verbose, cli.quiet, config.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    debug!(data_file = %config.data_file.display(), "Resolved configuration");

    let mut store = LibraryStore::open(&config.data_file);

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(stdin.lock(), stdout.lock()).run(&mut store)?;

    Ok(())
}
