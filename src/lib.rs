//! `library_ms` - Library management console
//!
//! This crate provides the front end for the `libms` binary. The book
//! store itself lives in `libms-lib`.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line flags using clap
//! - [`config`] - Data file and log file resolution
//! - [`console`] - Numbered menu loop over any reader/writer pair
//! - [`format`] - Text formatting of books and outcomes
//! - [`logging`] - `tracing` subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod console;
pub mod format;
pub mod logging;

pub use libms_lib::{LibraryError, LibraryStore, Result};

/// Run the console application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if logging cannot be set up or the terminal fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
