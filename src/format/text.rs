//! Text formatting functions for `libms`.
//!
//! Provides plain text (non-ANSI) lines for terminal output.

use libms_lib::{Book, LibraryError, Persistence};

/// Format a numbered shelf entry.
///
/// Format: `{number}. {title} by {author}[ (Issued)]`
#[must_use]
pub fn format_book_line(number: usize, book: &Book) -> String {
    format!("{number}. {book}")
}

/// Line to show after a mutating operation, if any.
///
/// Only failed saves are worth telling the user about.
#[must_use]
pub fn format_persistence(persistence: &Persistence) -> Option<String> {
    match persistence {
        Persistence::Failed(reason) => Some(format!("Error saving books: {reason}")),
        Persistence::Saved | Persistence::InMemory => None,
    }
}

/// User-facing line for a store error.
#[must_use]
pub fn format_store_error(err: &LibraryError) -> String {
    match err {
        LibraryError::InvalidIndex { .. } => "Invalid book index.".to_string(),
        LibraryError::NotIssued { .. } => "Book is not issued.".to_string(),
        other => format!("Error: {other}"),
    }
}
