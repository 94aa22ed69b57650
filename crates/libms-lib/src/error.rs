//! Error types for `libms-lib`.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for library store operations.
#[derive(Error, Debug)]
pub enum LibraryError {
    // === Book Errors ===
    /// The 1-based book number is outside `1..=len`.
    #[error("Invalid book index: {index} (library has {len} books)")]
    InvalidIndex { index: usize, len: usize },

    /// Attempted to return a book that is on the shelf.
    #[error("Book is not issued: #{index} {title}")]
    NotIssued { index: usize, title: String },

    // === Data File Errors ===
    /// Data file not found at the specified path.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The data file has no header line.
    #[error("Data file has no header line")]
    MissingHeader,

    /// The header names a format or version this build cannot read.
    #[error("Unsupported data format: {format} v{version}")]
    UnsupportedFormat { format: String, version: u32 },

    /// Failed to parse a line in the data file.
    #[error("JSONL parse error at line {line}: {reason}")]
    JsonlParse { line: usize, reason: String },

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type using `LibraryError`.
pub type Result<T> = std::result::Result<T, LibraryError>;
