//! Core data types for libms-lib.

use serde::{Deserialize, Serialize};
use std::fmt;

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(b: &bool) -> bool {
    !*b
}

/// A single copy of a book on the library's shelf.
///
/// Title and author are fixed at creation; only the issued flag changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Book {
    title: String,
    author: String,
    #[serde(default, skip_serializing_if = "is_false")]
    issued: bool,
}

impl Book {
    /// Create an available (not issued) book.
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            issued: false,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub const fn is_issued(&self) -> bool {
        self.issued
    }

    pub(crate) fn set_issued(&mut self, issued: bool) {
        self.issued = issued;
    }

    /// Same title and author, regardless of issue state.
    #[must_use]
    pub fn same_work(&self, other: &Self) -> bool {
        self.title == other.title && self.author == other.author
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.author)?;
        if self.issued {
            write!(f, " (Issued)")?;
        }
        Ok(())
    }
}

/// How a mutating store operation fared when flushing to disk.
///
/// A failed save never undoes the in-memory change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    /// The book list was written to the data file.
    Saved,
    /// The store has no data file.
    InMemory,
    /// Writing failed; the message describes why.
    Failed(String),
}

impl Persistence {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Result of `LibraryStore::add_book`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    /// 1-based number of the new book.
    pub number: usize,
    pub persistence: Persistence,
}

/// Result of `LibraryStore::issue_book`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// The book was available and is now lent out.
    Issued { persistence: Persistence },
    /// The book was already out; the request joined the reservation queue.
    Reserved {
        /// 1-based place in the reservation queue.
        position: usize,
    },
}

/// Result of `LibraryStore::return_book`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Returned {
    pub persistence: Persistence,
    /// The front reservation was for this book and has been removed.
    pub reservation_satisfied: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_available() {
        let book = Book::new("Dune", "Herbert");
        assert_eq!(book.to_string(), "Dune by Herbert");
    }

    #[test]
    fn test_display_issued() {
        let mut book = Book::new("Dune", "Herbert");
        book.set_issued(true);
        assert_eq!(book.to_string(), "Dune by Herbert (Issued)");
    }

    #[test]
    fn test_serde_omits_false_issued_flag() {
        let book = Book::new("T", "A");
        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(json, r#"{"title":"T","author":"A"}"#);

        let parsed: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, book);
    }

    #[test]
    fn test_same_work_ignores_issue_state() {
        let a = Book::new("Dune", "Herbert");
        let mut b = Book::new("Dune", "Herbert");
        b.set_issued(true);
        assert!(a.same_work(&b));
        assert!(!a.same_work(&Book::new("Dune", "Someone Else")));
    }
}
