//! In-memory library store.
//!
//! Holds the shelf (`books`), the issue history stack and the reservation
//! queue. Books are addressed by their 1-based number on the shelf; the
//! stack and queue hold shelf positions, so they always point at the live
//! `Book`.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{LibraryError, Result};
use crate::jsonl;
use crate::model::{Added, Book, IssueOutcome, Persistence, Returned};

/// In-memory library store.
///
/// Use `open()` to load the shelf from a data file; every change to the
/// shelf is written back to that file immediately. The issue stack and the
/// reservation queue are never persisted.
#[derive(Debug, Default)]
pub struct LibraryStore {
    books: Vec<Book>,
    /// Shelf positions, most recently issued last.
    issued: Vec<usize>,
    /// Shelf positions, oldest request first.
    reservations: VecDeque<usize>,
    path: Option<PathBuf>,
}

impl LibraryStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a new empty store with no data file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store backed by `path`.
    ///
    /// Never fails: a missing or unusable file gives an empty shelf, and a
    /// damaged tail is dropped (see [`jsonl::load_or_empty`]).
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = jsonl::load_or_empty(path);
        info!(
            path = %path.display(),
            books = loaded.books.len(),
            saved_at = ?loaded.header.as_ref().map(|h| h.saved_at),
            truncated_at = ?loaded.truncated_at,
            "Opened library"
        );

        Self {
            books: loaded.books,
            path: Some(path.to_path_buf()),
            ..Self::default()
        }
    }

    /// Data file this store writes to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of books on the shelf.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Look up a book by its 1-based number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` if `number` is outside `1..=len()`.
    pub fn book(&self, number: usize) -> Result<&Book> {
        let pos = self.position(number)?;
        Ok(&self.books[pos])
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Put a new, available book on the shelf and persist.
    ///
    /// Any title and author are accepted, including empty and duplicate ones.
    pub fn add_book(&mut self, title: impl Into<String>, author: impl Into<String>) -> Added {
        let book = Book::new(title, author);
        info!(title = book.title(), author = book.author(), "Adding book");
        self.books.push(book);

        Added {
            number: self.books.len(),
            persistence: self.persist(),
        }
    }

    /// All books with their 1-based numbers, in shelf order.
    #[must_use]
    pub fn list_books(&self) -> Vec<(usize, &Book)> {
        self.books
            .iter()
            .enumerate()
            .map(|(pos, book)| (pos + 1, book))
            .collect()
    }

    /// Lend out book `number`.
    ///
    /// If the book is already out the request is queued as a reservation
    /// instead; that path changes nothing on the shelf and does not persist.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` if `number` is outside `1..=len()`.
    pub fn issue_book(&mut self, number: usize) -> Result<IssueOutcome> {
        let pos = self.position(number)?;
        let book = &mut self.books[pos];

        if book.is_issued() {
            self.reservations.push_back(pos);
            info!(
                number,
                title = book.title(),
                queue_len = self.reservations.len(),
                "Book already issued, reservation queued"
            );
            return Ok(IssueOutcome::Reserved {
                position: self.reservations.len(),
            });
        }

        book.set_issued(true);
        info!(number, title = book.title(), "Issuing book");
        self.issued.push(pos);

        Ok(IssueOutcome::Issued {
            persistence: self.persist(),
        })
    }

    /// Take book `number` back onto the shelf.
    ///
    /// The most recent issue-stack entry for this book is removed, wherever
    /// it sits in the stack. Afterwards only the front of the reservation
    /// queue is checked: if it asks for this book (same shelf position, or
    /// same title and author) it is removed and reported as satisfied.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` if `number` is outside `1..=len()`, or
    /// `NotIssued` if the book is on the shelf.
    pub fn return_book(&mut self, number: usize) -> Result<Returned> {
        let pos = self.position(number)?;
        let book = &mut self.books[pos];

        if !book.is_issued() {
            return Err(LibraryError::NotIssued {
                index: number,
                title: book.title().to_string(),
            });
        }

        book.set_issued(false);
        info!(number, title = book.title(), "Returning book");

        if let Some(slot) = self.issued.iter().rposition(|&p| p == pos) {
            self.issued.remove(slot);
        } else {
            // Flag came from the data file; this run never issued it.
            debug!(number, "Returned book was not on the issue stack");
        }

        let persistence = self.persist();
        let reservation_satisfied = self.take_front_reservation(pos);

        Ok(Returned {
            persistence,
            reservation_satisfied,
        })
    }

    /// Books on the issue stack, most recently issued first.
    #[must_use]
    pub fn issued_books(&self) -> Vec<&Book> {
        self.issued.iter().rev().map(|&pos| &self.books[pos]).collect()
    }

    /// Reserved books, oldest request first.
    #[must_use]
    pub fn reservations(&self) -> Vec<&Book> {
        self.reservations
            .iter()
            .map(|&pos| &self.books[pos])
            .collect()
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn position(&self, number: usize) -> Result<usize> {
        if (1..=self.books.len()).contains(&number) {
            Ok(number - 1)
        } else {
            Err(LibraryError::InvalidIndex {
                index: number,
                len: self.books.len(),
            })
        }
    }

    fn take_front_reservation(&mut self, pos: usize) -> bool {
        let Some(&front) = self.reservations.front() else {
            return false;
        };
        if front == pos || self.books[front].same_work(&self.books[pos]) {
            self.reservations.pop_front();
            info!(
                title = self.books[pos].title(),
                remaining = self.reservations.len(),
                "Reservation satisfied"
            );
            true
        } else {
            false
        }
    }

    /// Write the shelf to the data file, if there is one.
    ///
    /// Failures are returned to the caller to report, not logged as warnings.
    fn persist(&self) -> Persistence {
        let Some(path) = &self.path else {
            return Persistence::InMemory;
        };
        match jsonl::save(path, &self.books) {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Failed to save books");
                Persistence::Failed(e.to_string())
            }
        }
    }
}
