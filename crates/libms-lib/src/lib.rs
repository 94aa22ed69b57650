//! `libms-lib` — In-process library inventory store.
//!
//! Keeps the shelf of books, a stack of issued books and a reservation
//! queue in memory. The shelf is persisted to a versioned JSONL file on
//! every change; the stack and queue last for one run.
//!
//! # Quick Start
//!
//! ```no_run
//! use libms_lib::{IssueOutcome, LibraryStore};
//!
//! // Load existing file (missing or damaged files start empty)
//! let mut store = LibraryStore::open("library_data.jsonl");
//!
//! // Add and lend
//! let added = store.add_book("Dune", "Herbert");
//! match store.issue_book(added.number).unwrap() {
//!     IssueOutcome::Issued { .. } => println!("issued"),
//!     IssueOutcome::Reserved { position } => println!("queued at {position}"),
//! }
//!
//! // Return
//! store.return_book(added.number).unwrap();
//! ```

pub mod error;
pub mod jsonl;
pub mod model;
pub mod store;

pub use error::{LibraryError, Result};
pub use model::{Added, Book, IssueOutcome, Persistence, Returned};
pub use store::LibraryStore;
