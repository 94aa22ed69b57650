//! Output formatting for `libms`.
//!
//! Plain text lines for the console menu. Book display text itself comes
//! from `Book`'s `Display` impl.

mod text;

pub use text::{format_book_line, format_persistence, format_store_error};
