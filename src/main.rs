//! `libms` - Library management console
//!
//! Tracks a small library's books, what is lent out and who is waiting,
//! keeping the book list in a local JSONL file between runs.

use library_ms::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
