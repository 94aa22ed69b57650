//! JSONL file I/O for the book list.
//!
//! The first line is a [`Header`] naming the format and version; every
//! following line is one [`Book`]. Only the book list is stored: the issue
//! stack and reservation queue live for a single run.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{LibraryError, Result};
use crate::model::Book;

/// Format tag written in every header.
pub const FORMAT: &str = "libms-books";

/// Current record format version.
pub const VERSION: u32 = 1;

/// First line of a data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Header {
    pub(crate) format: String,
    pub(crate) version: u32,
    pub(crate) saved_at: DateTime<Utc>,
    /// Number of book lines that follow.
    pub(crate) count: usize,
}

impl Header {
    fn for_books(books: &[Book]) -> Self {
        Self {
            format: FORMAT.to_string(),
            version: VERSION,
            saved_at: Utc::now(),
            count: books.len(),
        }
    }

    fn check(&self) -> Result<()> {
        if self.format == FORMAT && self.version == VERSION {
            Ok(())
        } else {
            Err(LibraryError::UnsupportedFormat {
                format: self.format.clone(),
                version: self.version,
            })
        }
    }
}

/// Books read from a data file plus anything the reader had to drop.
#[derive(Debug, Default)]
pub struct LoadedData {
    pub books: Vec<Book>,
    /// Header of the file, if one was read.
    pub(crate) header: Option<Header>,
    /// First damaged line (1-based) when the tail was dropped.
    pub(crate) truncated_at: Option<usize>,
}

/// Load books for startup, never failing.
///
/// A missing, unreadable or foreign file yields an empty list. A damaged
/// book line keeps the books before it and drops the rest. None of these
/// are warnings: they are logged at `info` and below.
#[must_use]
pub fn load_or_empty(path: &Path) -> LoadedData {
    let mut lines = match open_lines(path) {
        Ok(lines) => lines,
        Err(LibraryError::FileNotFound(_)) => {
            debug!(path = %path.display(), "No data file, starting empty");
            return LoadedData::default();
        }
        Err(e) => {
            info!(path = %path.display(), error = %e, "Cannot read data file, starting empty");
            return LoadedData::default();
        }
    };

    let header = match read_header(&mut lines) {
        Ok(header) => header,
        Err(e) => {
            info!(path = %path.display(), error = %e, "Unusable data file, starting empty");
            return LoadedData::default();
        }
    };

    let mut books = Vec::new();
    let mut truncated_at = None;
    for (line_num, line) in lines {
        let parsed = line
            .map_err(LibraryError::from)
            .and_then(|line| parse_book(line_num, &line));
        match parsed {
            Ok(book) => books.push(book),
            Err(e) => {
                info!(
                    path = %path.display(),
                    line = line_num,
                    kept = books.len(),
                    error = %e,
                    "Damaged data file tail dropped"
                );
                truncated_at = Some(line_num);
                break;
            }
        }
    }

    if truncated_at.is_none() && header.count != books.len() {
        info!(
            expected = header.count,
            found = books.len(),
            "Data file book count does not match header"
        );
    }

    debug!(path = %path.display(), books = books.len(), "Loaded data file");
    LoadedData {
        books,
        header: Some(header),
        truncated_at,
    }
}

/// Save books to a data file with atomic write.
///
/// Uses write-to-temp + rename so a crash leaves either the old or the new
/// file in place.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written.
pub fn save(path: &Path, books: &[Book]) -> Result<()> {
    let tmp_path = path.with_extension("jsonl.tmp");

    let written = write_books(&tmp_path, books)
        .and_then(|()| fs::rename(&tmp_path, path).map_err(LibraryError::from));
    if let Err(e) = written {
        // Nothing to clean up if the temp file was never created.
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    debug!(path = %path.display(), books = books.len(), "Saved data file");
    Ok(())
}

fn write_books(tmp_path: &Path, books: &[Book]) -> Result<()> {
    let mut file = fs::File::create(tmp_path)?;

    let header = serde_json::to_string(&Header::for_books(books))?;
    writeln!(file, "{header}")?;
    for book in books {
        let json = serde_json::to_string(book)?;
        writeln!(file, "{json}")?;
    }

    file.flush()?;
    Ok(())
}

type NumberedLines = Box<dyn Iterator<Item = (usize, std::io::Result<String>)>>;

/// Open `path` as an iterator of non-blank, 1-based numbered lines.
fn open_lines(path: &Path) -> Result<NumberedLines> {
    let file = fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LibraryError::FileNotFound(path.to_path_buf())
        } else {
            LibraryError::Io(e)
        }
    })?;

    let lines = BufReader::new(file)
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.as_ref().is_ok_and(|l| l.trim().is_empty()));
    Ok(Box::new(lines))
}

fn read_header(lines: &mut NumberedLines) -> Result<Header> {
    let (line_num, line) = lines.next().ok_or(LibraryError::MissingHeader)?;
    let line = line?;
    let header: Header =
        serde_json::from_str(line.trim()).map_err(|_| LibraryError::MissingHeader)?;
    debug!(line = line_num, version = header.version, "Read data file header");
    header.check()?;
    Ok(header)
}

fn parse_book(line_num: usize, line: &str) -> Result<Book> {
    serde_json::from_str(line.trim()).map_err(|e| LibraryError::JsonlParse {
        line: line_num,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued(title: &str, author: &str) -> Book {
        let mut book = Book::new(title, author);
        book.set_issued(true);
        book
    }

    fn read_header_of(path: &Path) -> Result<Header> {
        let mut lines = open_lines(path)?;
        read_header(&mut lines)
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.jsonl");

        let books = vec![Book::new("Dune", "Herbert"), issued("Foundation", "Asimov")];
        save(&path, &books).unwrap();

        let loaded = load_or_empty(&path);
        assert_eq!(loaded.books, books);
        assert_eq!(loaded.truncated_at, None);
        let header = loaded.header.unwrap();
        assert_eq!(header.format, FORMAT);
        assert_eq!(header.version, VERSION);
        assert_eq!(header.count, 2);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.jsonl");
        save(&path, &[Book::new("T", "A")]).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("jsonl.tmp").exists());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.jsonl");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let result = save(&path, &[Book::new("T", "A")]);
        assert!(matches!(result, Err(LibraryError::Io(_))));
        assert!(!path.with_extension("jsonl.tmp").exists());
    }

    #[test]
    fn test_save_empty_list_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.jsonl");
        save(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        let loaded = load_or_empty(&path);
        assert!(loaded.books.is_empty());
        assert!(loaded.header.is_some());
    }

    #[test]
    fn test_open_missing_file() {
        let result = open_lines(Path::new("/nonexistent/books.jsonl"));
        assert!(matches!(result, Err(LibraryError::FileNotFound(_))));
    }

    #[test]
    fn test_empty_file_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.jsonl");
        fs::write(&path, "").unwrap();

        assert!(matches!(read_header_of(&path), Err(LibraryError::MissingHeader)));
        assert!(load_or_empty(&path).header.is_none());
    }

    #[test]
    fn test_future_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v9.jsonl");
        fs::write(
            &path,
            "{\"format\":\"libms-books\",\"version\":9,\"saved_at\":\"2026-01-01T00:00:00Z\",\"count\":0}\n{\"title\":\"T\",\"author\":\"A\"}\n",
        )
        .unwrap();

        assert!(matches!(
            read_header_of(&path),
            Err(LibraryError::UnsupportedFormat { version: 9, .. })
        ));
        assert!(load_or_empty(&path).books.is_empty());
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blanks.jsonl");
        save(&path, &[Book::new("T", "A")]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::write(&path, format!("\n{}\n\n", content.replace('\n', "\n\n"))).unwrap();

        let loaded = load_or_empty(&path);
        assert_eq!(loaded.books.len(), 1);
        assert_eq!(loaded.truncated_at, None);
    }

    #[test]
    fn test_parse_book_reports_line_number() {
        let result = parse_book(3, "{\"title\":\"cut off");
        assert!(matches!(result, Err(LibraryError::JsonlParse { line: 3, .. })));
    }

    #[test]
    fn test_load_or_empty_missing_file() {
        let loaded = load_or_empty(Path::new("/nonexistent/books.jsonl"));
        assert!(loaded.books.is_empty());
        assert!(loaded.header.is_none());
    }

    #[test]
    fn test_load_or_empty_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.jsonl");
        fs::write(&path, [0xAC, 0xED, 0x00, 0x05, 0x73, 0x72]).unwrap();

        let loaded = load_or_empty(&path);
        assert!(loaded.books.is_empty());
        assert!(loaded.header.is_none());
    }

    #[test]
    fn test_load_or_empty_keeps_prefix_before_damaged_tail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("torn.jsonl");
        save(&path, &[Book::new("Dune", "Herbert"), issued("Emma", "Austen")]).unwrap();
        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("{\"title\":\"Foundation\",\"aut\n");
        content.push_str("{\"title\":\"Never read\",\"author\":\"X\"}\n");
        fs::write(&path, content).unwrap();

        let loaded = load_or_empty(&path);
        assert_eq!(
            loaded.books,
            vec![Book::new("Dune", "Herbert"), issued("Emma", "Austen")]
        );
        assert_eq!(loaded.truncated_at, Some(4));
    }
}
