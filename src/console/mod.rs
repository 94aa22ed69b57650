//! Interactive numbered-menu front end.
//!
//! The console only maps menu choices to [`LibraryStore`] calls and prints
//! the outcome; it works over any `BufRead`/`Write` pair so sessions can be
//! scripted in tests.

mod menu;

pub use menu::{ChoiceError, MenuChoice, parse_whole_number};

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use libms_lib::{IssueOutcome, LibraryStore, Persistence};
use tracing::{debug, trace};

use crate::format::{format_book_line, format_persistence, format_store_error};

/// Reply to a numeric prompt.
enum Answer {
    Number(usize),
    NotANumber,
    /// End of input.
    Closed,
}

/// Menu loop bound to an input and an output stream.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the console, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the menu and handle choices until Exit or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    /// Store errors are printed and the loop continues.
    pub fn run(&mut self, store: &mut LibraryStore) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let Some(line) = self.read_line()? else {
                debug!("Input closed, leaving menu");
                writeln!(self.output)?;
                return Ok(());
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting system. Goodbye!")?;
                    return Ok(());
                }
                Ok(choice) => {
                    trace!(?choice, "Menu choice");
                    if self.dispatch(choice, store)?.is_break() {
                        writeln!(self.output)?;
                        return Ok(());
                    }
                }
                Err(ChoiceError::NotANumber) => writeln!(self.output, "Please enter a number.")?,
                Err(ChoiceError::OutOfRange(_)) => writeln!(self.output, "Invalid choice.")?,
            }
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Library Management System")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{choice}")?;
        }
        write!(self.output, "Choose an option: ")?;
        self.output.flush()
    }

    /// Run one menu entry. `Break` means input ended mid-prompt.
    fn dispatch(
        &mut self,
        choice: MenuChoice,
        store: &mut LibraryStore,
    ) -> io::Result<ControlFlow<()>> {
        match choice {
            MenuChoice::AddBook => {
                let Some(title) = self.prompt("Enter book title: ")? else {
                    return Ok(ControlFlow::Break(()));
                };
                let Some(author) = self.prompt("Enter book author: ")? else {
                    return Ok(ControlFlow::Break(()));
                };
                let added = store.add_book(title, author);
                self.report_persistence(&added.persistence)?;
                writeln!(self.output, "Book added successfully!")?;
            }
            MenuChoice::DisplayBooks => self.display_books(store)?,
            MenuChoice::IssueBook => match self.prompt_number("Enter book index to issue: ")? {
                Answer::Number(number) => self.issue(store, number)?,
                Answer::NotANumber => {}
                Answer::Closed => return Ok(ControlFlow::Break(())),
            },
            MenuChoice::ReturnBook => match self.prompt_number("Enter book index to return: ")? {
                Answer::Number(number) => self.return_book(store, number)?,
                Answer::NotANumber => {}
                Answer::Closed => return Ok(ControlFlow::Break(())),
            },
            MenuChoice::DisplayIssued => {
                let issued = store.issued_books();
                if issued.is_empty() {
                    writeln!(self.output, "No books currently issued.")?;
                } else {
                    writeln!(self.output, "Recently Issued Books:")?;
                    for book in issued {
                        writeln!(self.output, "{book}")?;
                    }
                }
            }
            MenuChoice::DisplayReservations => {
                let reservations = store.reservations();
                if reservations.is_empty() {
                    writeln!(self.output, "No reservations.")?;
                } else {
                    writeln!(self.output, "Books in Reservation Queue:")?;
                    for book in reservations {
                        writeln!(self.output, "{book}")?;
                    }
                }
            }
            MenuChoice::Exit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn issue(&mut self, store: &mut LibraryStore, number: usize) -> io::Result<()> {
        match store.issue_book(number) {
            Ok(IssueOutcome::Issued { persistence }) => {
                self.report_persistence(&persistence)?;
                writeln!(self.output, "Book issued successfully!")
            }
            Ok(IssueOutcome::Reserved { .. }) => writeln!(
                self.output,
                "Book already issued. Adding to reservation queue."
            ),
            Err(e) => writeln!(self.output, "{}", format_store_error(&e)),
        }
    }

    fn return_book(&mut self, store: &mut LibraryStore, number: usize) -> io::Result<()> {
        match store.return_book(number) {
            Ok(returned) => {
                self.report_persistence(&returned.persistence)?;
                writeln!(self.output, "Book returned successfully!")?;
                if returned.reservation_satisfied {
                    writeln!(self.output, "Book reserved by next in queue.")?;
                }
                Ok(())
            }
            Err(e) => writeln!(self.output, "{}", format_store_error(&e)),
        }
    }

    fn display_books(&mut self, store: &LibraryStore) -> io::Result<()> {
        let listing = store.list_books();
        if listing.is_empty() {
            return writeln!(self.output, "No books in the library.");
        }
        writeln!(self.output, "Books in the Library:")?;
        for (number, book) in listing {
            writeln!(self.output, "{}", format_book_line(number, book))?;
        }
        Ok(())
    }

    fn report_persistence(&mut self, persistence: &Persistence) -> io::Result<()> {
        if let Some(line) = format_persistence(persistence) {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    /// Print `message` and read the answer. `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompt for a book number.
    ///
    /// Negative numbers map to 0 so the store rejects them as an invalid
    /// index. A non-numeric answer is reported here.
    fn prompt_number(&mut self, message: &str) -> io::Result<Answer> {
        let Some(line) = self.prompt(message)? else {
            return Ok(Answer::Closed);
        };
        if let Some(n) = parse_whole_number(&line) {
            Ok(Answer::Number(usize::try_from(n).unwrap_or(0)))
        } else {
            writeln!(self.output, "Please enter a number.")?;
            Ok(Answer::NotANumber)
        }
    }

    /// Read one line without its terminator. Invalid UTF-8 is replaced,
    /// not rejected.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}
