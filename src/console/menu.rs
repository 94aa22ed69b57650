//! Menu entries and choice parsing.

use std::fmt;
use std::str::FromStr;

/// One numbered entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    DisplayBooks,
    IssueBook,
    ReturnBook,
    DisplayIssued,
    DisplayReservations,
    Exit,
}

/// Why a line could not be turned into a [`MenuChoice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceError {
    /// The line is not a number.
    NotANumber,
    /// A number outside the menu.
    OutOfRange(i64),
}

impl MenuChoice {
    /// Every entry in display order.
    pub const ALL: [Self; 7] = [
        Self::AddBook,
        Self::DisplayBooks,
        Self::IssueBook,
        Self::ReturnBook,
        Self::DisplayIssued,
        Self::DisplayReservations,
        Self::Exit,
    ];

    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::AddBook => 1,
            Self::DisplayBooks => 2,
            Self::IssueBook => 3,
            Self::ReturnBook => 4,
            Self::DisplayIssued => 5,
            Self::DisplayReservations => 6,
            Self::Exit => 7,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddBook => "Add Book",
            Self::DisplayBooks => "Display Books",
            Self::IssueBook => "Issue Book",
            Self::ReturnBook => "Return Book",
            Self::DisplayIssued => "Display Issued Books",
            Self::DisplayReservations => "Display Reservations",
            Self::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Parse an optionally signed run of digits, saturating at the `i64` bounds.
///
/// Returns `None` for anything that is not a whole number.
#[must_use]
pub fn parse_whole_number(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = s.strip_prefix('-').map_or((false, s), |rest| (true, rest));
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.parse().unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}

impl FromStr for MenuChoice {
    type Err = ChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = parse_whole_number(s).ok_or(ChoiceError::NotANumber)?;
        Self::ALL
            .into_iter()
            .find(|choice| i64::from(choice.number()) == n)
            .ok_or(ChoiceError::OutOfRange(n))
    }
}
