use std::fmt;
use std::str::FromStr;

/// First column label on the board.
pub const MIN_COLUMN: char = 'a';
/// Last column label on the board.
pub const MAX_COLUMN: char = 'h';
/// First row number on the board.
pub const MIN_ROW: u8 = 1;
/// Last row number on the board.
pub const MAX_ROW: u8 = 8;

/// Number of squares on the board.
pub const NUM_SQUARES: usize = 64;

/// A single square on the chess board.
///
/// Internally stores index 0-63 where:
/// - 0 = a1, 7 = h1
/// - 56 = a8, 63 = h8
///
/// Ordering follows the index, so a1 < b1 < ... < h8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(u8);

impl Position {
    /// Creates a Position if the index is valid (0-63).
    pub const fn new(idx: u8) -> Option<Self> {
        if (idx as usize) < NUM_SQUARES {
            Some(Position(idx))
        } else {
            None
        }
    }

    /// True if the zero-based column/row indices lie on the board.
    ///
    /// Takes signed values so callers can test the result of offset
    /// arithmetic before building a `Position`.
    #[inline]
    pub const fn is_on_board(column: i8, row: i8) -> bool {
        column >= 0 && column < 8 && row >= 0 && row < 8
    }

    /// Creates a Position from zero-based column/row indices.
    #[inline]
    pub const fn from_indices(column: i8, row: i8) -> Option<Self> {
        if Self::is_on_board(column, row) {
            Some(Position((row * 8 + column) as u8))
        } else {
            None
        }
    }

    /// Creates a Position from its column letter and row digit.
    pub fn from_chars(column: char, row: char) -> Result<Self, InvalidCoordinate> {
        if !(MIN_COLUMN..=MAX_COLUMN).contains(&column) {
            return Err(InvalidCoordinate::BadColumn(column));
        }
        let row_number = row
            .to_digit(10)
            .filter(|r| (MIN_ROW as u32..=MAX_ROW as u32).contains(r))
            .ok_or(InvalidCoordinate::BadRow(row))?;

        let column_idx = (column as u8 - MIN_COLUMN as u8) as i8;
        let row_idx = (row_number as u8 - MIN_ROW) as i8;
        Ok(Position((row_idx * 8 + column_idx) as u8))
    }

    /// Returns the internal index value (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the column letter ('a'-'h').
    #[inline]
    pub const fn column(self) -> char {
        (MIN_COLUMN as u8 + (self.0 % 8)) as char
    }

    /// Returns the row number (1-8).
    #[inline]
    pub const fn row(self) -> u8 {
        (self.0 / 8) + MIN_ROW
    }

    /// Zero-based column index.
    #[inline]
    pub const fn column_index(self) -> i8 {
        (self.0 % 8) as i8
    }

    /// Zero-based row index.
    #[inline]
    pub const fn row_index(self) -> i8 {
        (self.0 / 8) as i8
    }

    /// The square `(d_column, d_row)` away, if it is still on the board.
    #[inline]
    pub const fn offset(self, d_column: i8, d_row: i8) -> Option<Self> {
        Self::from_indices(self.column_index() + d_column, self.row_index() + d_row)
    }

    /// Iterates every square from a1 to h8.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..NUM_SQUARES as u8).map(Position)
    }
}

/// Parse algebraic notation like "e2" into a Position.
///
/// Only the exact pattern `[a-h][1-8]` is accepted.
///
/// # Examples
/// ```
/// # use chess_rules::board::Position;
/// let position: Position = "e2".parse().unwrap();
/// assert_eq!(position.index(), 12);
/// ```
impl FromStr for Position {
    type Err = InvalidCoordinate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(column), Some(row), None) => Position::from_chars(column, row),
            _ => Err(InvalidCoordinate::WrongLength(s.to_string())),
        }
    }
}

/// Display position in algebraic notation (e.g., "e2").
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column(), self.row())
    }
}

/// Error returned when an algebraic coordinate string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCoordinate {
    /// Coordinate must be exactly 2 characters
    #[error("coordinate must be 2 characters (e.g., 'e2'), got '{0}'")]
    WrongLength(String),
    /// Column must be a letter from a-h
    #[error("column must be a-h, got '{0}'")]
    BadColumn(char),
    /// Row must be a digit from 1-8
    #[error("row must be 1-8, got '{0}'")]
    BadRow(char),
}
