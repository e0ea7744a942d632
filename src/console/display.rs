use std::io::{self, Write};

use crate::BoardDisplay;
use crate::board::{Board, MAX_COLUMN, MAX_ROW, MIN_COLUMN, MIN_ROW, Position};
use crate::feedback::{BoardFeedback, SquareFeedback};

const SEPARATOR: &str = "  +---+---+---+---+---+---+---+---+";

/// Terminal board renderer.
///
/// Draws an 8×8 grid with row and column labels on both sides. Squares with
/// feedback get an ANSI background unless colors are turned off.
#[derive(Debug)]
pub struct TerminalDisplay<W> {
    writer: W,
    color: bool,
}

impl<W: Write> TerminalDisplay<W> {
    /// Create a display with colors enabled.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            color: true,
        }
    }

    /// Create a display honoring the `NO_COLOR` environment variable.
    pub fn from_env(writer: W) -> Self {
        let color = std::env::var_os("NO_COLOR").is_none();
        Self::new(writer).with_color(color)
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Write one line of text.
    pub fn say(&mut self, line: &str) -> Result<(), DisplayError> {
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    /// Write the input prompt and flush so it shows before input is read.
    pub fn prompt(&mut self) -> Result<(), DisplayError> {
        write!(self.writer, "> ")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl<W: Write> BoardDisplay for TerminalDisplay<W> {
    type Error = DisplayError;

    fn show(&mut self, board: &Board, feedback: &BoardFeedback) -> Result<(), Self::Error> {
        render_board(&mut self.writer, board, feedback, self.color)
    }
}

/// Render the board to any writer. Extracted for testability.
fn render_board(
    w: &mut impl Write,
    board: &Board,
    feedback: &BoardFeedback,
    color: bool,
) -> Result<(), DisplayError> {
    writeln!(w)?;
    write_column_labels(w)?;
    for row in (MIN_ROW..=MAX_ROW).rev() {
        writeln!(w, "{SEPARATOR}")?;
        write!(w, "{row}")?;
        for position in Position::all().filter(|p| p.row() == row) {
            let symbol = board.get(position).map_or(' ', |piece| piece.identifier());
            let cell = format_square(symbol, feedback.get(position), color);
            write!(w, " | {cell}")?;
        }
        writeln!(w, " | {row}")?;
    }
    writeln!(w, "{SEPARATOR}")?;
    write_column_labels(w)?;
    w.flush()?;
    Ok(())
}

fn write_column_labels(w: &mut impl Write) -> io::Result<()> {
    write!(w, "   ")?;
    for column in MIN_COLUMN..=MAX_COLUMN {
        write!(w, " {column}  ")?;
    }
    writeln!(w)
}

/// Wrap a square's symbol in the ANSI background for its feedback.
fn format_square(symbol: char, feedback: Option<SquareFeedback>, color: bool) -> String {
    let background = match feedback {
        Some(SquareFeedback::Destination) => "\x1b[44m",
        Some(SquareFeedback::Capture) => "\x1b[41m",
        Some(SquareFeedback::Origin) => "\x1b[42m",
        Some(SquareFeedback::Check) => "\x1b[45m",
        Some(SquareFeedback::Checker) => "\x1b[43m",
        None => return symbol.to_string(),
    };
    if color {
        format!("{background}{symbol}\x1b[0m")
    } else {
        match symbol {
            ' ' => "*".to_string(),
            _ => symbol.to_string(),
        }
    }
}
