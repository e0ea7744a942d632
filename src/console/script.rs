use thiserror::Error;

use crate::board::Position;

/// Error when parsing a move script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("invalid square notation: '{0}'")]
    InvalidSquare(String),
    #[error("square {0} has no destination")]
    Unpaired(Position),
}

/// Parse a move script into (from, to) pairs.
///
/// Format:
/// - Squares are 2 characters (e.g., "e2", "a1")
/// - Spaces and periods are separators and may be omitted
/// - Consecutive squares pair up into moves
///
/// Examples:
/// - `"f2f3 e7e6"` - two moves
/// - `"f2 f3. e7 e6."` - the same two moves
pub fn parse_moves(script: &str) -> Result<Vec<(Position, Position)>, ScriptError> {
    let squares = parse_squares(script)?;
    let mut pairs = squares.chunks_exact(2);
    let moves = pairs.by_ref().map(|pair| (pair[0], pair[1])).collect();
    match pairs.remainder() {
        [lone] => Err(ScriptError::Unpaired(*lone)),
        _ => Ok(moves),
    }
}

fn parse_squares(script: &str) -> Result<Vec<Position>, ScriptError> {
    let mut squares = Vec::new();
    let mut current_token = String::new();

    for ch in script.chars() {
        match ch {
            '.' => flush_token(&mut current_token, &mut squares)?,
            c if c.is_whitespace() => flush_token(&mut current_token, &mut squares)?,
            _ => {
                current_token.push(ch);

                // Squares are exactly 2 characters (e.g., "e2", "a1")
                if current_token.chars().count() == 2 {
                    flush_token(&mut current_token, &mut squares)?;
                }
            }
        }
    }

    // Flush any remaining token
    flush_token(&mut current_token, &mut squares)?;
    Ok(squares)
}

/// Parse the current token into a square and clear it.
fn flush_token(token: &mut String, squares: &mut Vec<Position>) -> Result<(), ScriptError> {
    if !token.is_empty() {
        let square: Position = token
            .parse()
            .map_err(|_| ScriptError::InvalidSquare(token.clone()))?;
        squares.push(square);
        token.clear();
    }
    Ok(())
}
