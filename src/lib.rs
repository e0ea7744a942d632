pub mod board;
pub mod console;
pub mod feedback;
pub mod game_logic;

pub use board::{InvalidCoordinate, Kind, Piece, Position, Side};
pub use game_logic::{GameState, LegalMoves, SetupError, Snapshot};

/// Trait for displaying the board and its feedback to the player.
///
/// Abstracts over where the board is drawn so the command loop can be
/// driven by a terminal or by an in-memory buffer in tests.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Draw `board` with the given highlights.
    fn show(
        &mut self,
        board: &board::Board,
        feedback: &feedback::BoardFeedback,
    ) -> Result<(), Self::Error>;
}
