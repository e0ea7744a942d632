use crate::board::{Piece, Position};
use crate::game_logic::LegalMoves;

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// A legal destination for the selected piece
    Destination,
    /// Moving here captures an opponent piece
    Capture,
    /// The selected piece
    Origin,
    /// King in check
    Check,
    /// Piece giving check
    Checker,
}

/// Contains the set of squares and their associated feedback types for the current board state.
///
/// `BoardFeedback` is computed by [`compute_feedback`] and consumed by the terminal renderer.
/// At most one entry exists per square; setting a square again replaces its feedback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Position, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Position, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, position: Position) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == position)
            .map(|(_, feedback)| *feedback)
    }

    /// Set feedback for a square, replacing any previous entry.
    pub fn set(&mut self, position: Position, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(sq, _)| *sq == position) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((position, feedback)),
        }
    }

    /// Returns true if there are no feedback squares to display.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

/// Check details for the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInfo {
    pub king_square: Position,
    pub checkers: Vec<Position>,
}

/// Game state information needed to compute feedback
///
/// This trait defines what the feedback system needs from the game.
pub trait FeedbackSource {
    /// Legal moves for the side to move
    fn legal_moves(&self) -> &LegalMoves;

    /// Occupant of a square
    fn piece_at(&self, position: Position) -> Option<Piece>;

    /// King and checkers, if the side to move is in check
    fn check_info(&self) -> Option<&CheckInfo>;
}

/// Compute visual feedback for the current position.
///
/// - Side to move in check: the king and every checker are marked.
/// - A square is selected: it is marked as the origin and each legal
///   destination as a plain destination or a capture.
///
/// Selecting a square without legal moves adds nothing.
pub fn compute_feedback(source: &impl FeedbackSource, selected: Option<Position>) -> BoardFeedback {
    let mut feedback = BoardFeedback::new();

    if let Some(check) = source.check_info() {
        feedback.set(check.king_square, SquareFeedback::Check);
        for &checker in &check.checkers {
            feedback.set(checker, SquareFeedback::Checker);
        }
    }

    if let Some(from) = selected
        && let Some(destinations) = source.legal_moves().get(&from)
    {
        feedback.set(from, SquareFeedback::Origin);
        for &to in destinations {
            feedback.set(to, classify_destination(source, to));
        }
    }

    feedback
}

/// Classify a destination as either a capture or a regular destination
fn classify_destination(source: &impl FeedbackSource, to: Position) -> SquareFeedback {
    if source.piece_at(to).is_some() {
        SquareFeedback::Capture
    } else {
        SquareFeedback::Destination
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Kind, Side};
    use std::collections::BTreeMap;

    fn sq(s: &str) -> Position {
        s.parse().expect("test square is valid")
    }

    struct MockFeedbackSource {
        moves: LegalMoves,
        occupied: Vec<(Position, Piece)>,
        check: Option<CheckInfo>,
    }

    impl FeedbackSource for MockFeedbackSource {
        fn legal_moves(&self) -> &LegalMoves {
            &self.moves
        }

        fn piece_at(&self, position: Position) -> Option<Piece> {
            self.occupied
                .iter()
                .find(|(sq, _)| *sq == position)
                .map(|(_, piece)| *piece)
        }

        fn check_info(&self) -> Option<&CheckInfo> {
            self.check.as_ref()
        }
    }

    fn pawn_source() -> MockFeedbackSource {
        let mut moves = BTreeMap::new();
        moves.insert(sq("e4"), vec![sq("e5"), sq("d5")]);
        MockFeedbackSource {
            moves,
            occupied: vec![
                (sq("e4"), Piece::white(Kind::Pawn)),
                (sq("d5"), Piece::black(Kind::Pawn)),
            ],
            check: None,
        }
    }

    #[test]
    fn test_no_feedback_when_nothing_selected() {
        let feedback = compute_feedback(&pawn_source(), None);
        assert!(feedback.is_empty());
    }

    #[test]
    fn test_distinguish_captures() {
        let feedback = compute_feedback(&pawn_source(), Some(sq("e4")));

        assert_eq!(feedback.get(sq("e4")), Some(SquareFeedback::Origin));
        assert_eq!(feedback.get(sq("e5")), Some(SquareFeedback::Destination));
        assert_eq!(feedback.get(sq("d5")), Some(SquareFeedback::Capture));
        assert_eq!(feedback.squares().len(), 3);
    }

    #[test]
    fn test_selecting_square_without_moves() {
        let feedback = compute_feedback(&pawn_source(), Some(sq("a1")));
        assert!(feedback.is_empty());
    }

    #[test]
    fn test_check_marks_king_and_checkers() {
        let mut source = pawn_source();
        source.check = Some(CheckInfo {
            king_square: sq("e1"),
            checkers: vec![sq("b4"), sq("f3")],
        });

        let feedback = compute_feedback(&source, None);

        assert_eq!(feedback.get(sq("e1")), Some(SquareFeedback::Check));
        assert_eq!(feedback.get(sq("b4")), Some(SquareFeedback::Checker));
        assert_eq!(feedback.get(sq("f3")), Some(SquareFeedback::Checker));
    }

    #[test]
    fn test_selection_overrides_check_marks() {
        let mut moves = BTreeMap::new();
        moves.insert(sq("e1"), vec![sq("f2")]);
        let source = MockFeedbackSource {
            moves,
            occupied: vec![
                (sq("e1"), Piece::white(Kind::King)),
                (sq("f2"), Piece::black(Kind::Queen)),
            ],
            check: Some(CheckInfo {
                king_square: sq("e1"),
                checkers: vec![sq("f2")],
            }),
        };

        let feedback = compute_feedback(&source, Some(sq("e1")));

        assert_eq!(feedback.get(sq("e1")), Some(SquareFeedback::Origin));
        assert_eq!(feedback.get(sq("f2")), Some(SquareFeedback::Capture));
        assert_eq!(feedback.squares().len(), 2);
    }

    #[test]
    fn test_feedback_from_game_snapshot() {
        let mut state = crate::GameState::new();
        state.reset();

        let feedback = compute_feedback(&state.snapshot(), Some(sq("g1")));

        assert_eq!(feedback.get(sq("g1")), Some(SquareFeedback::Origin));
        assert_eq!(feedback.get(sq("f3")), Some(SquareFeedback::Destination));
        assert_eq!(feedback.get(sq("h3")), Some(SquareFeedback::Destination));
        assert_eq!(state.current_player(), Side::White);
    }
}
