//! Pseudo-legal move generation.
//!
//! Every function here ignores whether the mover's king ends up attacked;
//! that filter lives in [`GameState`](super::GameState).

use crate::board::{Board, Kind, Piece, Position, Side};

/// One of the eight compass directions a ray can travel in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// (Δcolumn, Δrow) of a single step.
    #[inline]
    pub const fn step(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    #[inline]
    pub const fn is_orthogonal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }
}

/// The eight knight jumps.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

/// How far a ray may travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    Unbounded,
    Steps(u8),
}

/// Whether a ray may end on an enemy piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Captures {
    Allowed,
    Forbidden,
}

/// Walk from `from` in `direction`, pushing every reachable square into `out`.
///
/// Empty squares are added and the walk continues. An enemy is added only if
/// captures are allowed, and ends the walk either way. A friendly piece ends
/// the walk without being added.
pub fn walk_ray(
    board: &Board,
    from: Position,
    mover: Side,
    direction: Direction,
    range: Range,
    captures: Captures,
    out: &mut Vec<Position>,
) {
    let (d_column, d_row) = direction.step();
    let mut remaining = match range {
        Range::Unbounded => u8::MAX,
        Range::Steps(n) => n,
    };
    let mut current = from;

    while remaining > 0 {
        let Some(next) = current.offset(d_column, d_row) else {
            return;
        };
        match board.get(next) {
            None => out.push(next),
            Some(occupant) => {
                if captures == Captures::Allowed && occupant.is_enemy_of(mover) {
                    out.push(next);
                }
                return;
            }
        }
        current = next;
        remaining -= 1;
    }
}

fn walk_rays(
    board: &Board,
    from: Position,
    mover: Side,
    directions: &[Direction],
    range: Range,
    out: &mut Vec<Position>,
) {
    for &direction in directions {
        walk_ray(board, from, mover, direction, range, Captures::Allowed, out);
    }
}

pub fn rook_moves(board: &Board, from: Position, mover: Side) -> Vec<Position> {
    let mut out = Vec::new();
    walk_rays(board, from, mover, &Direction::ORTHOGONAL, Range::Unbounded, &mut out);
    out
}

pub fn bishop_moves(board: &Board, from: Position, mover: Side) -> Vec<Position> {
    let mut out = Vec::new();
    walk_rays(board, from, mover, &Direction::DIAGONAL, Range::Unbounded, &mut out);
    out
}

pub fn queen_moves(board: &Board, from: Position, mover: Side) -> Vec<Position> {
    let mut out = rook_moves(board, from, mover);
    out.extend(bishop_moves(board, from, mover));
    out
}

/// One step in any direction. No castling.
pub fn king_moves(board: &Board, from: Position, mover: Side) -> Vec<Position> {
    let mut out = Vec::new();
    walk_rays(board, from, mover, &Direction::ORTHOGONAL, Range::Steps(1), &mut out);
    walk_rays(board, from, mover, &Direction::DIAGONAL, Range::Steps(1), &mut out);
    out
}

/// Knights jump, so only the landing square matters.
pub fn knight_moves(board: &Board, from: Position, mover: Side) -> Vec<Position> {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(d_column, d_row)| from.offset(d_column, d_row))
        .filter(|&to| board.get(to).is_none_or(|occupant| occupant.is_enemy_of(mover)))
        .collect()
}

/// Forward pushes never capture; diagonal steps only capture. No en passant.
pub fn pawn_moves(board: &Board, from: Position, mover: Side) -> Vec<Position> {
    let mut out = Vec::new();
    let forward = mover.forward();

    let direction = match mover {
        Side::White => Direction::North,
        Side::Black => Direction::South,
    };
    let range = if from.row() == mover.pawn_start_row() {
        Range::Steps(2)
    } else {
        Range::Steps(1)
    };
    walk_ray(board, from, mover, direction, range, Captures::Forbidden, &mut out);

    for d_column in [1, -1] {
        if let Some(target) = from.offset(d_column, forward)
            && board
                .get(target)
                .is_some_and(|occupant| occupant.is_enemy_of(mover))
        {
            out.push(target);
        }
    }
    out
}

/// Pseudo-legal destinations for `piece` standing on `from`.
pub fn moves_for(board: &Board, piece: Piece, from: Position) -> Vec<Position> {
    let mover = piece.owner;
    match piece.kind {
        Kind::Pawn => pawn_moves(board, from, mover),
        Kind::Knight => knight_moves(board, from, mover),
        Kind::Bishop => bishop_moves(board, from, mover),
        Kind::Rook => rook_moves(board, from, mover),
        Kind::Queen => queen_moves(board, from, mover),
        Kind::King => king_moves(board, from, mover),
    }
}

/// Pseudo-legal destinations for whatever stands on `from`; empty if nothing does.
pub fn pseudo_legal_moves(board: &Board, from: Position) -> Vec<Position> {
    board
        .get(from)
        .map(|piece| moves_for(board, piece, from))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_case::test_case;

    fn sq(s: &str) -> Position {
        s.parse().expect("test square is valid")
    }

    fn set_of(squares: &[&str]) -> HashSet<Position> {
        squares.iter().map(|s| sq(s)).collect()
    }

    fn board_with(pieces: &[(&str, Piece)]) -> Board {
        let mut board = Board::empty();
        for (square, piece) in pieces {
            board.set(sq(square), Some(*piece));
        }
        board
    }

    fn assert_moves(board: &Board, from: &str, expected: &[&str]) {
        let moves = pseudo_legal_moves(board, sq(from));
        let unique: HashSet<Position> = moves.iter().copied().collect();
        assert_eq!(unique.len(), moves.len(), "duplicate destinations from {from}");
        assert_eq!(unique, set_of(expected), "moves from {from}");
    }

    #[test]
    fn bishop_slides_until_enemy() {
        let mut board = board_with(&[("b1", Piece::white(Kind::Bishop))]);
        assert_moves(&board, "b1", &["a2", "c2", "d3", "e4", "f5", "g6", "h7"]);

        board.set(sq("g6"), Some(Piece::black(Kind::Pawn)));
        assert_moves(&board, "b1", &["a2", "c2", "d3", "e4", "f5", "g6"]);
    }

    #[test]
    fn rook_stops_before_friend() {
        let mut board = board_with(&[("g1", Piece::white(Kind::Rook))]);
        assert_moves(
            &board,
            "g1",
            &[
                "a1", "b1", "c1", "d1", "e1", "f1", "h1", "g2", "g3", "g4", "g5", "g6", "g7",
                "g8",
            ],
        );

        board.set(sq("g6"), Some(Piece::white(Kind::Pawn)));
        assert_moves(
            &board,
            "g1",
            &["a1", "b1", "c1", "d1", "e1", "f1", "h1", "g2", "g3", "g4", "g5"],
        );
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let mut board = Board::starting();
        assert_moves(&board, "d8", &[]);

        board = board_with(&[
            ("a8", Piece::black(Kind::Queen)),
            ("b7", Piece::black(Kind::Pawn)),
        ]);
        assert_moves(
            &board,
            "a8",
            &[
                "b8", "c8", "d8", "e8", "f8", "g8", "h8", "a7", "a6", "a5", "a4", "a3", "a2",
                "a1",
            ],
        );

        board.set(sq("b7"), Some(Piece::white(Kind::Knight)));
        let moves: HashSet<Position> = pseudo_legal_moves(&board, sq("a8")).into_iter().collect();
        assert!(moves.contains(&sq("b7")));
        assert!(!moves.contains(&sq("c6")));
        assert_eq!(moves.len(), 15);

        board.take(sq("b7"));
        assert_eq!(pseudo_legal_moves(&board, sq("a8")).len(), 21);
    }

    #[test]
    fn king_moves_one_step() {
        let board = Board::starting();
        assert_moves(&board, "e1", &[]);

        let mut board = board_with(&[
            ("e2", Piece::white(Kind::King)),
            ("e3", Piece::white(Kind::Pawn)),
            ("d2", Piece::white(Kind::Pawn)),
            ("f2", Piece::white(Kind::Pawn)),
        ]);
        assert_moves(&board, "e2", &["d3", "f3", "d1", "e1", "f1"]);

        board.set(sq("f2"), Some(Piece::black(Kind::Knight)));
        assert_moves(&board, "e2", &["d3", "f3", "d1", "e1", "f1", "f2"]);

        board.take(sq("e3"));
        board.take(sq("d2"));
        assert_moves(&board, "e2", &["d3", "f3", "d1", "e1", "f1", "f2", "e3", "d2"]);
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let mut board = Board::starting();
        assert_moves(&board, "g1", &["f3", "h3"]);

        board.set(sq("h3"), Some(Piece::white(Kind::Pawn)));
        assert_moves(&board, "g1", &["f3"]);

        board.set(sq("h3"), Some(Piece::black(Kind::Knight)));
        assert_moves(&board, "g1", &["f3", "h3"]);
    }

    #[test_case(&[], &["a3", "c3", "d2"]; "open board")]
    #[test_case(&["d2"], &["a3", "c3"]; "friend on d2")]
    #[test_case(&["a3", "c3", "d2"], &[]; "all friends")]
    fn knight_on_b1_with_friends(friends: &[&str], expected: &[&str]) {
        let mut board = board_with(&[
            ("b1", Piece::white(Kind::Knight)),
            ("h8", Piece::white(Kind::King)),
        ]);
        for friend in friends {
            board.set(sq(friend), Some(Piece::white(Kind::Pawn)));
        }
        assert_moves(&board, "b1", expected);
    }

    #[test]
    fn knight_in_centre() {
        let board = board_with(&[("d3", Piece::white(Kind::Knight))]);
        assert_moves(&board, "d3", &["b2", "b4", "c1", "c5", "e1", "e5", "f2", "f4"]);
    }

    #[test]
    fn pawn_first_move_and_blocking() {
        let mut board = Board::starting();
        assert_moves(&board, "e2", &["e3", "e4"]);

        board.set(sq("e3"), Some(Piece::white(Kind::Pawn)));
        assert_moves(&board, "e2", &[]);

        board.set(sq("e3"), Some(Piece::black(Kind::Knight)));
        assert_moves(&board, "e2", &[]);

        board.take(sq("e3"));
        board.set(sq("f3"), Some(Piece::black(Kind::Knight)));
        assert_moves(&board, "e2", &["e3", "e4", "f3"]);

        board.take(sq("f3"));
        board.set(sq("e4"), Some(Piece::black(Kind::Knight)));
        assert_moves(&board, "e2", &["e3"]);
    }

    #[test]
    fn pawn_regular_move() {
        let mut board = board_with(&[("e3", Piece::white(Kind::Pawn))]);
        assert_moves(&board, "e3", &["e4"]);

        board.set(sq("e4"), Some(Piece::black(Kind::Knight)));
        assert_moves(&board, "e3", &[]);

        board.take(sq("e4"));
        board.set(sq("f4"), Some(Piece::black(Kind::Knight)));
        assert_moves(&board, "e3", &["e4", "f4"]);

        board.set(sq("d4"), Some(Piece::white(Kind::Knight)));
        assert_moves(&board, "e3", &["e4", "f4"]);
    }

    #[test]
    fn black_pawn_moves_down() {
        let mut board = Board::starting();
        assert_moves(&board, "d7", &["d6", "d5"]);

        board.set(sq("c6"), Some(Piece::white(Kind::Bishop)));
        board.set(sq("e6"), Some(Piece::black(Kind::Bishop)));
        assert_moves(&board, "d7", &["d6", "d5", "c6"]);

        let board = board_with(&[("a5", Piece::black(Kind::Pawn))]);
        assert_moves(&board, "a5", &["a4"]);
    }

    #[test]
    fn pawn_on_last_row_has_no_forward_move() {
        let board = board_with(&[("c8", Piece::white(Kind::Pawn))]);
        assert_moves(&board, "c8", &[]);
    }

    #[test]
    fn ray_respects_range() {
        let board = board_with(&[("a1", Piece::white(Kind::Rook))]);
        let mut out = Vec::new();
        walk_ray(
            &board,
            sq("a1"),
            Side::White,
            Direction::North,
            Range::Steps(3),
            Captures::Allowed,
            &mut out,
        );
        assert_eq!(out, vec![sq("a2"), sq("a3"), sq("a4")]);
    }

    #[test]
    fn ray_without_captures_stops_at_enemy() {
        let board = board_with(&[("a4", Piece::black(Kind::Rook))]);
        let mut out = Vec::new();
        walk_ray(
            &board,
            sq("a1"),
            Side::White,
            Direction::North,
            Range::Unbounded,
            Captures::Forbidden,
            &mut out,
        );
        assert_eq!(out, vec![sq("a2"), sq("a3")]);
    }

    #[test]
    fn empty_square_has_no_moves() {
        assert!(pseudo_legal_moves(&Board::starting(), sq("e4")).is_empty());
    }
}
