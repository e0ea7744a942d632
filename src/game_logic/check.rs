//! Attack detection and move simulation.

use std::ops::Deref;

use super::GameState;
use super::movegen::{Direction, KNIGHT_OFFSETS};
use crate::board::{Board, Kind, Piece, Position, Side};

/// Squares holding enemy pieces that attack `side`'s king on `king`.
///
/// Walks the eight rays out from the king and looks at the first occupant of
/// each, then checks the eight knight squares. Lazy, so callers that only
/// need a yes/no stop at the first attacker.
pub fn attackers(board: &Board, king: Position, side: Side) -> impl Iterator<Item = Position> + '_ {
    let along_rays = Direction::ALL.into_iter().filter_map(move |direction| {
        let (d_column, d_row) = direction.step();
        let mut current = king;
        let mut distance = 0u8;
        while let Some(next) = current.offset(d_column, d_row) {
            distance += 1;
            if let Some(occupant) = board.get(next) {
                return attacks_along(occupant, side, direction, distance).then_some(next);
            }
            current = next;
        }
        None
    });

    let enemy_knight = Piece::new(Kind::Knight, side.opponent());
    let knights = KNIGHT_OFFSETS
        .into_iter()
        .filter_map(move |(d_column, d_row)| king.offset(d_column, d_row))
        .filter(move |&square| board.get(square) == Some(enemy_knight));

    along_rays.chain(knights)
}

/// Whether `occupant`, the first piece met `distance` squares from the king
/// along `direction`, attacks the king.
fn attacks_along(occupant: Piece, side: Side, direction: Direction, distance: u8) -> bool {
    if !occupant.is_enemy_of(side) {
        return false;
    }
    let adjacent = distance == 1;
    let diagonal = !direction.is_orthogonal();
    match occupant.kind {
        Kind::Queen => true,
        Kind::Rook => !diagonal,
        Kind::Bishop => diagonal,
        Kind::King => adjacent,
        // Seen from the king, an attacking pawn sits one row behind its own
        // direction of travel.
        Kind::Pawn => adjacent && diagonal && direction.step().1 == -occupant.owner.forward(),
        Kind::Knight => false,
    }
}

/// A move played on the live board that is undone when the guard drops.
///
/// Both touched squares are written back exactly as they were, which also
/// restores the cached king squares.
pub(super) struct TrialMove<'a> {
    state: &'a mut GameState,
    from: (Position, Option<Piece>),
    to: (Position, Option<Piece>),
}

impl<'a> TrialMove<'a> {
    pub(super) fn play(state: &'a mut GameState, piece: Piece, from: Position, to: Position) -> Self {
        let previous_from = state.put(from, None);
        let previous_to = state.put(to, Some(piece));
        Self {
            state,
            from: (from, previous_from),
            to: (to, previous_to),
        }
    }
}

impl Deref for TrialMove<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.state
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        let (to, previous_to) = self.to;
        let (from, previous_from) = self.from;
        self.state.put(to, previous_to);
        self.state.put(from, previous_from);
    }
}
