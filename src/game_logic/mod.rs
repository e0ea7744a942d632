pub mod check;
pub mod movegen;

use std::collections::BTreeMap;

use log::{debug, info, trace};
use shakmaty::fen::{Fen, LossyFenError, ParseFenError};
use shakmaty::{Color, File, Rank, Role, Setup, Square};

use crate::board::{Board, InvalidCoordinate, Kind, Piece, Position, Side};
use crate::feedback::{CheckInfo, FeedbackSource};
use check::TrialMove;

/// Legal destinations keyed by origin square.
///
/// Every value is non-empty; origins without a legal move are left out.
pub type LegalMoves = BTreeMap<Position, Vec<Position>>;

/// Errors raised while building a position from outside input.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("invalid FEN: {0}")]
    Fen(#[from] ParseFenError),
    #[error(transparent)]
    Coordinate(#[from] InvalidCoordinate),
    #[error("{side} has more than one king ({first} and {second})")]
    DuplicateKing {
        side: Side,
        first: Position,
        second: Position,
    },
}

/// The board, whose turn it is, and whether the game has ended.
///
/// A freshly constructed state has an empty board; call [`GameState::reset`]
/// to set up the standard starting position.
#[derive(Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side_to_move: Side,
    /// Always the square holding White's king, if there is one.
    white_king: Option<Position>,
    /// Always the square holding Black's king, if there is one.
    black_king: Option<Position>,
    over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// An empty board with White to move.
    pub const fn new() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Side::White,
            white_king: None,
            black_king: None,
            over: false,
        }
    }

    /// Reinitialize to the standard starting position with White to move.
    pub fn reset(&mut self) {
        *self = Self::new();
        for (position, piece) in Board::starting().pieces() {
            self.put(position, Some(piece));
        }
    }

    /// Builds a position from literal placements.
    ///
    /// A later placement on the same square replaces the earlier one. Game
    /// over is evaluated for `side_to_move` once everything is placed.
    pub fn with_pieces<I>(side_to_move: Side, placements: I) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = (Position, Piece)>,
    {
        let mut state = Self::new();
        state.side_to_move = side_to_move;
        for (position, piece) in placements {
            if piece.kind == Kind::King
                && let Some(first) = state.king_square(piece.owner)
                && first != position
            {
                return Err(SetupError::DuplicateKing {
                    side: piece.owner,
                    first,
                    second: position,
                });
            }
            state.put(position, Some(piece));
        }
        state.over = state.is_checkmated(side_to_move);
        Ok(state)
    }

    /// Imports piece placement and side to move from a FEN string.
    ///
    /// Castling rights, en passant square and clocks are accepted but have
    /// no effect.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let setup = fen.parse::<Fen>()?.into_setup();
        let mut placements = Vec::new();
        for rank in Rank::ALL {
            for file in File::ALL {
                if let Some(piece) = setup.board.piece_at(Square::from_coords(file, rank)) {
                    let position = Position::from_chars(file.char(), rank.char())?;
                    placements.push((position, piece_from_shakmaty(piece)));
                }
            }
        }
        let state = Self::with_pieces(side_from_color(setup.turn), placements)?;
        info!("loaded position {}", state.to_fen());
        Ok(state)
    }

    /// Exports piece placement and side to move as FEN.
    pub fn to_fen(&self) -> String {
        let mut board = shakmaty::Board::empty();
        for (position, piece) in self.board.pieces() {
            let square = Square::from_coords(
                File::ALL[position.column_index() as usize],
                Rank::ALL[position.row_index() as usize],
            );
            board.set_piece_at(square, piece_to_shakmaty(piece));
        }
        let setup = Setup {
            board,
            turn: color_from_side(self.side_to_move),
            ..Setup::empty()
        };
        Fen::try_from_setup(setup)
            .unwrap_or_else(LossyFenError::ignore)
            .to_string()
    }

    #[inline]
    pub fn current_player(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// The side that delivered checkmate, once the game is over.
    pub fn winner(&self) -> Option<Side> {
        self.over.then(|| self.side_to_move.opponent())
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        self.board.get(position)
    }

    /// Get the piece at an algebraic square such as "d5".
    pub fn piece_at_str(&self, square: &str) -> Result<Option<Piece>, InvalidCoordinate> {
        Ok(self.piece_at(square.parse()?))
    }

    #[inline]
    pub fn king_square(&self, side: Side) -> Option<Position> {
        match side {
            Side::White => self.white_king,
            Side::Black => self.black_king,
        }
    }

    /// Moves a piece given algebraic squares.
    ///
    /// `Ok(false)` means the move is not permitted and nothing changed. Only
    /// a malformed square is an error.
    pub fn move_piece(&mut self, from: &str, to: &str) -> Result<bool, InvalidCoordinate> {
        if self.over {
            debug!("rejecting {from}-{to}: game is over");
            return Ok(false);
        }
        let from: Position = from.parse()?;
        let to: Position = to.parse()?;
        Ok(self.try_move(from, to))
    }

    /// Plays `from`-`to` for the side to move if it is legal.
    ///
    /// On success the side to move flips and game over is re-evaluated for
    /// the new side to move.
    pub fn try_move(&mut self, from: Position, to: Position) -> bool {
        if self.over {
            debug!("rejecting {from}-{to}: game is over");
            return false;
        }
        let mover = self.side_to_move;
        let Some(piece) = self.board.get(from) else {
            debug!("rejecting {from}-{to}: no piece on {from}");
            return false;
        };
        if piece.owner != mover {
            debug!("rejecting {from}-{to}: {piece} does not belong to {mover}");
            return false;
        }
        if !movegen::moves_for(&self.board, piece, from).contains(&to) {
            debug!("rejecting {from}-{to}: {piece} cannot reach {to}");
            return false;
        }
        if self.would_leave_king_attacked(mover, piece, from, to) {
            debug!("rejecting {from}-{to}: {mover} king would be attacked");
            return false;
        }

        self.put(from, None);
        if let Some(captured) = self.put(to, Some(piece)) {
            debug!("{piece} {from}-{to} captures {captured}");
        }
        self.side_to_move = mover.opponent();
        self.over = self.is_checkmated(self.side_to_move);
        if self.over {
            info!("checkmate: {mover} wins");
        }
        true
    }

    /// Destinations for the piece on `from`, ignoring check.
    pub fn pseudo_legal_moves(&self, from: Position) -> Vec<Position> {
        movegen::pseudo_legal_moves(&self.board, from)
    }

    /// Every legal move for `side`.
    pub fn legal_moves(&mut self, side: Side) -> LegalMoves {
        let origins: Vec<(Position, Piece)> = self.board.pieces_of(side).collect();
        let mut legal = LegalMoves::new();
        for (from, piece) in origins {
            let destinations: Vec<Position> = movegen::moves_for(&self.board, piece, from)
                .into_iter()
                .filter(|&to| !self.would_leave_king_attacked(side, piece, from, to))
                .collect();
            if !destinations.is_empty() {
                legal.insert(from, destinations);
            }
        }
        legal
    }

    /// Every legal move for the side to move.
    pub fn current_legal_moves(&mut self) -> LegalMoves {
        self.legal_moves(self.side_to_move)
    }

    /// True if `side` has at least one legal move. Stops at the first one.
    pub fn has_legal_move(&mut self, side: Side) -> bool {
        let origins: Vec<(Position, Piece)> = self.board.pieces_of(side).collect();
        origins.into_iter().any(|(from, piece)| {
            movegen::moves_for(&self.board, piece, from)
                .into_iter()
                .any(|to| !self.would_leave_king_attacked(side, piece, from, to))
        })
    }

    /// True if an enemy piece currently attacks `side`'s king.
    ///
    /// A side without a king on the board is never attacked.
    pub fn is_king_attacked(&self, side: Side) -> bool {
        self.king_square(side)
            .is_some_and(|king| check::attackers(&self.board, king, side).next().is_some())
    }

    /// Squares of the enemy pieces attacking `side`'s king, in index order.
    pub fn checkers(&self, side: Side) -> Vec<Position> {
        let mut found: Vec<Position> = self
            .king_square(side)
            .map(|king| check::attackers(&self.board, king, side).collect())
            .unwrap_or_default();
        found.sort();
        found
    }

    /// In check with no legal move. Stalemate is not checkmate.
    pub fn is_checkmated(&mut self, side: Side) -> bool {
        self.is_king_attacked(side) && !self.has_legal_move(side)
    }

    /// Everything the feedback layer needs about the position right now.
    pub fn snapshot(&mut self) -> Snapshot {
        let side = self.side_to_move;
        let check = self
            .king_square(side)
            .filter(|_| self.is_king_attacked(side))
            .map(|king_square| CheckInfo {
                king_square,
                checkers: self.checkers(side),
            });
        Snapshot {
            board: self.board,
            side_to_move: side,
            legal_moves: self.legal_moves(side),
            check,
            over: self.over,
        }
    }

    /// Plays `piece` from `from` to `to` on the live board, evaluates whether
    /// `side`'s king is attacked, and puts the board back.
    fn would_leave_king_attacked(&mut self, side: Side, piece: Piece, from: Position, to: Position) -> bool {
        let trial = TrialMove::play(self, piece, from, to);
        let attacked = trial.is_king_attacked(side);
        trace!("trial {piece} {from}-{to}: {side} king attacked = {attacked}");
        attacked
    }

    /// Writes `piece` into a square and keeps the king squares in sync.
    fn put(&mut self, position: Position, piece: Option<Piece>) -> Option<Piece> {
        let previous = self.board.set(position, piece);
        if let Some(old) = previous
            && old.kind == Kind::King
            && self.king_square(old.owner) == Some(position)
        {
            *self.king_slot(old.owner) = None;
        }
        if let Some(new) = piece
            && new.kind == Kind::King
        {
            *self.king_slot(new.owner) = Some(position);
        }
        previous
    }

    fn king_slot(&mut self, side: Side) -> &mut Option<Position> {
        match side {
            Side::White => &mut self.white_king,
            Side::Black => &mut self.black_king,
        }
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("position", &self.to_fen())
            .field("white_king", &self.white_king)
            .field("black_king", &self.black_king)
            .field("over", &self.over)
            .finish()
    }
}

/// Position summary for the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    board: Board,
    side_to_move: Side,
    legal_moves: LegalMoves,
    check: Option<CheckInfo>,
    over: bool,
}

impl Snapshot {
    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.over
    }
}

impl FeedbackSource for Snapshot {
    fn legal_moves(&self) -> &LegalMoves {
        &self.legal_moves
    }

    fn piece_at(&self, position: Position) -> Option<Piece> {
        self.board.get(position)
    }

    fn check_info(&self) -> Option<&CheckInfo> {
        self.check.as_ref()
    }
}

fn side_from_color(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

fn color_from_side(side: Side) -> Color {
    match side {
        Side::White => Color::White,
        Side::Black => Color::Black,
    }
}

fn piece_from_shakmaty(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => Kind::Pawn,
        Role::Knight => Kind::Knight,
        Role::Bishop => Kind::Bishop,
        Role::Rook => Kind::Rook,
        Role::Queen => Kind::Queen,
        Role::King => Kind::King,
    };
    Piece::new(kind, side_from_color(piece.color))
}

fn piece_to_shakmaty(piece: Piece) -> shakmaty::Piece {
    let role = match piece.kind {
        Kind::Pawn => Role::Pawn,
        Kind::Knight => Role::Knight,
        Kind::Bishop => Role::Bishop,
        Kind::Rook => Role::Rook,
        Kind::Queen => Role::Queen,
        Kind::King => Role::King,
    };
    shakmaty::Piece {
        color: color_from_side(piece.owner),
        role,
    }
}
