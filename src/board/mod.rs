pub mod piece;
pub mod position;

pub use piece::{Kind, Piece, Side};
pub use position::{
    InvalidCoordinate, MAX_COLUMN, MAX_ROW, MIN_COLUMN, MIN_ROW, NUM_SQUARES, Position,
};

/// Back rank layout from the a-column to the h-column.
const BACK_RANK: [Kind; 8] = [
    Kind::Rook,
    Kind::Knight,
    Kind::Bishop,
    Kind::Queen,
    Kind::King,
    Kind::Bishop,
    Kind::Knight,
    Kind::Rook,
];

/// Square → piece mapping, one slot per square (index 0 = a1, 63 = h8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; NUM_SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with no pieces.
    pub const fn empty() -> Self {
        Self {
            squares: [None; NUM_SQUARES],
        }
    }

    /// The standard starting position.
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for (column, kind) in (0i8..).zip(BACK_RANK) {
            for (side, back_row, pawn_row) in [(Side::White, 0, 1), (Side::Black, 7, 6)] {
                if let Some(back) = Position::from_indices(column, back_row) {
                    board.set(back, Some(Piece::new(kind, side)));
                }
                if let Some(pawn) = Position::from_indices(column, pawn_row) {
                    board.set(pawn, Some(Piece::new(Kind::Pawn, side)));
                }
            }
        }
        board
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn get(&self, position: Position) -> Option<Piece> {
        self.squares[position.index() as usize]
    }

    /// Replace the contents of a square, returning what was there.
    #[inline]
    pub fn set(&mut self, position: Position, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[position.index() as usize], piece)
    }

    /// Empty a square, returning what was there.
    #[inline]
    pub fn take(&mut self, position: Position) -> Option<Piece> {
        self.set(position, None)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(Option::is_none)
    }

    /// All occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|position| self.get(position).map(|piece| (position, piece)))
    }

    /// Occupied squares owned by `side`, in index order.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.owner == side)
    }
}
