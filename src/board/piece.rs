use std::fmt;

/// The two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// The other side.
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row step a pawn of this side moves by: +1 for White, -1 for Black.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Row (1-8) on which this side's pawns start.
    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Side::White => 2,
            Side::Black => 7,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("White"),
            Side::Black => f.write_str("Black"),
        }
    }
}

/// Piece kinds. Each kind has exactly one movement rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Pawn,
        Kind::Knight,
        Kind::Bishop,
        Kind::Rook,
        Kind::Queen,
        Kind::King,
    ];

    /// Lowercase letter identifying the kind.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Kind::Pawn => 'p',
            Kind::Knight => 'n',
            Kind::Bishop => 'b',
            Kind::Rook => 'r',
            Kind::Queen => 'q',
            Kind::King => 'k',
        }
    }
}

/// A piece: a kind owned by a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: Kind,
    pub owner: Side,
}

impl Piece {
    #[inline]
    pub const fn new(kind: Kind, owner: Side) -> Self {
        Self { kind, owner }
    }

    #[inline]
    pub const fn white(kind: Kind) -> Self {
        Self::new(kind, Side::White)
    }

    #[inline]
    pub const fn black(kind: Kind) -> Self {
        Self::new(kind, Side::Black)
    }

    /// Character shown for this piece on the console board.
    ///
    /// White pieces are lowercase and Black pieces uppercase.
    pub fn identifier(self) -> char {
        match self.owner {
            Side::White => self.kind.letter(),
            Side::Black => self.kind.letter().to_ascii_uppercase(),
        }
    }

    /// True if this piece is owned by the opponent of `side`.
    #[inline]
    pub fn is_enemy_of(self, side: Side) -> bool {
        self.owner != side
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.owner, self.kind)
    }
}
