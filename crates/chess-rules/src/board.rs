//! Chess board representation.

use chess_core::{Color, Fen, FenError, File, Piece, PieceKind, Square};
use std::fmt;

/// The two board sides a king can castle towards.
///
/// `Left` is towards the a-file rook (queenside), `Right` towards the
/// h-file rook (kingside), seen from White's side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Left,
    Right,
}

/// Remaining castling options for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CastleRights {
    None,
    Left,
    Right,
    #[default]
    Both,
}

impl CastleRights {
    /// Returns true if castling towards the given side is still allowed.
    #[inline]
    pub const fn allows(self, side: CastleSide) -> bool {
        match (self, side) {
            (CastleRights::Both, _) => true,
            (CastleRights::Left, CastleSide::Left) => true,
            (CastleRights::Right, CastleSide::Right) => true,
            _ => false,
        }
    }

    /// Returns the rights with the given side revoked.
    #[inline]
    pub const fn without(self, side: CastleSide) -> Self {
        match (self, side) {
            (CastleRights::Both, CastleSide::Left) => CastleRights::Right,
            (CastleRights::Both, CastleSide::Right) => CastleRights::Left,
            (CastleRights::Left, CastleSide::Left) => CastleRights::None,
            (CastleRights::Right, CastleSide::Right) => CastleRights::None,
            (rights, _) => rights,
        }
    }

    /// Returns the rights with the given side added.
    #[inline]
    pub const fn adding(self, side: CastleSide) -> Self {
        match (self, side) {
            (CastleRights::None, CastleSide::Left) => CastleRights::Left,
            (CastleRights::None, CastleSide::Right) => CastleRights::Right,
            (CastleRights::Right, CastleSide::Left) => CastleRights::Both,
            (CastleRights::Left, CastleSide::Right) => CastleRights::Both,
            (rights, _) => rights,
        }
    }
}

/// An 8x8 chess board.
///
/// `Board` is an immutable value type: operations that "move a piece"
/// build and return a new board, they never alias the original. While a
/// game is ongoing exactly one king of each color must be present;
/// check detection is undefined otherwise.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        Self::from_fen(Fen::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a board from the placement field of a FEN string.
    ///
    /// Accepts either a bare placement ("8/8/.../4K2k") or a full FEN
    /// string, of which only the placement field is used.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = Fen::parse(fen)?;
        Ok(Self::from_fen_fields(&parsed))
    }

    /// Builds a board from already-parsed FEN fields.
    pub fn from_fen_fields(fen: &Fen) -> Self {
        let mut board = Board::empty();

        // FEN lists ranks from rank 8 down to rank 1.
        for (rank_idx, rank_str) in fen.piece_placement.split('/').enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file = 0u8;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if let Some(sq) = Square::from_coords(rank, file) {
                        board.squares[sq.index() as usize] = Some(piece);
                    }
                    file += 1;
                }
            }
        }

        board
    }

    /// Renders the board as a FEN placement field.
    pub fn to_placement(&self) -> String {
        let mut placement = String::new();

        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                let sq = Square::from_coords(rank, file).expect("coords in range");
                if let Some(piece) = self.piece_at(sq) {
                    if empty_count > 0 {
                        placement.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    placement.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                placement.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        placement
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub const fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    /// Returns true if the given square is empty.
    #[inline]
    pub const fn is_vacant(&self, sq: Square) -> bool {
        self.squares[sq.index() as usize].is_none()
    }

    /// Returns a new board with the given square set to `contents`.
    pub fn with(&self, sq: Square, contents: Option<Piece>) -> Board {
        let mut next = self.clone();
        next.squares[sq.index() as usize] = contents;
        next
    }

    /// Sets a square in place. Only used while building derived boards.
    pub(crate) fn put(&mut self, sq: Square, contents: Option<Piece>) {
        self.squares[sq.index() as usize] = contents;
    }

    /// Iterates over the given color's pieces in square-index order
    /// (a1, b1, ..., h8). The order is deterministic, which move
    /// enumeration relies on.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(piece) if piece.is(color) => Some((sq, piece)),
            _ => None,
        })
    }

    /// Iterates over all pieces on the board in square-index order.
    pub fn all_pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Returns the square of the given color's king, if present.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_placement())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = Square::from_coords(rank, file).expect("coords in range");
                match self.piece_at(sq) {
                    Some(piece) => write!(f, "{} ", piece.to_fen_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for file in File::ALL {
            write!(f, "{} ", file.to_char())?;
        }
        Ok(())
    }
}
