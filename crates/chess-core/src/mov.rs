//! Move representation.
//!
//! A move is a descriptor the caller hands to the engine: origin square,
//! destination square, and the promotion choice if the move promotes a
//! pawn. Whether a move is a capture, castling, or en passant is derived
//! from the board it is applied to, so none of that is encoded here.

use crate::{PieceKind, Square};
use std::fmt;

/// A chess move.
///
/// Encoded compactly: 6 bits origin, 6 bits destination, 3 bits
/// promotion choice = 15 bits of a u16.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Creates a move with no promotion.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move((from.index() as u16) | ((to.index() as u16) << 6))
    }

    /// Creates a promoting move.
    ///
    /// `kind` must be one of [`PieceKind::PROMOTIONS`]; pawns and kings
    /// are not valid promotion targets.
    #[inline]
    pub const fn promoting(from: Square, to: Square, kind: PieceKind) -> Self {
        let code = match kind {
            PieceKind::Knight => 1u16,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            _ => panic!("invalid promotion piece"),
        };
        Move((from.index() as u16) | ((to.index() as u16) << 6) | (code << 12))
    }

    /// Returns the origin square.
    #[inline]
    pub const fn from(self) -> Square {
        match Square::from_index((self.0 & 0x3F) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        match Square::from_index(((self.0 >> 6) & 0x3F) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Returns the promotion choice, if any.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        match self.0 >> 12 {
            1 => Some(PieceKind::Knight),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_coords(self) -> String {
        let promo = match self.promotion() {
            Some(PieceKind::Knight) => "n",
            Some(PieceKind::Bishop) => "b",
            Some(PieceKind::Rook) => "r",
            Some(PieceKind::Queen) => "q",
            _ => "",
        };
        format!("{}{}{}", self.from(), self.to(), promo)
    }

    /// Parses a move from coordinate notation.
    pub fn from_coords(s: &str) -> Option<Self> {
        if s.len() < 4 || s.len() > 5 {
            return None;
        }
        // get() keeps the parse total: a multi-byte character inside
        // the string yields None rather than a slice panic.
        let from = Square::from_algebraic(s.get(0..2)?)?;
        let to = Square::from_algebraic(s.get(2..4)?)?;
        if s.len() == 5 {
            let kind = match s.chars().nth(4)? {
                'n' | 'N' => PieceKind::Knight,
                'b' | 'B' => PieceKind::Bishop,
                'r' | 'R' => PieceKind::Rook,
                'q' | 'Q' => PieceKind::Queen,
                _ => return None,
            };
            Some(Move::promoting(from, to, kind))
        } else {
            Some(Move::new(from, to))
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coords())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coords())
    }
}
