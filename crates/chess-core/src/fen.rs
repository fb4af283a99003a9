//! FEN-style position text parsing.
//!
//! This engine keeps no clocks and derives en passant from the previous
//! board snapshot, so only the first three FEN fields carry meaning
//! here: piece placement, active color, and castling availability.
//! Trailing fields (en passant square, clocks) are accepted and
//! ignored, which keeps standard six-field FEN strings usable as test
//! fixtures.

use thiserror::Error;

/// Errors that can occur when parsing FEN text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("empty FEN string")]
    Empty,

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),
}

/// Parsed FEN fields.
///
/// Holds the raw text of the fields the engine consumes; the rules
/// crate converts these into its board and rights representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Piece placement (e.g., "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").
    pub piece_placement: String,
    /// Active color ('w' or 'b'). Defaults to 'w' when the field is absent.
    pub active_color: char,
    /// Castling availability (e.g., "KQkq", "-"). Defaults to "-".
    pub castling: String,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses FEN text. Only the placement field is required.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();

        let piece_placement = parts.next().ok_or(FenError::Empty)?;
        Self::validate_piece_placement(piece_placement)?;

        let active_color = match parts.next() {
            None => 'w',
            Some("w") => 'w',
            Some("b") => 'b',
            Some(other) => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parts.next().unwrap_or("-");
        Self::validate_castling(castling)?;

        // En passant and clock fields are ignored if present.

        Ok(Fen {
            piece_placement: piece_placement.to_string(),
            active_color,
            castling: castling.to_string(),
        })
    }

    fn validate_piece_placement(placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        for (i, rank) in ranks.iter().enumerate() {
            let mut squares = 0;
            for c in rank.chars() {
                if c.is_ascii_digit() {
                    squares += c.to_digit(10).unwrap();
                } else if "pnbrqkPNBRQK".contains(c) {
                    squares += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - i
                    )));
                }
            }
            if squares != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - i,
                    squares
                )));
            }
        }

        Ok(())
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
        }

        Ok(())
    }
}

impl Default for Fen {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
