//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Color`], [`PieceKind`], and [`Piece`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for move descriptors (origin, destination, promotion choice)
//! - [`Fen`] for parsing FEN-style position text

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square};
