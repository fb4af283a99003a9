//! Chess rules and legality engine.
//!
//! This crate answers the questions a chess UI cannot: which moves a
//! piece may legally make, whether a player is in check, what the board
//! looks like after a move, and whether the game has ended. It has no
//! search, no evaluation, and no clocks.
//!
//! - [`Board`] - immutable 8x8 board value type
//! - [`valid_moves`] - legal destination squares for a piece
//! - [`apply`] - functional move execution (castling and en passant aware)
//! - [`is_in_check`], [`is_checkmate`], [`is_stalemate`],
//!   [`insufficient_material`] - check and game-end queries
//! - [`move_notation`] - simplified algebraic notation
//! - [`Game`] - game state layer tracking history, turn, and castling rights
//!
//! # Architecture
//!
//! Every query is a pure function of `(board, previous board, castling
//! rights, player)`. Boards are values: hypothetical moves build a new
//! board, test it, and discard it. Check detection rests on an attack
//! map that never considers castling, so castling generation can call
//! it without recursion.
//!
//! # Example
//!
//! ```
//! use chess_core::{Move, Square};
//! use chess_rules::Game;
//!
//! let mut game = Game::new();
//! let knight_moves = game.legal_moves(Square::B1).unwrap();
//! assert_eq!(knight_moves.len(), 2);
//!
//! game.make_move(Move::from_coords("e2e4").unwrap()).unwrap();
//! game.make_move(Move::from_coords("e7e5").unwrap()).unwrap();
//! assert!(game.result().is_none());
//! ```

mod apply;
mod board;
mod endgame;
mod game;
mod legal;
mod movegen;
mod san;

pub use apply::apply;
pub use board::{Board, CastleRights, CastleSide};
pub use endgame::{insufficient_material, is_checkmate, is_stalemate, DrawReason, GameResult};
pub use game::{Game, GameError, RecordedMove};
pub use legal::valid_moves;
pub use movegen::{
    castling_targets, is_in_check, is_square_attacked, pawn_capture_targets, piece_targets,
    TargetList,
};
pub use san::move_notation;
