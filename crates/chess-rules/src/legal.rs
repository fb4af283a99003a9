//! Legal move computation.

use crate::board::{Board, CastleRights};
use crate::movegen::{
    castling_targets, pawn_capture_targets, piece_targets, retain_safe, TargetList,
};
use chess_core::{PieceKind, Square};

/// Returns every legal destination for the piece on `from`.
///
/// Combines the piece's movement targets with pawn captures (including
/// en passant, when `previous` is given) and castling, then drops every
/// candidate that would leave the mover's own king in check. An empty
/// `from` square yields an empty list.
///
/// This is a pure query: calling it never changes any board, and
/// calling it twice with the same arguments gives the same answer.
pub fn valid_moves(
    board: &Board,
    previous: Option<&Board>,
    rights: CastleRights,
    from: Square,
) -> TargetList {
    let Some(piece) = board.piece_at(from) else {
        return TargetList::new();
    };

    let mut targets = piece_targets(board, piece, from);
    match piece.kind {
        PieceKind::Pawn => {
            pawn_capture_targets(board, previous, piece.color, from, &mut targets);
        }
        PieceKind::King => {
            castling_targets(board, rights, piece, from, &mut targets);
        }
        _ => {}
    }

    retain_safe(board, piece.color, from, &mut targets);
    targets
}
