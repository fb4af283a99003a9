//! Game-end evaluation: mate, stalemate, and dead positions.

use crate::board::{Board, CastleRights};
use crate::legal::valid_moves;
use crate::movegen::is_in_check;
use chess_core::{Color, PieceKind};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw(DrawReason),
}

/// Why a game was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
}

/// Returns true if the given player has no legal move at all.
///
/// En passant is not considered: a player who is stalemated apart from
/// an en passant capture had that capture available on the previous
/// turn's board too, so the distinction never matters at the moment
/// the position is evaluated here.
fn no_legal_moves(board: &Board, player: Color, rights: CastleRights) -> bool {
    board
        .pieces(player)
        .all(|(from, _)| valid_moves(board, None, rights, from).is_empty())
}

/// Returns true if the given player is stalemated: not in check, but
/// without any legal move.
pub fn is_stalemate(board: &Board, player: Color, rights: CastleRights) -> bool {
    !is_in_check(board, player) && no_legal_moves(board, player, rights)
}

/// Returns true if the given player is checkmated: in check, and
/// without any legal move.
pub fn is_checkmate(board: &Board, player: Color, rights: CastleRights) -> bool {
    is_in_check(board, player) && no_legal_moves(board, player, rights)
}

/// Returns true if neither side can possibly deliver mate.
///
/// Recognized dead positions:
/// - king versus king
/// - king versus king and one minor piece
/// - king and bishop versus king and bishop, both bishops on squares
///   of the same shade
pub fn insufficient_material(board: &Board) -> bool {
    let mut pieces = [(0usize, None, None); 2];
    let mut total = 0usize;

    for (sq, piece) in board.all_pieces() {
        total += 1;
        if total > 4 {
            return false;
        }
        let entry = &mut pieces[piece.color.index()];
        entry.0 += 1;
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Bishop => {
                if entry.1.is_some() {
                    // Two bishops on one side.
                    return false;
                }
                entry.1 = Some(sq);
            }
            PieceKind::Knight => {
                if entry.2.is_some() {
                    return false;
                }
                entry.2 = Some(sq);
            }
            _ => return false,
        }
    }

    match total {
        // Two kings.
        2 => true,
        // King versus king and a single minor piece.
        3 => true,
        // King and bishop each; drawn only when the bishops share a
        // square shade and can never meet.
        4 => match (pieces[0], pieces[1]) {
            ((2, Some(white_bishop), None), (2, Some(black_bishop), None)) => {
                white_bishop.is_light() == black_bishop.is_light()
            }
            _ => false,
        },
        _ => false,
    }
}
