//! Simplified algebraic notation.

use crate::board::Board;
use chess_core::{Move, PieceKind};

/// Renders a move in simplified algebraic notation, judged against the
/// board the move is about to be played on.
///
/// Simplified means no disambiguation between same-kind pieces that
/// could reach the destination, and no check or mate suffixes. Castling
/// is `O-O` / `O-O-O`, captures get an `x`, pawn captures are prefixed
/// with the origin file, and promotions get an `=Q` style suffix.
///
/// Returns `None` if the origin square is empty.
pub fn move_notation(board: &Board, mv: Move) -> Option<String> {
    let from = mv.from();
    let to = mv.to();
    let piece = board.piece_at(from)?;

    if piece.kind == PieceKind::King && from.file_index().abs_diff(to.file_index()) > 1 {
        return Some(if from.file_index() < to.file_index() {
            "O-O".to_owned()
        } else {
            "O-O-O".to_owned()
        });
    }

    let mut notation = String::new();
    let is_capture = match piece.kind {
        PieceKind::Pawn => {
            // Any pawn move that changes file is a capture, en passant
            // included even though the destination square is empty.
            let captures = from.file() != to.file();
            if captures {
                notation.push(from.file().to_char());
            }
            captures
        }
        kind => {
            notation.push(kind.letter());
            !board.is_vacant(to)
        }
    };
    if is_capture {
        notation.push('x');
    }

    notation.push(to.file().to_char());
    notation.push(to.rank().to_char());

    if let Some(kind) = mv.promotion() {
        notation.push('=');
        notation.push(kind.letter());
    }

    Some(notation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;

    fn board(placement: &str) -> Board {
        Board::from_fen(placement).unwrap()
    }

    fn mv(coords: &str) -> Move {
        Move::from_coords(coords).unwrap()
    }

    #[test]
    fn pawn_push() {
        let board = Board::standard();
        assert_eq!(move_notation(&board, mv("e2e4")).as_deref(), Some("e4"));
        assert_eq!(move_notation(&board, mv("d2d3")).as_deref(), Some("d3"));
    }

    #[test]
    fn piece_moves() {
        let board = Board::standard();
        assert_eq!(move_notation(&board, mv("g1f3")).as_deref(), Some("Nf3"));

        let board = self::board("4k3/8/8/8/3Q4/8/8/4K3");
        assert_eq!(move_notation(&board, mv("d4d8")).as_deref(), Some("Qd8"));
    }

    #[test]
    fn piece_capture() {
        let board = board("4k3/8/8/3p4/8/4N3/8/4K3");
        assert_eq!(move_notation(&board, mv("e3d5")).as_deref(), Some("Nxd5"));
    }

    #[test]
    fn pawn_capture_carries_origin_file() {
        let board = board("4k3/8/8/3p4/4P3/8/8/4K3");
        assert_eq!(move_notation(&board, mv("e4d5")).as_deref(), Some("exd5"));
    }

    #[test]
    fn en_passant_reads_as_a_capture() {
        // Destination d6 is empty, but the file changed.
        let board = board("4k3/8/8/3pP3/8/8/8/4K3");
        assert_eq!(move_notation(&board, mv("e5d6")).as_deref(), Some("exd6"));
    }

    #[test]
    fn castling_notation() {
        let board = board("r3k2r/8/8/8/8/8/8/R3K2R");
        assert_eq!(
            move_notation(&board, Move::new(Square::E1, Square::G1)).as_deref(),
            Some("O-O")
        );
        assert_eq!(
            move_notation(&board, Move::new(Square::E1, Square::C1)).as_deref(),
            Some("O-O-O")
        );
        assert_eq!(
            move_notation(&board, Move::new(Square::E8, Square::G8)).as_deref(),
            Some("O-O")
        );
        assert_eq!(
            move_notation(&board, Move::new(Square::E8, Square::C8)).as_deref(),
            Some("O-O-O")
        );
    }

    #[test]
    fn king_single_step_is_plain() {
        let board = board("4k3/8/8/8/8/8/8/4K3");
        assert_eq!(move_notation(&board, mv("e1f1")).as_deref(), Some("Kf1"));
    }

    #[test]
    fn promotion_suffix() {
        let board = board("4k3/6P1/8/8/8/8/8/4K3");
        assert_eq!(move_notation(&board, mv("g7g8q")).as_deref(), Some("g8=Q"));
        assert_eq!(move_notation(&board, mv("g7g8n")).as_deref(), Some("g8=N"));
    }

    #[test]
    fn capture_promotion() {
        let board = board("5r2/6P1/8/8/8/8/8/K3k3");
        assert_eq!(
            move_notation(&board, mv("g7f8q")).as_deref(),
            Some("gxf8=Q")
        );
    }

    #[test]
    fn empty_origin_yields_none() {
        assert_eq!(move_notation(&Board::standard(), mv("e4e5")), None);
    }
}
