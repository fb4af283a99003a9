//! Functional move execution.

use crate::board::Board;
use chess_core::{File, PieceKind, Square};

/// Returns a new board with the piece on `from` moved to `to`.
///
/// The move is taken on faith: legality checking happens before this,
/// in [`crate::valid_moves`]. Two moves need side effects beyond the
/// piece relocation itself, and both are recognized from geometry
/// alone:
///
/// - A king moving two files is a castle; the matching rook jumps to
///   the square the king crossed.
/// - A pawn landing on an empty square while changing both rank and
///   file is an en passant capture; the passed pawn is removed from
///   the destination file on the origin rank.
///
/// Promotion is not handled here. The caller substitutes the promoted
/// piece on the destination square afterwards.
///
/// # Panics
///
/// Panics if `from` is empty.
pub fn apply(board: &Board, from: Square, to: Square) -> Board {
    let piece = board.piece_at(from).expect("no piece on origin square");
    let mut next = board.clone();

    if piece.kind == PieceKind::King && from.file_index().abs_diff(to.file_index()) > 1 {
        let rank = from.rank();
        let (rook_from, rook_to) = match to.file() {
            File::C => (Square::new(File::A, rank), Square::new(File::D, rank)),
            _ => (Square::new(File::H, rank), Square::new(File::F, rank)),
        };
        let rook = next.piece_at(rook_from);
        next.put(rook_from, None);
        next.put(rook_to, rook);
    }

    if piece.kind == PieceKind::Pawn
        && board.is_vacant(to)
        && from.rank() != to.rank()
        && from.file() != to.file()
    {
        next.put(Square::new(to.file(), from.rank()), None);
    }

    next.put(from, None);
    next.put(to, Some(piece));
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, Piece};

    fn board(placement: &str) -> Board {
        Board::from_fen(placement).unwrap()
    }

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn simple_move_leaves_original_untouched() {
        let before = Board::standard();
        let after = apply(&before, sq("e2"), sq("e4"));

        assert!(before.piece_at(sq("e2")).is_some());
        assert!(after.is_vacant(sq("e2")));
        assert_eq!(
            after.piece_at(sq("e4")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn capture_replaces_target() {
        let before = board("8/8/8/3p4/4N3/8/8/4K2k");
        let after = apply(&before, sq("e4"), sq("d5"));
        assert_eq!(
            after.piece_at(sq("d5")),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
        assert!(after.is_vacant(sq("e4")));
        assert_eq!(after.all_pieces().count(), 3);
    }

    #[test]
    fn kingside_castle_moves_rook() {
        let before = board("4k3/8/8/8/8/8/8/4K2R");
        let after = apply(&before, Square::E1, Square::G1);

        assert_eq!(
            after.piece_at(Square::G1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            after.piece_at(Square::F1),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert!(after.is_vacant(Square::E1));
        assert!(after.is_vacant(Square::H1));
    }

    #[test]
    fn queenside_castle_moves_rook() {
        let before = board("4k3/8/8/8/8/8/8/R3K3");
        let after = apply(&before, Square::E1, Square::C1);

        assert_eq!(
            after.piece_at(Square::C1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            after.piece_at(Square::D1),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert!(after.is_vacant(Square::A1));
        assert!(after.is_vacant(Square::E1));
    }

    #[test]
    fn black_castle_mirrors() {
        let before = board("r3k3/8/8/8/8/8/8/4K3");
        let after = apply(&before, Square::E8, Square::C8);

        assert_eq!(
            after.piece_at(Square::C8),
            Some(Piece::new(Color::Black, PieceKind::King))
        );
        assert_eq!(
            after.piece_at(Square::D8),
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert!(after.is_vacant(Square::A8));
    }

    #[test]
    fn king_single_step_is_not_castling() {
        let before = board("4k3/8/8/8/8/8/8/4K2R");
        let after = apply(&before, Square::E1, Square::F1);

        // The rook stays put.
        assert_eq!(
            after.piece_at(Square::H1),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(
            after.piece_at(Square::F1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
    }

    #[test]
    fn en_passant_removes_passed_pawn() {
        // White pawn on e5 takes the black pawn on d5 en passant.
        let before = board("8/8/8/3pP3/8/8/8/4K2k");
        let after = apply(&before, sq("e5"), sq("d6"));

        assert_eq!(
            after.piece_at(sq("d6")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert!(after.is_vacant(sq("d5")));
        assert!(after.is_vacant(sq("e5")));
        assert_eq!(after.all_pieces().count(), 3);
    }

    #[test]
    fn en_passant_black_side() {
        let before = board("4k3/8/8/8/3pP3/8/8/4K3");
        let after = apply(&before, sq("d4"), sq("e3"));

        assert_eq!(
            after.piece_at(sq("e3")),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert!(after.is_vacant(sq("e4")));
        assert!(after.is_vacant(sq("d4")));
    }

    #[test]
    fn ordinary_pawn_capture_is_not_en_passant() {
        // Destination occupied: a plain diagonal capture, nothing else
        // removed.
        let before = board("8/8/8/3p4/4P3/8/8/4K2k");
        let after = apply(&before, sq("e4"), sq("d5"));

        assert_eq!(
            after.piece_at(sq("d5")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(after.all_pieces().count(), 3);
    }

    #[test]
    fn pawn_push_is_not_en_passant() {
        // Straight push to an empty square: file unchanged, no removal.
        let before = board("8/8/8/3p4/4P3/8/8/4K2k");
        let after = apply(&before, sq("e4"), sq("e5"));

        assert_eq!(
            after.piece_at(sq("d5")),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(after.all_pieces().count(), 4);
    }

    #[test]
    #[should_panic(expected = "no piece on origin square")]
    fn apply_from_empty_square_panics() {
        apply(&Board::standard(), sq("e4"), sq("e5"));
    }
}
