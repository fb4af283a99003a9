//! Pseudo-legal move generation and the attack map.
//!
//! Every function here ignores king safety: a pseudo-legal move follows
//! a piece's movement pattern but may leave the mover's own king in
//! check. The [`crate::valid_moves`] filter handles that.
//!
//! Check detection is layered to avoid the classic cycle between
//! castling generation and check detection: [`is_square_attacked`]
//! works purely from basic movement patterns (pawns use their capture
//! pattern) and never considers castling, so [`castling_targets`] can
//! call it freely.

use crate::apply::apply;
use crate::board::{Board, CastleRights, CastleSide};
use chess_core::{Color, Piece, PieceKind, Square};

/// A list of destination squares with a fixed maximum capacity.
///
/// No piece has more than 27 pseudo-legal destinations (a centralized
/// queen), so a fixed-size array avoids heap allocations during
/// generation.
#[derive(Clone)]
pub struct TargetList {
    squares: [Square; Self::MAX_TARGETS],
    len: usize,
}

impl TargetList {
    /// Maximum number of destinations a single piece can have.
    pub const MAX_TARGETS: usize = 32;

    /// Creates an empty target list.
    #[inline]
    pub const fn new() -> Self {
        TargetList {
            squares: [Square::A1; Self::MAX_TARGETS],
            len: 0,
        }
    }

    /// Adds a destination to the list.
    #[inline]
    pub fn push(&mut self, sq: Square) {
        debug_assert!(self.len < Self::MAX_TARGETS);
        self.squares[self.len] = sq;
        self.len += 1;
    }

    /// Returns the number of destinations.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the destinations.
    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    /// Returns true if the list contains the given square.
    pub fn contains(&self, sq: Square) -> bool {
        self.as_slice().contains(&sq)
    }

    /// Retains only destinations for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(Square) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(self.squares[read]) {
                self.squares[write] = self.squares[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for TargetList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for TargetList {
    type Output = Square;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.squares[index]
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl PartialEq for TargetList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for TargetList {}

impl std::fmt::Debug for TargetList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Returns the destinations reachable by a piece's basic movement rule.
///
/// Pawns get forward moves only; captures and en passant come from
/// [`pawn_capture_targets`], and castling from [`castling_targets`].
pub fn piece_targets(board: &Board, piece: Piece, from: Square) -> TargetList {
    let mut targets = TargetList::new();
    match piece.kind {
        PieceKind::Pawn => pawn_push_targets(board, piece.color, from, &mut targets),
        PieceKind::Knight => leaper_targets(board, piece.color, from, &KNIGHT_JUMPS, &mut targets),
        PieceKind::Bishop => slider_targets(board, piece.color, from, &DIAGONAL, &mut targets),
        PieceKind::Rook => slider_targets(board, piece.color, from, &ORTHOGONAL, &mut targets),
        PieceKind::Queen => {
            slider_targets(board, piece.color, from, &DIAGONAL, &mut targets);
            slider_targets(board, piece.color, from, &ORTHOGONAL, &mut targets);
        }
        PieceKind::King => {
            king_step_targets(board, piece.color, from, &mut targets);
        }
    }
    targets
}

/// Single-step moves to fixed offsets: in bounds and not friendly-occupied.
fn leaper_targets(
    board: &Board,
    us: Color,
    from: Square,
    offsets: &[(i8, i8)],
    targets: &mut TargetList,
) {
    for &(dr, df) in offsets {
        if let Some(to) = from.offset(dr, df) {
            match board.piece_at(to) {
                Some(piece) if piece.is(us) => {}
                _ => targets.push(to),
            }
        }
    }
}

/// Ray walks: stop at the first occupied square, include it only on capture.
fn slider_targets(
    board: &Board,
    us: Color,
    from: Square,
    directions: &[(i8, i8)],
    targets: &mut TargetList,
) {
    for &(dr, df) in directions {
        let mut sq = from;
        while let Some(to) = sq.offset(dr, df) {
            match board.piece_at(to) {
                Some(piece) if piece.is(us) => break,
                Some(_) => {
                    targets.push(to);
                    break;
                }
                None => targets.push(to),
            }
            sq = to;
        }
    }
}

fn king_step_targets(board: &Board, us: Color, from: Square, targets: &mut TargetList) {
    leaper_targets(board, us, from, &ORTHOGONAL, targets);
    leaper_targets(board, us, from, &DIAGONAL, targets);
}

/// Pawn forward moves: one square if empty, two from the start rank if
/// both squares are empty.
fn pawn_push_targets(board: &Board, us: Color, from: Square, targets: &mut TargetList) {
    let dir = us.pawn_direction();

    let Some(one) = from.offset(dir, 0) else {
        return;
    };
    if board.is_vacant(one) {
        targets.push(one);

        if from.rank_index() == us.pawn_start_rank() {
            if let Some(two) = from.offset(2 * dir, 0) {
                if board.is_vacant(two) {
                    targets.push(two);
                }
            }
        }
    }
}

/// Pawn captures: diagonal-forward enemy squares, plus en passant.
///
/// En passant needs the previous board snapshot: the adjacent enemy
/// pawn must have stood on its start rank last turn and sit two ranks
/// forward now. Without a previous board no en passant is generated.
pub fn pawn_capture_targets(
    board: &Board,
    previous: Option<&Board>,
    us: Color,
    from: Square,
    targets: &mut TargetList,
) {
    let dir = us.pawn_direction();
    let them = us.opposite();

    for df in [-1, 1] {
        if let Some(to) = from.offset(dir, df) {
            match board.piece_at(to) {
                Some(piece) if piece.is(them) => targets.push(to),
                _ => {}
            }
        }
    }

    // En passant is only possible from the rank next to the enemy's
    // double-push destination: rank 4 for White, rank 3 for Black.
    let ep_rank = match us {
        Color::White => 4,
        Color::Black => 3,
    };
    let Some(previous) = previous else {
        return;
    };
    if from.rank_index() != ep_rank {
        return;
    }

    let enemy_pawn = Piece::new(them, PieceKind::Pawn);
    for df in [-1, 1] {
        let (Some(beside), Some(behind), Some(two_ahead)) = (
            from.offset(0, df),
            from.offset(dir, df),
            from.offset(2 * dir, df),
        ) else {
            continue;
        };

        if board.piece_at(beside) == Some(enemy_pawn)
            && board.is_vacant(two_ahead)
            && previous.is_vacant(beside)
            && previous.piece_at(two_ahead) == Some(enemy_pawn)
        {
            targets.push(behind);
        }
    }
}

/// Castling destinations for a king.
///
/// Permissive on malformed input: a non-king piece, a king off its home
/// square, or empty rights all yield no candidates rather than an
/// error. A candidate requires the squares between king and rook to be
/// empty, the rook on its corner, the king not currently in check, and
/// neither the transit square nor the destination attacked.
pub fn castling_targets(
    board: &Board,
    rights: CastleRights,
    piece: Piece,
    from: Square,
    targets: &mut TargetList,
) {
    if piece.kind != PieceKind::King || rights == CastleRights::None {
        return;
    }
    let us = piece.color;
    let home = match us {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    };
    if from != home {
        return;
    }
    if is_in_check(board, us) {
        return;
    }

    let them = us.opposite();
    let rook = Piece::new(us, PieceKind::Rook);

    for side in [CastleSide::Left, CastleSide::Right] {
        if !rights.allows(side) {
            continue;
        }

        let (corner, between, checked, target): (Square, &[Square], Square, Square) =
            match (us, side) {
                (Color::White, CastleSide::Left) => (
                    Square::A1,
                    &[Square::B1, Square::C1, Square::D1],
                    Square::D1,
                    Square::C1,
                ),
                (Color::White, CastleSide::Right) => {
                    (Square::H1, &[Square::F1, Square::G1], Square::F1, Square::G1)
                }
                (Color::Black, CastleSide::Left) => (
                    Square::A8,
                    &[Square::B8, Square::C8, Square::D8],
                    Square::D8,
                    Square::C8,
                ),
                (Color::Black, CastleSide::Right) => {
                    (Square::H8, &[Square::F8, Square::G8], Square::F8, Square::G8)
                }
            };

        if board.piece_at(corner) != Some(rook) {
            continue;
        }
        if between.iter().any(|&sq| !board.is_vacant(sq)) {
            continue;
        }
        if is_square_attacked(board, checked, them) || is_square_attacked(board, target, them) {
            continue;
        }

        targets.push(target);
    }
}

/// Squares a piece attacks, for check detection.
///
/// Identical to the basic movement targets except for pawns, which
/// attack their two forward diagonals whether or not a capture is
/// currently possible there.
fn attack_targets(board: &Board, piece: Piece, from: Square) -> TargetList {
    if piece.kind != PieceKind::Pawn {
        return piece_targets(board, piece, from);
    }

    let mut targets = TargetList::new();
    let dir = piece.color.pawn_direction();
    for df in [-1, 1] {
        if let Some(to) = from.offset(dir, df) {
            targets.push(to);
        }
    }
    targets
}

/// Returns true if any piece of `by` attacks the given square.
///
/// Castling is never an attack, and en passant is ignored: an en
/// passant destination is always an empty square on rank 3 or 6 and so
/// can never hold a king nor coincide with a castling transit square.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    board
        .pieces(by)
        .any(|(from, piece)| attack_targets(board, piece, from).contains(sq))
}

/// Returns true if the given player's king is attacked.
pub fn is_in_check(board: &Board, player: Color) -> bool {
    match board.king_square(player) {
        Some(king) => is_square_attacked(board, king, player.opposite()),
        // No king on the board; nothing to be in check.
        None => false,
    }
}

/// Applies each candidate to a scratch board and keeps only those that
/// do not leave the mover's king attacked.
pub(crate) fn retain_safe(board: &Board, us: Color, from: Square, targets: &mut TargetList) {
    targets.retain(|to| {
        let after = apply(board, from, to);
        !is_in_check(&after, us)
    });
}
