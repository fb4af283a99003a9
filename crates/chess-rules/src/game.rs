//! Game state: board history, turn order, castling rights, and the
//! move record.

use crate::board::{Board, CastleRights, CastleSide};
use crate::endgame::{insufficient_material, is_checkmate, is_stalemate, DrawReason, GameResult};
use crate::legal::valid_moves;
use crate::movegen::{is_in_check, TargetList};
use crate::san::move_notation;
use chess_core::{Color, Fen, FenError, File, Move, Piece, PieceKind, Square};
use thiserror::Error;

/// Errors from game-level move handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("the game is over")]
    GameOver,

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("it is not {0}'s turn")]
    NotYourTurn(Color),

    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("move {0} promotes a pawn but names no promotion piece")]
    PromotionRequired(Move),

    #[error("move {0} names a promotion piece but does not promote")]
    InvalidPromotion(Move),
}

/// A move that has been played, with its notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMove {
    pub mv: Move,
    pub notation: String,
}

/// A chess game in progress.
///
/// Owns the full board history (the engine derives en passant from the
/// previous snapshot), whose turn it is, each side's castling rights,
/// and the result once the game ends.
#[derive(Debug, Clone)]
pub struct Game {
    history: Vec<Board>,
    turn: Color,
    castling: [CastleRights; 2],
    moves: Vec<RecordedMove>,
    result: Option<GameResult>,
}

impl Game {
    /// Starts a game from the standard position.
    pub fn new() -> Self {
        Game {
            history: vec![Board::standard()],
            turn: Color::White,
            castling: [CastleRights::Both; 2],
            moves: Vec::new(),
            result: None,
        }
    }

    /// Starts a game from FEN text.
    ///
    /// A position that is already mate, stalemate, or a dead position
    /// loads with its result set.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = Fen::parse(fen)?;
        let board = Board::from_fen_fields(&parsed);

        let turn = match parsed.active_color {
            'b' => Color::Black,
            _ => Color::White,
        };

        let mut castling = [CastleRights::None; 2];
        for c in parsed.castling.chars() {
            let (color, side) = match c {
                'K' => (Color::White, CastleSide::Right),
                'Q' => (Color::White, CastleSide::Left),
                'k' => (Color::Black, CastleSide::Right),
                'q' => (Color::Black, CastleSide::Left),
                _ => continue,
            };
            castling[color.index()] = castling[color.index()].adding(side);
        }

        let mut game = Game {
            history: vec![board],
            turn,
            castling,
            moves: Vec::new(),
            result: None,
        };
        game.evaluate_game_end();
        Ok(game)
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        self.history.last().expect("history is never empty")
    }

    /// The board before the last move, if any move has been played.
    pub fn previous_board(&self) -> Option<&Board> {
        self.history.iter().rev().nth(1)
    }

    /// The player to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The game result, or `None` while the game is in progress.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// The given color's remaining castling rights.
    pub fn rights(&self, color: Color) -> CastleRights {
        self.castling[color.index()]
    }

    /// Returns true if the player to move is in check.
    pub fn is_check(&self) -> bool {
        is_in_check(self.board(), self.turn)
    }

    /// The number of half-moves played.
    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    /// The moves played so far.
    pub fn moves(&self) -> &[RecordedMove] {
        &self.moves
    }

    /// The notation of every move played, in order.
    pub fn notation_history(&self) -> Vec<&str> {
        self.moves.iter().map(|m| m.notation.as_str()).collect()
    }

    /// Legal destinations for the current player's piece on `from`.
    pub fn legal_moves(&self, from: Square) -> Result<TargetList, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        let piece = self
            .board()
            .piece_at(from)
            .ok_or(GameError::EmptySquare(from))?;
        if !piece.is(self.turn) {
            return Err(GameError::NotYourTurn(piece.color));
        }

        Ok(valid_moves(
            self.board(),
            self.previous_board(),
            self.rights(self.turn),
            from,
        ))
    }

    /// Plays a move for the current player.
    ///
    /// The move must name a promotion piece exactly when it moves a
    /// pawn onto its promotion rank. On success the board history, the
    /// move record, castling rights, the turn, and (if the move ended
    /// the game) the result are all updated.
    pub fn make_move(&mut self, mv: Move) -> Result<(), GameError> {
        let from = mv.from();
        let to = mv.to();

        let targets = self.legal_moves(from)?;
        if !targets.contains(to) {
            return Err(GameError::IllegalMove(mv));
        }

        let piece = self.board().piece_at(from).expect("checked by legal_moves");
        let promotes = piece.kind == PieceKind::Pawn
            && to.rank_index() == self.turn.promotion_rank();
        match (promotes, mv.promotion()) {
            (true, None) => return Err(GameError::PromotionRequired(mv)),
            (false, Some(_)) => return Err(GameError::InvalidPromotion(mv)),
            _ => {}
        }

        // Notation is judged against the board the move is played on.
        let notation = move_notation(self.board(), mv).expect("origin square is occupied");

        let mut next = crate::apply(self.board(), from, to);
        if let Some(kind) = mv.promotion() {
            next = next.with(to, Some(Piece::new(self.turn, kind)));
        }

        self.update_castling_rights(piece, from);
        self.history.push(next);
        self.moves.push(RecordedMove { mv, notation });
        self.turn = self.turn.opposite();
        self.evaluate_game_end();
        Ok(())
    }

    /// Revokes castling rights when a king or rook leaves its home
    /// square.
    fn update_castling_rights(&mut self, piece: Piece, from: Square) {
        let rights = &mut self.castling[piece.color.index()];
        match piece.kind {
            PieceKind::King => *rights = CastleRights::None,
            PieceKind::Rook if from.rank_index() == piece.color.back_rank() => {
                match from.file() {
                    File::A => *rights = rights.without(CastleSide::Left),
                    File::H => *rights = rights.without(CastleSide::Right),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn evaluate_game_end(&mut self) {
        let board = self.board();
        if insufficient_material(board) {
            self.result = Some(GameResult::Draw(DrawReason::InsufficientMaterial));
        } else if is_checkmate(board, self.turn, self.rights(self.turn)) {
            self.result = Some(match self.turn {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            });
        } else if is_stalemate(board, self.turn, self.rights(self.turn)) {
            self.result = Some(GameResult::Draw(DrawReason::Stalemate));
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(coords: &str) -> Move {
        Move::from_coords(coords).unwrap()
    }

    fn play(game: &mut Game, moves: &[&str]) {
        for m in moves {
            game.make_move(mv(m)).unwrap();
        }
    }

    #[test]
    fn opening_moves_alternate_turns() {
        let mut game = Game::new();
        assert_eq!(game.turn(), Color::White);

        play(&mut game, &["e2e4"]);
        assert_eq!(game.turn(), Color::Black);
        assert!(game.board().is_vacant(Square::from_algebraic("e2").unwrap()));

        play(&mut game, &["e7e5"]);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.ply(), 2);
    }

    #[test]
    fn wrong_turn_is_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move(mv("e7e5")),
            Err(GameError::NotYourTurn(Color::Black))
        );
    }

    #[test]
    fn empty_square_is_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move(mv("e4e5")),
            Err(GameError::EmptySquare(Square::from_algebraic("e4").unwrap()))
        );
    }

    #[test]
    fn illegal_move_is_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move(mv("e2e5")),
            Err(GameError::IllegalMove(mv("e2e5")))
        );
        // The failed attempt changed nothing.
        assert_eq!(game.ply(), 0);
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4"]);
        assert!(game.result().is_none());

        play(&mut game, &["d8h4"]);
        assert_eq!(game.result(), Some(GameResult::BlackWins));
        assert!(game.is_check());

        // No further moves accepted.
        assert_eq!(game.make_move(mv("a2a3")), Err(GameError::GameOver));
    }

    #[test]
    fn notation_is_recorded() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "d7d5", "e4d5", "g8f6"]);
        assert_eq!(game.notation_history(), vec!["e4", "d5", "exd5", "Nf6"]);
    }

    #[test]
    fn castling_records_and_moves_rook() {
        let mut game = Game::new();
        play(
            &mut game,
            &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"],
        );
        assert_eq!(game.notation_history().last(), Some(&"O-O"));
        assert_eq!(
            game.board().piece_at(Square::F1),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(game.rights(Color::White), CastleRights::None);
        assert_eq!(game.rights(Color::Black), CastleRights::Both);
    }

    #[test]
    fn rook_move_revokes_one_side() {
        let mut game = Game::new();
        play(&mut game, &["a2a4", "e7e5", "a1a3"]);
        assert_eq!(game.rights(Color::White), CastleRights::Right);
    }

    #[test]
    fn king_move_revokes_castling() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "e7e5", "e1e2", "d7d6", "e2e1", "b8c6"]);
        assert_eq!(game.rights(Color::White), CastleRights::None);
        // Both rooks never moved, but castling is gone for good.
        let targets = game.legal_moves(Square::E1).unwrap();
        assert!(!targets.contains(Square::G1));
        assert!(!targets.contains(Square::C1));
    }

    #[test]
    fn en_passant_window_opens_and_closes() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);

        // The window is open right after the double push.
        let targets = game.legal_moves(Square::from_algebraic("e5").unwrap()).unwrap();
        assert!(targets.contains(Square::from_algebraic("d6").unwrap()));

        // Decline it; the chance is gone next turn.
        play(&mut game, &["b1c3", "a6a5"]);
        let targets = game.legal_moves(Square::from_algebraic("e5").unwrap()).unwrap();
        assert!(!targets.contains(Square::from_algebraic("d6").unwrap()));
    }

    #[test]
    fn en_passant_capture_through_game() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "e5d6"]);
        assert_eq!(game.notation_history().last(), Some(&"exd6"));
        // The passed pawn is gone.
        assert!(game.board().is_vacant(Square::from_algebraic("d5").unwrap()));
    }

    #[test]
    fn promotion_requires_a_choice() {
        let mut game = Game::from_fen("4k3/6P1/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(
            game.make_move(mv("g7g8")),
            Err(GameError::PromotionRequired(mv("g7g8")))
        );

        game.make_move(mv("g7g8q")).unwrap();
        assert_eq!(
            game.board().piece_at(Square::G8),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(game.notation_history(), vec!["g8=Q"]);
    }

    #[test]
    fn promotion_choice_on_ordinary_move_is_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move(mv("e2e4q")),
            Err(GameError::InvalidPromotion(mv("e2e4q")))
        );
    }

    #[test]
    fn underpromotion() {
        let mut game = Game::from_fen("4k3/6P1/8/8/8/8/8/4K3 w - -").unwrap();
        game.make_move(mv("g7g8n")).unwrap();
        assert_eq!(
            game.board().piece_at(Square::G8),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
    }

    #[test]
    fn from_fen_respects_turn_and_rights() {
        let game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1").unwrap();
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.rights(Color::White), CastleRights::Right);
        assert_eq!(game.rights(Color::Black), CastleRights::Left);
    }

    #[test]
    fn from_fen_detects_finished_positions() {
        // Stalemate, black to move.
        let game = Game::from_fen("k7/8/1Q6/8/8/8/8/4K3 b - -").unwrap();
        assert_eq!(game.result(), Some(GameResult::Draw(DrawReason::Stalemate)));

        // Mate, black to move.
        let game =
            Game::from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq -")
                .unwrap();
        assert_eq!(game.result(), Some(GameResult::WhiteWins));

        // Dead position.
        let game = Game::from_fen("8/8/8/3B4/8/8/8/K6k w - -").unwrap();
        assert_eq!(
            game.result(),
            Some(GameResult::Draw(DrawReason::InsufficientMaterial))
        );
    }

    #[test]
    fn legal_moves_for_opponent_piece_errors() {
        let game = Game::new();
        assert_eq!(
            game.legal_moves(Square::E8),
            Err(GameError::NotYourTurn(Color::Black))
        );
    }
}
