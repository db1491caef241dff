// src/game.rs
use std::fmt;

use crate::board::{Board, Color, Move, Piece};
use crate::error::MoveError;
use crate::movegen::legal_moves;
use crate::search::Engine;
use crate::status::{classify, Status};

// --- Game State ---

/// The authoritative game: board, side to move, history and the cached status flags.
///
/// The flags are derived facts, recomputed for the side to move after every commit.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current_player: Color,
    history: Vec<String>,
    is_check: bool,
    is_checkmate: bool,
    is_stalemate: bool,
}

impl Default for GameState {
    fn default() -> Self { GameState::new() }
}

impl GameState {
    /// A fresh game from the standard position, White to move.
    pub fn new() -> Self {
        GameState::from_board(Board::initial(), Color::White)
    }

    /// A game starting from an arbitrary position. Status flags are computed immediately.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        let mut state = GameState {
            board,
            current_player: to_move,
            history: Vec::new(),
            is_check: false,
            is_checkmate: false,
            is_stalemate: false,
        };
        state.refresh_status();
        state
    }

    /// Throws the current game away and starts over.
    pub fn reset(&mut self) {
        *self = GameState::new();
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn current_player(&self) -> Color { self.current_player }
    pub fn history(&self) -> &[String] { &self.history }
    pub fn is_check(&self) -> bool { self.is_check }
    pub fn is_checkmate(&self) -> bool { self.is_checkmate }
    pub fn is_stalemate(&self) -> bool { self.is_stalemate }

    pub fn status(&self) -> Status {
        match (self.is_checkmate, self.is_stalemate, self.is_check) {
            (true, _, _) => Status::Checkmate,
            (_, true, _) => Status::Stalemate,
            (_, _, true) => Status::Check,
            _ => Status::Normal,
        }
    }

    pub fn is_over(&self) -> bool { self.is_checkmate || self.is_stalemate }

    /// The side that delivered mate, if the game ended that way.
    pub fn winner(&self) -> Option<Color> {
        self.is_checkmate.then(|| self.current_player.opponent())
    }

    fn refresh_status(&mut self) {
        let status = classify(&self.board, self.current_player);
        self.is_check = status.is_check();
        self.is_checkmate = status.is_checkmate();
        self.is_stalemate = status.is_stalemate();
    }

    /// The game must still be on and `mv` must move a piece of the side to move.
    fn check_turn(&self, mv: Move) -> Result<Piece, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let piece = self.board.get(mv.from).ok_or(MoveError::EmptySquare(mv.from))?;
        if piece.color != self.current_player {
            return Err(MoveError::NotYourPiece(mv.from));
        }
        Ok(piece)
    }

    /// Validates a move for the side to move and commits it. Nothing changes on error.
    pub fn try_move(&mut self, mv: Move) -> Result<(), MoveError> {
        self.check_turn(mv)?;
        if !legal_moves(&self.board, mv.from).contains(&mv.to) {
            return Err(MoveError::IllegalMove { from: mv.from, to: mv.to });
        }
        self.commit_move(mv)
    }

    /// Applies a move, records it, hands the turn over and recomputes
    /// check/checkmate/stalemate for the new side to move.
    ///
    /// Rejects a finished game, an empty source square and the wrong side's piece, leaving
    /// the state untouched. Destination legality is not checked here; engine moves come from
    /// [`all_legal_moves`](crate::movegen::all_legal_moves) and human moves go through [`GameState::try_move`].
    pub fn commit_move(&mut self, mv: Move) -> Result<(), MoveError> {
        let moving = self.check_turn(mv)?;
        let captured = self.board.apply_move(mv);
        self.history.push(format!("{} {}-{}", moving.kind.name(), mv.from, mv.to));
        self.current_player = self.current_player.opponent();
        self.refresh_status();
        tracing::debug!(%mv, ?captured, status = %self.status(), "move committed");
        Ok(())
    }
}

/// Asks `engine` for a move for the side to move. `None` if that side has no legal move.
pub fn engine_move(state: &GameState, engine: &mut Engine) -> Option<Move> {
    engine.choose_move(&state.board, state.current_player)
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "Turn: {}", self.current_player)?;
        match self.status() {
            Status::Check => write!(f, "  Check!")?,
            Status::Checkmate => {
                if let Some(winner) = self.winner() {
                    write!(f, "  Checkmate! {} wins!", winner)?;
                }
            }
            Status::Stalemate => write!(f, "  Stalemate! The game is drawn.")?,
            Status::Normal => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PieceType, Square};
    use crate::notation::parse_move;
    use assert_matches::assert_matches;

    #[test]
    fn commit_records_history_and_flips_turn() {
        let mut game = GameState::new();
        game.commit_move(parse_move("g1f3").unwrap()).unwrap();
        assert_eq!(game.history(), ["knight g1-f3"]);
        assert_eq!(game.current_player(), Color::Black);
        assert_eq!(game.board().get(Square::new(5, 5)), Some(Piece::new(PieceType::Knight, Color::White)));
        assert_eq!(game.status(), Status::Normal);
    }

    #[test]
    fn try_move_rejections_leave_state_alone() {
        let mut game = GameState::new();
        assert_matches!(game.try_move(parse_move("e4e5").unwrap()), Err(MoveError::EmptySquare(_)));
        assert_matches!(game.try_move(parse_move("e7e5").unwrap()), Err(MoveError::NotYourPiece(_)));
        assert_matches!(game.try_move(parse_move("e2e5").unwrap()), Err(MoveError::IllegalMove { .. }));
        assert_eq!(game.board(), &Board::initial());
        assert!(game.history().is_empty());
        assert_eq!(game.current_player(), Color::White);
    }

    #[test]
    fn commit_refuses_moves_the_side_to_move_cannot_make() {
        let mut game = GameState::new();
        assert_matches!(game.commit_move(parse_move("e4e5").unwrap()), Err(MoveError::EmptySquare(_)));
        assert_matches!(game.commit_move(parse_move("e7e5").unwrap()), Err(MoveError::NotYourPiece(_)));
        assert_eq!(game.board(), &Board::initial());
        assert!(game.history().is_empty());
        assert_eq!(game.current_player(), Color::White);
    }

    #[test]
    fn commit_after_mate_is_refused() {
        let board = Board::from_layout(
            "R.....k.
             .....ppp
             ........
             ........
             ........
             ........
             ........
             ....K...",
        ).unwrap();
        let mut game = GameState::from_board(board.clone(), Color::Black);
        assert_matches!(game.commit_move(parse_move("g8h8").unwrap()), Err(MoveError::GameOver));
        assert_eq!(game.board(), &board);
        assert!(game.history().is_empty());
    }

    #[test]
    fn reset_starts_over() {
        let mut game = GameState::new();
        game.try_move(parse_move("d2d4").unwrap()).unwrap();
        game.reset();
        assert_eq!(game.board(), &Board::initial());
        assert!(game.history().is_empty());
        assert_eq!(game.current_player(), Color::White);
    }

    #[test]
    fn status_line_announces_mate() {
        let board = Board::from_layout(
            "R.....k.
             .....ppp
             ........
             ........
             ........
             ........
             ........
             ....K...",
        ).unwrap();
        let game = GameState::from_board(board, Color::Black);
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Color::White));
        assert!(game.to_string().ends_with("Checkmate! White wins!"));
    }
}
