// src/status.rs
use serde::Serialize;
use std::fmt;

use crate::board::{Board, Color};
use crate::movegen::{has_any_legal_move, is_king_in_check};

/// Position classification for the side to move. Exactly one variant holds.
#[derive(Debug, Serialize, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl Status {
    /// True for both a plain check and checkmate.
    pub fn is_check(&self) -> bool { matches!(self, Status::Check | Status::Checkmate) }
    pub fn is_checkmate(&self) -> bool { *self == Status::Checkmate }
    pub fn is_stalemate(&self) -> bool { *self == Status::Stalemate }
    pub fn is_terminal(&self) -> bool { self.is_checkmate() || self.is_stalemate() }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Normal => "normal",
            Status::Check => "check",
            Status::Checkmate => "checkmate",
            Status::Stalemate => "stalemate",
        };
        write!(f, "{}", label)
    }
}

/// Classifies the position from `color`'s point of view.
pub fn classify(board: &Board, color: Color) -> Status {
    let in_check = is_king_in_check(board, color);
    let can_move = has_any_legal_move(board, color);
    match (in_check, can_move) {
        (true, false) => Status::Checkmate,
        (false, false) => Status::Stalemate,
        (true, true) => Status::Check,
        (false, true) => Status::Normal,
    }
}
