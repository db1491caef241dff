// src/eval.rs
use crate::board::{Board, Color, Piece, PieceType};

/// Search score. Positive favors White.
pub type Score = i32;

impl Piece {
    /// Material value; the king is weighted so that losing it dwarfs everything else.
    pub fn value(&self) -> Score {
        match self.kind {
            PieceType::Pawn => 1, PieceType::Knight => 3, PieceType::Bishop => 3,
            PieceType::Rook => 5, PieceType::Queen => 9, PieceType::King => 100,
        }
    }
}

/// Material balance of the board. No positional terms.
pub fn evaluate(board: &Board) -> Score {
    board
        .pieces()
        .map(|(_, piece)| match piece.color {
            Color::White => piece.value(),
            Color::Black => -piece.value(),
        })
        .sum()
}
