// src/notation.rs
use lazy_static::lazy_static;
use regex::Regex;

use crate::board::{Move, Square};
use crate::error::MoveError;

lazy_static! {
    static ref MOVE_RE: Regex = Regex::new(r"^([a-h])([1-8])([a-h])([1-8])$").expect("move pattern is valid");
    static ref SQUARE_RE: Regex = Regex::new(r"^([a-h])([1-8])$").expect("square pattern is valid");
}

// Rank 8 is row 0, so row = '8' - rank.
fn square_from_chars(file: &str, rank: &str) -> Square {
    let file = file.as_bytes()[0] - b'a';
    let rank = rank.as_bytes()[0];
    Square::new(b'8' - rank, file)
}

/// Algebraic square name, e.g. "e2" for (6, 4).
pub fn square_name(sq: Square) -> String {
    sq.to_string()
}

/// Parses a two-character square name like "e2".
pub fn parse_square(input: &str) -> Option<Square> {
    let caps = SQUARE_RE.captures(input)?;
    Some(square_from_chars(&caps[1], &caps[2]))
}

/// Parses coordinate notation `<file><rank><file><rank>`, exactly four characters ("e2e4").
/// Only checks the format; legality is decided by the game.
pub fn parse_move(input: &str) -> Result<Move, MoveError> {
    let caps = MOVE_RE
        .captures(input)
        .ok_or_else(|| MoveError::InvalidFormat(input.to_string()))?;
    let from = square_from_chars(&caps[1], &caps[2]);
    let to = square_from_chars(&caps[3], &caps[4]);
    Ok(Move::new(from, to))
}
