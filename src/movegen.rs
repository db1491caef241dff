// src/movegen.rs
//! Pseudo-move generation, attack detection and the legality filter.
//!
//! Everything here reads a [`Board`] and never mutates it; simulations run on copies.

use lazy_static::lazy_static;

use crate::board::{Board, Color, Move, PieceType, Square, BOARD_SIZE};

// Directions for sliding pieces
const DIRECTIONS: &[(i8, i8, bool)] = &[ // (dr, dc, is_diagonal)
    ( 1,  0, false), (-1,  0, false), ( 0,  1, false), ( 0, -1, false), // Orthogonal
    ( 1,  1, true),  ( 1, -1, true),  (-1,  1, true),  (-1, -1, true),  // Diagonal
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    ( 1, -2), ( 1, 2), ( 2, -1), ( 2, 1),
];

// --- Precomputed Move Tables ---

lazy_static! {
    static ref KNIGHT_TARGETS: Vec<Vec<Square>> = compute_step_targets(&KNIGHT_OFFSETS);
    static ref KING_TARGETS: Vec<Vec<Square>> = {
        let offsets: Vec<(i8, i8)> = DIRECTIONS.iter().map(|&(dr, dc, _)| (dr, dc)).collect();
        compute_step_targets(&offsets)
    };
}

/// For each square (row-major index), the on-board squares one offset away.
fn compute_step_targets(offsets: &[(i8, i8)]) -> Vec<Vec<Square>> {
    let mut table = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
    for sq in Square::all() {
        table.push(offsets.iter().filter_map(|&(dr, dc)| sq.offset(dr, dc)).collect());
    }
    table
}

// --- Pseudo-Move Generation ---

/// Destinations the piece on `from` can reach by its raw movement pattern,
/// ignoring whether its own king is left attacked. Empty if `from` is empty.
pub fn pseudo_moves(board: &Board, from: Square) -> Vec<Square> {
    let piece = match board.get(from) {
        Some(p) => p,
        None => return Vec::new(),
    };
    let mut targets = Vec::with_capacity(16);
    match piece.kind {
        PieceType::Pawn => pawn_moves(board, from, piece.color, &mut targets),
        PieceType::Knight => step_moves(board, &KNIGHT_TARGETS[from.index()], piece.color, &mut targets),
        PieceType::Bishop => sliding_moves(board, from, piece.color, true, false, &mut targets),
        PieceType::Rook => sliding_moves(board, from, piece.color, false, true, &mut targets),
        PieceType::Queen => sliding_moves(board, from, piece.color, true, true, &mut targets),
        PieceType::King => step_moves(board, &KING_TARGETS[from.index()], piece.color, &mut targets),
    }
    targets
}

/// Single push, double push from the start row, diagonal captures onto enemy pieces.
fn pawn_moves(board: &Board, from: Square, color: Color, targets: &mut Vec<Square>) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if board.get(one).is_none() {
            targets.push(one);
            // Double push only if the single push square is free too
            if from.row() == color.pawn_start_row() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.get(two).is_none() { targets.push(two); }
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(cap) = from.offset(dir, dc) {
            if board.get(cap).is_some_and(|p| p.color != color) {
                targets.push(cap);
            }
        }
    }
}

/// Knight and king: fixed candidate squares, empty or enemy-occupied.
#[inline]
fn step_moves(board: &Board, candidates: &[Square], color: Color, targets: &mut Vec<Square>) {
    for &to in candidates {
        match board.get(to) {
            Some(p) if p.color == color => {} // Blocked by own piece
            _ => targets.push(to),
        }
    }
}

fn sliding_moves(board: &Board, from: Square, color: Color, diagonals: bool, orthogonals: bool, targets: &mut Vec<Square>) {
    for &(dr, dc, is_diagonal) in DIRECTIONS {
        if !((diagonals && is_diagonal) || (orthogonals && !is_diagonal)) { continue; }

        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            match board.get(next) {
                None => targets.push(next),
                Some(p) if p.color != color => { targets.push(next); break; } // Capture, then stop
                Some(_) => break, // Own piece
            }
            current = next;
        }
    }
}

// --- Attack Detection ---

/// True if any piece of `attacker` has `target` among its pseudo-moves.
pub fn is_square_attacked(board: &Board, target: Square, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|(from, _)| pseudo_moves(board, from).contains(&target))
}

pub fn find_king(board: &Board, color: Color) -> Option<Square> {
    board
        .pieces_of(color)
        .find(|(_, p)| p.kind == PieceType::King)
        .map(|(sq, _)| sq)
}

/// Whether `color`'s king is attacked by the opponent.
///
/// # Panics
/// Panics if `color` has no king on the board. Every position reachable through
/// [`legal_moves`] keeps both kings, so a missing king means the board was built
/// or edited into an invalid state.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    match find_king(board, color) {
        Some(king_sq) => is_square_attacked(board, king_sq, color.opponent()),
        None => {
            tracing::error!(?color, "king missing from board:\n{}", board);
            panic!("invariant violated: no {} king on the board", color);
        }
    }
}

// --- Legality Filter ---

/// Legal destinations for the piece on `from`: pseudo-moves that do not leave
/// the mover's own king in check once played on a copy of the board.
pub fn legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let color = match board.get(from) {
        Some(p) => p.color,
        None => return Vec::new(),
    };
    pseudo_moves(board, from)
        .into_iter()
        .filter(|&to| !is_king_in_check(&board.with_move(Move::new(from, to)), color))
        .collect()
}

/// Every legal move for `color`, pieces in row-major order, destinations in generation order.
pub fn all_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (from, _) in board.pieces_of(color) {
        moves.extend(legal_moves(board, from).into_iter().map(|to| Move::new(from, to)));
    }
    moves
}

/// Stops at the first piece with a legal move.
pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(from, _)| !legal_moves(board, from).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    fn lone(kind: PieceType, color: Color, sq: Square) -> Board {
        let mut board = Board::empty();
        board.set(sq, Some(Piece::new(kind, color)));
        board
    }

    #[test]
    fn knight_in_center_has_eight_moves() {
        let board = lone(PieceType::Knight, Color::White, Square::new(4, 4));
        assert_eq!(pseudo_moves(&board, Square::new(4, 4)).len(), 8);
    }

    #[test]
    fn knight_in_corner_has_two_moves() {
        let board = lone(PieceType::Knight, Color::Black, Square::new(0, 0));
        let mut moves = pseudo_moves(&board, Square::new(0, 0));
        moves.sort();
        assert_eq!(moves, vec![Square::new(1, 2), Square::new(2, 1)]);
    }

    #[test]
    fn pawns_push_and_double_push_from_start() {
        let board = Board::initial();
        let mut white = pseudo_moves(&board, Square::new(6, 4));
        white.sort();
        assert_eq!(white, vec![Square::new(4, 4), Square::new(5, 4)]);
        let mut black = pseudo_moves(&board, Square::new(1, 0));
        black.sort();
        assert_eq!(black, vec![Square::new(2, 0), Square::new(3, 0)]);
    }

    #[test]
    fn pawn_blocked_and_capturing() {
        let board = Board::from_layout(
            "....k...
             ........
             ........
             ...p.n..
             ....P...
             ........
             ........
             ....K...",
        ).unwrap();
        // e4 pawn: e5 empty, d5 pawn capturable, f5 knight capturable
        let mut moves = pseudo_moves(&board, Square::new(4, 4));
        moves.sort();
        assert_eq!(moves, vec![Square::new(3, 3), Square::new(3, 4), Square::new(3, 5)]);

        let blocked = Board::from_layout(
            "....k...
             ........
             ........
             ....p...
             ....P...
             ........
             ........
             ....K...",
        ).unwrap();
        assert!(pseudo_moves(&blocked, Square::new(4, 4)).is_empty());
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        let board = Board::from_layout(
            "....k...
             ........
             ........
             ........
             ........
             ....n...
             ....P...
             ....K...",
        ).unwrap();
        assert!(pseudo_moves(&board, Square::new(6, 4)).is_empty());
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let board = Board::from_layout(
            "....k...
             ........
             ........
             ........
             R..p....
             ........
             ........
             P...K...",
        ).unwrap();
        let moves = pseudo_moves(&board, Square::new(4, 0));
        // Right: b4 c4 d4(capture). Up: a5 a6 a7 a8. Down: a3 a2 (a1 own pawn).
        assert_eq!(moves.len(), 9);
        assert!(moves.contains(&Square::new(4, 3)));
        assert!(!moves.contains(&Square::new(4, 4)));
        assert!(!moves.contains(&Square::new(7, 0)));
    }

    #[test]
    fn queen_on_empty_board_sees_27_squares() {
        let board = lone(PieceType::Queen, Color::White, Square::new(4, 3));
        assert_eq!(pseudo_moves(&board, Square::new(4, 3)).len(), 27);
    }

    #[test]
    fn pawn_captures_count_as_attacks() {
        let board = Board::from_layout(
            "....k...
             ........
             ........
             ........
             ...q.r..
             ....P...
             ........
             ....K...",
        ).unwrap();
        assert!(is_square_attacked(&board, Square::new(4, 3), Color::White));
        assert!(is_square_attacked(&board, Square::new(4, 5), Color::White));
        assert!(!is_square_attacked(&board, Square::new(3, 4), Color::White));
        assert!(is_square_attacked(&board, Square::new(5, 4), Color::Black)); // queen on d4 sees e3
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let board = Board::from_layout(
            "....r..k
             ........
             ........
             ........
             ........
             ........
             ....B...
             ....K...",
        ).unwrap();
        assert!(!pseudo_moves(&board, Square::new(6, 4)).is_empty());
        assert!(legal_moves(&board, Square::new(6, 4)).is_empty());
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let board = Board::from_layout(
            "...r...k
             ........
             ........
             ........
             ........
             ........
             ........
             ....K...",
        ).unwrap();
        let moves = legal_moves(&board, Square::new(7, 4));
        assert!(!moves.contains(&Square::new(7, 3)));
        assert!(!moves.contains(&Square::new(6, 3)));
        assert!(moves.contains(&Square::new(6, 4)));
    }

    #[test]
    fn initial_position_has_twenty_moves() {
        let board = Board::initial();
        assert_eq!(all_legal_moves(&board, Color::White).len(), 20);
        assert_eq!(all_legal_moves(&board, Color::Black).len(), 20);
        assert!(!is_king_in_check(&board, Color::White));
    }

    #[test]
    #[should_panic(expected = "no Black king")]
    fn missing_king_is_fatal() {
        let board = lone(PieceType::King, Color::White, Square::new(7, 4));
        is_king_in_check(&board, Color::Black);
    }
}
