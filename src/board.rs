// src/board.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LayoutError;

pub const BOARD_SIZE: usize = 8;

/// Back rank arrangement shared by both colors, file a to file h.
const BACK_RANK: [PieceType; BOARD_SIZE] = [
    PieceType::Rook, PieceType::Knight, PieceType::Bishop, PieceType::Queen,
    PieceType::King, PieceType::Bishop, PieceType::Knight, PieceType::Rook,
];

// --- Enums and Basic Structs ---
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color { White, Black }

impl Color {
    pub fn opponent(&self) -> Color {
        match self { Color::White => Color::Black, Color::Black => Color::White }
    }

    /// Row on which this color's pawns start.
    pub(crate) fn pawn_start_row(&self) -> u8 {
        match self { Color::White => 6, Color::Black => 1 }
    }

    /// Row delta of a single pawn step. White heads for row 0.
    pub(crate) fn pawn_direction(&self) -> i8 {
        match self { Color::White => -1, Color::Black => 1 }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Color::White => write!(f, "White"), Color::Black => write!(f, "Black") }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceType { Pawn, Knight, Bishop, Rook, Queen, King }

impl PieceType {
    /// Lowercase name used in move history records ("pawn e2-e4").
    pub fn name(&self) -> &'static str {
        match self {
            PieceType::Pawn => "pawn", PieceType::Knight => "knight", PieceType::Bishop => "bishop",
            PieceType::Rook => "rook", PieceType::Queen => "queen", PieceType::King => "king",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Self { Piece { kind, color } }

    /// Parses a layout character: uppercase is White, lowercase is Black.
    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn, 'n' => PieceType::Knight, 'b' => PieceType::Bishop,
            'r' => PieceType::Rook, 'q' => PieceType::Queen, 'k' => PieceType::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.kind {
            PieceType::Pawn => 'p', PieceType::Knight => 'n', PieceType::Bishop => 'b',
            PieceType::Rook => 'r', PieceType::Queen => 'q', PieceType::King => 'k',
        };
        let symbol = match self.color {
            Color::White => symbol.to_ascii_uppercase(),
            Color::Black => symbol,
        };
        write!(f, "{}", symbol)
    }
}

// --- Squares ---

/// A board coordinate. Row 0 is Black's back rank (rank 8), column 0 is file a.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// # Panics
    /// Panics if `row` or `col` is 8 or more. Use [`Square::try_new`] for unchecked input.
    pub fn new(row: u8, col: u8) -> Self {
        assert!((row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE, "square ({}, {}) is off the board", row, col);
        Square { row, col }
    }

    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Square { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    pub fn row(&self) -> u8 { self.row }
    pub fn col(&self) -> u8 { self.col }

    /// The square `(dr, dc)` away, if it is still on the board.
    #[inline]
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Square> {
        Square::try_new(self.row as i8 + dr, self.col as i8 + dc)
    }

    pub(crate) fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// All 64 squares in row-major order, starting at a8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Square { row, col }))
    }
}

// Algebraic name, e.g. (6, 4) is "e2".
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file_char = (b'a' + self.col) as char;
        let rank_char = (b'8' - self.row) as char;
        write!(f, "{}{}", file_char, rank_char)
    }
}

// --- Move Representation ---
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self { Move { from, to } }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

// --- Board ---

/// The 8x8 grid. Cells are `Copy`, so `clone()` is a full independent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self { Board::empty() }
}

impl Board {
    pub fn empty() -> Self {
        Board { cells: [[None; BOARD_SIZE]; BOARD_SIZE] }
    }

    /// Standard starting position.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for col in 0..BOARD_SIZE {
            board.cells[1][col] = Some(Piece::new(PieceType::Pawn, Color::Black));
            board.cells[6][col] = Some(Piece::new(PieceType::Pawn, Color::White));
            board.cells[0][col] = Some(Piece::new(BACK_RANK[col], Color::Black));
            board.cells[7][col] = Some(Piece::new(BACK_RANK[col], Color::White));
        }
        board
    }

    /// Builds a board from eight rank lines, rank 8 first. `.` marks an empty square,
    /// `PNBRQK` are White and `pnbrqk` are Black. Whitespace inside a line is ignored,
    /// blank lines are skipped. Each side needs exactly one king.
    pub fn from_layout(layout: &str) -> Result<Self, LayoutError> {
        let rows: Vec<Vec<char>> = layout
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(LayoutError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, chars) in rows.iter().enumerate() {
            if chars.len() != BOARD_SIZE {
                return Err(LayoutError::RowWidth { row, width: chars.len() });
            }
            for (col, &c) in chars.iter().enumerate() {
                if c == '.' { continue; }
                let piece = Piece::from_char(c).ok_or(LayoutError::UnknownPiece(c))?;
                board.cells[row][col] = Some(piece);
            }
        }

        for color in [Color::White, Color::Black] {
            let count = board.pieces_of(color).filter(|(_, p)| p.kind == PieceType::King).count();
            if count != 1 {
                return Err(LayoutError::KingCount { color, count });
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row as usize][sq.col as usize]
    }

    /// Puts `piece` on `sq` (or clears it with `None`), returning what was there.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.cells[sq.row as usize][sq.col as usize], piece)
    }

    /// Relocates whatever stands on `mv.from` to `mv.to`, overwriting any occupant.
    /// No special-move side effects. Returns the captured piece, if any.
    pub fn apply_move(&mut self, mv: Move) -> Option<Piece> {
        let moving = self.set(mv.from, None);
        self.set(mv.to, moving)
    }

    /// Copy of this board with `mv` applied. Used for legality simulation and search.
    pub fn with_move(&self, mv: Move) -> Board {
        let mut next = self.clone();
        next.apply_move(mv);
        next
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for row in 0..BOARD_SIZE {
            write!(f, "{} | ", BOARD_SIZE - row)?;
            for col in 0..BOARD_SIZE {
                match self.cells[row][col] {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-----------------+")?;
        write!(f, "    a b c d e f g h")
    }
}

/// Standard starting position.
pub fn initial_board() -> Board {
    Board::initial()
}
