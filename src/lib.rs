// src/lib.rs
//! Chess rules, material evaluation and an alpha-beta opponent.
//!
//! The console front end in `main.rs` is a thin layer over [`GameState`] and [`Engine`];
//! nothing in the library depends on how the board is displayed.

pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod search;
pub mod status;

pub use board::{initial_board, Board, Color, Move, Piece, PieceType, Square};
pub use config::{Config, EngineConfig};
pub use error::{CommandError, ConfigError, LayoutError, MoveError};
pub use eval::{evaluate, Score};
pub use game::{engine_move, GameState};
pub use movegen::{all_legal_moves, is_king_in_check, is_square_attacked, legal_moves, pseudo_moves};
pub use notation::{parse_move, parse_square};
pub use search::{search, Engine, SearchOutcome};
pub use status::{classify, Status};
