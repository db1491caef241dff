// src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::board::{Color, Square};

// --- Move Errors ---

/// Reasons a human move attempt is rejected. The game state is never touched when one of these is returned.
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("Invalid move format: '{0}'. Use four characters like 'e2e4'.")]
    InvalidFormat(String),
    #[error("No piece found at {0}")]
    EmptySquare(Square),
    #[error("The piece at {0} does not belong to the side to move.")]
    NotYourPiece(Square),
    #[error("Illegal move: {from} cannot go to {to}.")]
    IllegalMove { from: Square, to: Square },
    #[error("The game is over. Type 'new' to start another one.")]
    GameOver,
}

// --- Board Layout Errors ---

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Expected 8 ranks in layout, found {0}")]
    RowCount(usize),
    #[error("Rank line {row} has {width} squares, expected 8")]
    RowWidth { row: usize, width: usize },
    #[error("Unknown piece character '{0}'")]
    UnknownPiece(char),
    #[error("Layout has {count} {color} kings, expected exactly one")]
    KingCount { color: Color, count: usize },
}

// --- Configuration Errors ---

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error with config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Search depth {0} is out of range (1..=6)")]
    InvalidDepth(u32),
}

// --- Console Command Errors ---

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing argument for command: '{0}'")]
    MissingArgument(String),
    #[error("Invalid square: '{0}'. Use a file a-h and a rank 1-8, like 'e2'.")]
    InvalidSquare(String),
    #[error(transparent)]
    Move(#[from] MoveError),
}
