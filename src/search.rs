// src/search.rs
//! Minimax search with alpha-beta pruning, and the computer player built on it.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::time::{Duration, Instant};

use crate::board::{Board, Color, Move};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::eval::{evaluate, Score};
use crate::movegen::all_legal_moves;

/// Initial running best for a node; also what a node with no legal moves reports.
const MAX_INIT: Score = Score::MIN;
const MIN_INIT: Score = Score::MAX;

#[derive(Debug, Default, Clone, Copy)]
pub struct SearchStats {
    /// Nodes visited, leaves included.
    pub nodes: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    pub score: Score,
    pub best_move: Option<Move>,
    pub stats: SearchStats,
}

/// Side to move at a node: White maximizes, Black minimizes.
#[inline]
fn side(maximizing: bool) -> Color {
    if maximizing { Color::White } else { Color::Black }
}

/// Runs a full-window alpha-beta search from `board` to `depth` plies.
pub fn search(board: &Board, depth: u32, maximizing: bool) -> SearchOutcome {
    let start = Instant::now();
    let mut nodes = 0;
    let (score, best_move) = alpha_beta(board, depth, Score::MIN, Score::MAX, maximizing, &mut nodes);
    let stats = SearchStats { nodes, elapsed: start.elapsed() };
    tracing::debug!(depth, score, nodes, elapsed_ms = stats.elapsed.as_millis() as u64, "search finished");
    SearchOutcome { score, best_move, stats }
}

/// Minimax with alpha-beta pruning.
///
/// Each child is searched on its own copy of the board. Only a strictly better score
/// replaces the current best, so the first extremal move in enumeration order wins.
pub fn alpha_beta(board: &Board, depth: u32, mut alpha: Score, mut beta: Score, maximizing: bool, nodes: &mut u64) -> (Score, Option<Move>) {
    *nodes += 1;
    if depth == 0 {
        return (evaluate(board), None);
    }

    let mut best_move = None;
    if maximizing {
        let mut best = MAX_INIT;
        for mv in all_legal_moves(board, side(maximizing)) {
            let child = board.with_move(mv);
            let (score, _) = alpha_beta(&child, depth - 1, alpha, beta, false, nodes);
            if score > best {
                best = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
            if beta <= alpha { break; } // Beta cutoff
        }
        (best, best_move)
    } else {
        let mut best = MIN_INIT;
        for mv in all_legal_moves(board, side(maximizing)) {
            let child = board.with_move(mv);
            let (score, _) = alpha_beta(&child, depth - 1, alpha, beta, true, nodes);
            if score < best {
                best = score;
                best_move = Some(mv);
            }
            beta = beta.min(score);
            if beta <= alpha { break; } // Alpha cutoff
        }
        (best, best_move)
    }
}

/// Plain minimax without pruning. Same enumeration order and tie-break as [`alpha_beta`].
pub fn minimax(board: &Board, depth: u32, maximizing: bool) -> (Score, Option<Move>) {
    if depth == 0 {
        return (evaluate(board), None);
    }

    let mut best = if maximizing { MAX_INIT } else { MIN_INIT };
    let mut best_move = None;
    for mv in all_legal_moves(board, side(maximizing)) {
        let (score, _) = minimax(&board.with_move(mv), depth - 1, !maximizing);
        let better = if maximizing { score > best } else { score < best };
        if better {
            best = score;
            best_move = Some(mv);
        }
    }
    (best, best_move)
}

// --- Computer Player ---

/// The computer opponent: a fixed-depth searcher plus the RNG for its fallback.
#[derive(Debug, Clone)]
pub struct Engine {
    depth: u32,
    rng: StdRng,
}

impl Engine {
    /// Fails with [`ConfigError::InvalidDepth`] unless the depth is in `1..=MAX_SEARCH_DEPTH`;
    /// a zero-ply search never produces a move.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Engine { depth: config.depth, rng })
    }

    pub fn depth(&self) -> u32 { self.depth }

    /// Picks a move for `color`, searching as the maximizer for White and the minimizer for Black.
    ///
    /// If the search finds nothing better than its initial bound (no legal moves, or every
    /// line scores as a forced loss) a uniformly random legal move is played instead.
    /// Returns `None` only when `color` has no legal move at all.
    pub fn choose_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        let outcome = search(board, self.depth, color == Color::White);
        tracing::info!(
            ?color,
            depth = self.depth,
            score = outcome.score,
            nodes = outcome.stats.nodes,
            elapsed_ms = outcome.stats.elapsed.as_millis() as u64,
            "engine search complete"
        );
        if let Some(mv) = outcome.best_move {
            return Some(mv);
        }

        let candidates = all_legal_moves(board, color);
        let fallback = candidates.choose(&mut self.rng).copied();
        match fallback {
            Some(mv) => tracing::warn!(%mv, "search produced no move, playing a random legal move"),
            None => tracing::warn!(?color, "no legal moves available for engine"),
        }
        fallback
    }
}
