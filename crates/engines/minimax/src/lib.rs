//! Minimax Qirkat Engine
//!
//! Depth-bounded minimax search with alpha-beta pruning and a static
//! material-plus-advancement evaluation.

mod eval;
mod search;

use qirkat_core::{Board, Engine, SearchLimits, SearchOutcome};
use tracing::debug;

#[cfg(test)]
mod lib_tests;

/// Move-selection engine using depth-bounded minimax with alpha-beta
/// pruning.
///
/// This engine uses:
/// - Fixed-depth minimax over a private scratch board
/// - Alpha-beta pruning with undo guaranteed on pruning exits
/// - Material plus advancement evaluation
/// - An optional wall-clock budget, checked between root moves
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, board: &Board, limits: SearchLimits) -> SearchOutcome {
        self.nodes = 0;
        let clock = limits.start();

        let report = search::find_best_move(board, limits.depth, &mut self.nodes, &clock);

        debug!(
            depth = limits.depth,
            nodes = self.nodes,
            elapsed_ms = clock.elapsed().as_millis() as u64,
            score = report.score,
            "search finished"
        );

        SearchOutcome {
            best_move: report.best_move,
            score: report.score,
            depth: limits.depth,
            nodes: self.nodes,
            stopped: report.stopped,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

// Re-export for direct use if needed
pub use eval::{static_score, WINNING_VALUE};
