//! Pluggable static evaluation.
//!
//! Search stays game-agnostic by delegating leaf scoring to this trait. A
//! score is always read from the perspective of the player who moved into
//! the state, which is the opposite of the side to act.

use crate::board::board::Board;
use crate::board::turn::Turn;
use crate::search::goal::{CheckersGoal, GoalCheck};

pub const POINTS_FOR_A_WIN: i32 = 2000;
pub const POINTS_FOR_A_LOSS: i32 = -2000;
pub const PIECE_WEIGHTING: i32 = 4;
pub const EDGE_PIECE_WEIGHTING: i32 = 1;

pub trait BoardScorer<S>: Send + Sync {
    /// Score from the perspective of the player that just moved.
    fn score(&self, state: &S) -> i32;
}

/// Material, king and edge heuristic for checkers.
///
/// Decided positions dominate: `POINTS_FOR_A_WIN` when the side to act has
/// no pieces left, `POINTS_FOR_A_LOSS` when the side that moved has none.
/// Otherwise the piece delta is weighted by `PIECE_WEIGHTING`, the
/// opponent's king count is added, and pieces held on the outer ring (which
/// cannot be captured) count `EDGE_PIECE_WEIGHTING` each.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckersScorer {
    goal: CheckersGoal,
}

impl CheckersScorer {
    pub fn new() -> Self {
        Self::default()
    }

    fn edge_pieces_held(board: &Board, player: Turn) -> i32 {
        board
            .pieces_of(player)
            .filter(|(pos, _)| board.is_edge(*pos))
            .count() as i32
    }
}

impl BoardScorer<Board> for CheckersScorer {
    fn score(&self, board: &Board) -> i32 {
        let opponent = board.turn();
        let moved = opponent.next();

        if self.goal.player_has_lost(board, opponent) {
            return POINTS_FOR_A_WIN;
        }
        if self.goal.player_has_lost(board, moved) {
            return POINTS_FOR_A_LOSS;
        }

        let stats = board.stats();
        let piece_delta =
            (stats.total(moved) as i32 - stats.total(opponent) as i32) * PIECE_WEIGHTING;
        let king_term = stats.kings(opponent) as i32;
        let edge_delta = (Self::edge_pieces_held(board, moved)
            - Self::edge_pieces_held(board, opponent))
            * EDGE_PIECE_WEIGHTING;

        piece_delta + king_term + edge_delta
    }
}
