//! Terminal-state detection.

use crate::board::board::Board;
use crate::board::turn::Turn;
use crate::search::search_state::SearchState;

pub trait GoalCheck<S: SearchState>: Send + Sync {
    /// Whether `player` has lost in `state`.
    fn player_has_lost(&self, state: &S, player: Turn) -> bool;

    /// Whether the side to act has lost, i.e. the side that moved into
    /// `state` has won. Such states have no successors.
    fn mover_has_lost(&self, state: &S) -> bool {
        self.player_has_lost(state, state.turn())
    }
}

/// A checkers player loses once all of its pieces are captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckersGoal;

impl GoalCheck<Board> for CheckersGoal {
    #[inline]
    fn player_has_lost(&self, state: &Board, player: Turn) -> bool {
        state.stats().total(player) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::coordinate::Coordinate;
    use crate::board::piece_catalogue::standard_piece;

    #[test]
    fn player_without_pieces_has_lost() {
        let mut board = Board::empty(0, Turn::Min);
        let piece = standard_piece(Turn::Max, 0).expect("slot exists");
        board.add_piece(Coordinate::new(1, 0), piece).expect("free");

        assert!(CheckersGoal.mover_has_lost(&board));
        assert!(!CheckersGoal.player_has_lost(&board, Turn::Max));
    }
}
