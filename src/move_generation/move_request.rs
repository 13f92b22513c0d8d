//! Applying a human move request to a board.
//!
//! A request is an ordered chain of `(from, to)` steps. The steps are played
//! on a copy of the current board exactly as given; legality is not checked
//! here. The resulting board is only accepted once the game layer finds it
//! among the generated successors.

use crate::board::board::Board;
use crate::board::board_ids::BoardId;
use crate::board::coordinate::Coordinate;
use crate::errors::{CheckersError, CheckersResult};
use crate::move_generation::checkers_successors::relocate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveStep {
    pub from: Coordinate,
    pub to: Coordinate,
}

impl MoveStep {
    pub const fn new(from: Coordinate, to: Coordinate) -> Self {
        Self { from, to }
    }

    /// Cell jumped over by a two-cell diagonal step.
    pub fn jumped_cell(&self) -> Option<Coordinate> {
        let dx = (self.to.x - self.from.x).abs();
        let dy = (self.to.y - self.from.y).abs();
        (dx == 2 && dy == 2).then(|| self.from.midpoint(self.to))
    }
}

/// Plays `steps` on a copy of `board` and hands the turn to the opponent.
pub fn apply_move_request(board: &Board, steps: &[MoveStep], id: BoardId) -> CheckersResult<Board> {
    if steps.is_empty() {
        return Err(CheckersError::EmptyMoveRequest);
    }

    let mut next = board.derive(id, board.turn().next());
    for step in steps {
        if !next.holds_piece_at(step.from) {
            return Err(CheckersError::EmptySource(step.from));
        }
        if !next.is_on_board(step.to) {
            return Err(CheckersError::OffBoard(step.to));
        }

        relocate(&mut next, step.from, step.to)?;

        if let Some(jumped) = step.jumped_cell() {
            if next.holds_piece_at(jumped) {
                next.remove_piece(jumped)?;
            }
        }
    }

    Ok(next)
}
