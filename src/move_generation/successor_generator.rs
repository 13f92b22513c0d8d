use crate::board::board_ids::BoardIdGenerator;
use crate::errors::CheckersResult;

/// Produces every legal successor of a state for the side to move.
///
/// Implementations must leave `state` untouched and draw one fresh id from
/// `ids` for every produced state.
pub trait SuccessorGenerator<S>: Send + Sync {
    fn successors(&self, state: &S, ids: &mut dyn BoardIdGenerator) -> CheckersResult<Vec<S>>;
}
