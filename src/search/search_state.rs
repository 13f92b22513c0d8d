use crate::board::board::Board;
use crate::board::board_ids::BoardId;
use crate::board::turn::Turn;

/// A game state the generic search engine can explore.
///
/// `state_id` identifies one concrete state instance and keys the search
/// cache; equal-valued states produced by different expansions carry
/// different ids.
pub trait SearchState: Clone + PartialEq + Send {
    fn state_id(&self) -> BoardId;

    /// Side to act in this state.
    fn turn(&self) -> Turn;
}

impl SearchState for Board {
    #[inline]
    fn state_id(&self) -> BoardId {
        self.id()
    }

    #[inline]
    fn turn(&self) -> Turn {
        Board::turn(self)
    }
}
