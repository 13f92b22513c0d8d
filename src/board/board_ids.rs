//! Board identity allocation.
//!
//! Every board produced during a game (starting position, generated
//! successors, applied move requests) receives an id from the game's own
//! generator. Ids key the search cache, so two games never share a counter.

pub type BoardId = u64;

pub trait BoardIdGenerator: Send {
    fn next_board_id(&mut self) -> BoardId;
}

/// Monotonic counter starting from a chosen value.
#[derive(Debug, Clone, Default)]
pub struct SequentialBoardIds {
    next: BoardId,
}

impl SequentialBoardIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(first: BoardId) -> Self {
        Self { next: first }
    }

    /// Id the next call will hand out.
    #[inline]
    pub fn peek(&self) -> BoardId {
        self.next
    }
}

impl BoardIdGenerator for SequentialBoardIds {
    #[inline]
    fn next_board_id(&mut self) -> BoardId {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}
