//! Side to move.

use std::fmt;

/// One of the two actors of a turn-driven game.
///
/// The sign is the negmax multiplier and doubles as the player id. In
/// checkers it is also the forward y-direction of the player's standard
/// pieces: `Max` advances toward increasing y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Max,
    Min,
}

impl Turn {
    pub const ALL: [Turn; 2] = [Turn::Max, Turn::Min];

    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Turn::Max => 1,
            Turn::Min => -1,
        }
    }

    #[inline]
    pub const fn id(self) -> i32 {
        self.sign()
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Turn::Max => 0,
            Turn::Min => 1,
        }
    }

    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Turn::Max => Turn::Min,
            Turn::Min => Turn::Max,
        }
    }

    pub const fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Turn::Max),
            -1 => Some(Turn::Min),
            _ => None,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Max => write!(f, "Max"),
            Turn::Min => write!(f, "Min"),
        }
    }
}
