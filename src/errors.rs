//! Errors used throughout the checkers engine.
//!
//! `CheckersError` is the single error type returned by the board model,
//! successor generation, the search pipeline, and the game layer. Variants
//! fall into two groups:
//!
//! - Illegal-usage failures (empty source square, off-board destination,
//!   wrong side to move, a proposed board that is not a legal successor,
//!   corrupted board snapshots). These are caller or programmer errors and
//!   are never retried.
//! - `GameFinished`, an expected condition raised when an operation is
//!   attempted on a game whose outcome is already decided. It carries the
//!   winning side so callers can stop accepting input without inspecting the
//!   board again.

use std::error::Error;
use std::fmt;

use crate::board::coordinate::Coordinate;
use crate::board::piece_catalogue::PieceId;
use crate::board::turn::Turn;

pub type CheckersResult<T> = Result<T, CheckersError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckersError {
    /// A move step started from a square holding no piece.
    EmptySource(Coordinate),

    /// A piece removal targeted an empty square.
    EmptyCell(Coordinate),

    /// A coordinate outside the board extent was used.
    OffBoard(Coordinate),

    /// Tried to place a piece on a square that already holds one.
    CellOccupied(Coordinate),

    /// A proposed board was produced for the wrong side.
    NotYourTurn { expected: Turn, found: Turn },

    /// The proposed board is not among the legal successors of the current one.
    IllegalMove,

    /// Search depth limits must be at least one ply.
    InvalidDepthLimit(u32),

    /// A raw cell value does not name an entry of the piece catalogue.
    UnknownPieceId(PieceId),

    /// A raw board snapshot does not match the board extent.
    InvalidSnapshot { expected_cells: usize, found_cells: usize },

    /// A move request with no steps.
    EmptyMoveRequest,

    /// Move text could not be parsed.
    InvalidNotation(String),

    /// The game is already decided.
    GameFinished { winner: Turn },
}

impl CheckersError {
    #[inline]
    pub fn is_game_finished(&self) -> bool {
        matches!(self, CheckersError::GameFinished { .. })
    }

    /// Winning side when this error is the finished-game signal.
    pub fn winner(&self) -> Option<Turn> {
        match self {
            CheckersError::GameFinished { winner } => Some(*winner),
            _ => None,
        }
    }
}

impl fmt::Display for CheckersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckersError::EmptySource(at) => write!(f, "there is no piece at {at}"),
            CheckersError::EmptyCell(at) => write!(f, "cannot remove a piece from empty cell {at}"),
            CheckersError::OffBoard(at) => {
                write!(f, "{at} is not within the confines of the board")
            }
            CheckersError::CellOccupied(at) => write!(f, "cell {at} already contains a piece"),
            CheckersError::NotYourTurn { expected, found } => {
                write!(f, "it is not {found}'s turn to move, expected {expected}")
            }
            CheckersError::IllegalMove => {
                write!(f, "proposed board is not permitted by the game rules")
            }
            CheckersError::InvalidDepthLimit(depth) => {
                write!(f, "search depth limit must be at least 1, got {depth}")
            }
            CheckersError::UnknownPieceId(id) => write!(f, "unknown piece id {id}"),
            CheckersError::InvalidSnapshot {
                expected_cells,
                found_cells,
            } => write!(
                f,
                "board snapshot has {found_cells} cells, expected {expected_cells}"
            ),
            CheckersError::EmptyMoveRequest => write!(f, "move request contains no steps"),
            CheckersError::InvalidNotation(text) => write!(f, "cannot parse move text '{text}'"),
            CheckersError::GameFinished { winner } => {
                write!(f, "game already finished, {winner} won")
            }
        }
    }
}

impl Error for CheckersError {}
