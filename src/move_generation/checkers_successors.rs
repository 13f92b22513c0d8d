//! Legal-move generation for checkers.
//!
//! Pieces of the side to move are visited in board order. For every piece
//! the two forward diagonals are tried left then right; kings then try the
//! two backward diagonals. A diagonal holding an opponent piece with an
//! empty landing cell behind it is a capture, and the capturing piece keeps
//! jumping from its landing cell until no further capture exists. The end of
//! every such chain is one successor board.
//!
//! Captures are mandatory: once any capture exists for the mover, simple
//! moves are no longer recorded and only the capture boards are returned.
//! A standard piece reaching row `0` or row `height - 1` is replaced by its
//! king variant; if that happens during a capture the move ends there.

use crate::board::board::Board;
use crate::board::board_ids::BoardIdGenerator;
use crate::board::coordinate::Coordinate;
use crate::board::piece_catalogue::{king_variant_of, PieceDescriptor, PieceKind};
use crate::board::turn::Turn;
use crate::errors::CheckersResult;
use crate::move_generation::successor_generator::SuccessorGenerator;

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckersMoveGenerator;

impl CheckersMoveGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl SuccessorGenerator<Board> for CheckersMoveGenerator {
    fn successors(&self, board: &Board, ids: &mut dyn BoardIdGenerator) -> CheckersResult<Vec<Board>> {
        let mover = board.turn();
        if board.stats().total(mover) == 0 {
            return Ok(Vec::new());
        }

        let mut expansion = Expansion {
            mover,
            ids,
            jumps: Vec::new(),
            singles: Vec::new(),
        };

        for (pos, piece) in board.pieces_of(mover) {
            expansion.expand_piece(board, pos, piece, mover.sign(), false)?;
        }

        Ok(if expansion.jumps.is_empty() {
            expansion.singles
        } else {
            expansion.jumps
        })
    }
}

/// King variant of `piece` when it lands on either end row, else `piece`.
pub fn promote_if_required(piece: PieceDescriptor, landing: Coordinate, board: &Board) -> PieceDescriptor {
    let on_end_row = landing.y == 0 || landing.y == board.height() - 1;
    if piece.kind == PieceKind::Standard && on_end_row {
        king_variant_of(piece)
    } else {
        piece
    }
}

/// Moves the piece on `from` to `to`, promoting it if required, and returns
/// the piece as placed.
pub fn relocate(board: &mut Board, from: Coordinate, to: Coordinate) -> CheckersResult<PieceDescriptor> {
    let piece = board.remove_piece(from)?;
    let placed = promote_if_required(piece, to, board);
    board.add_piece(to, placed)?;
    Ok(placed)
}

struct Expansion<'a> {
    mover: Turn,
    ids: &'a mut dyn BoardIdGenerator,
    jumps: Vec<Board>,
    singles: Vec<Board>,
}

impl Expansion<'_> {
    fn expand_piece(
        &mut self,
        board: &Board,
        from: Coordinate,
        piece: PieceDescriptor,
        forward: i32,
        in_chain: bool,
    ) -> CheckersResult<()> {
        let mut continued = false;
        continued |= self.try_diagonal(board, from, piece, -1, forward, in_chain)?;
        continued |= self.try_diagonal(board, from, piece, 1, forward, in_chain)?;
        if piece.is_king() {
            continued |= self.try_diagonal(board, from, piece, -1, -forward, in_chain)?;
            continued |= self.try_diagonal(board, from, piece, 1, -forward, in_chain)?;
        }

        if in_chain && !continued {
            self.jumps.push(board.clone());
        }
        Ok(())
    }

    /// Records the move along `(dx, dy)` if one exists and reports whether it did.
    fn try_diagonal(
        &mut self,
        board: &Board,
        from: Coordinate,
        piece: PieceDescriptor,
        dx: i32,
        dy: i32,
        in_chain: bool,
    ) -> CheckersResult<bool> {
        let target = from.step(dx, dy);
        if !board.is_on_board(target) {
            return Ok(false);
        }

        match board.piece_at(target) {
            Some(occupant) if occupant.owner != self.mover => {
                let landing = target.step(dx, dy);
                if !board.is_on_board(landing) || board.holds_piece_at(landing) {
                    return Ok(false);
                }

                let mut next = board.derive(self.ids.next_board_id(), self.mover.next());
                let placed = relocate(&mut next, from, landing)?;
                next.remove_piece(target)?;

                if placed == piece {
                    self.expand_piece(&next, landing, placed, dy, true)?;
                } else {
                    self.jumps.push(next);
                }
                Ok(true)
            }
            None if !in_chain && self.jumps.is_empty() => {
                let mut next = board.derive(self.ids.next_board_id(), self.mover.next());
                relocate(&mut next, from, target)?;
                self.singles.push(next);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
