use std::sync::Arc;
use std::thread;

use crate::board::board::Board;
use crate::board::board_ids::{BoardIdGenerator, SequentialBoardIds};
use crate::errors::CheckersResult;
use crate::move_generation::successor_generator::SuccessorGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub promotions: usize,
    /// Leaf positions where the side to move has no legal move.
    pub dead_ends: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
        self.dead_ends += rhs.dead_ends;
    }
}

pub fn perft<G: SuccessorGenerator<Board>>(
    generator: &G,
    board: &Board,
    depth: u8,
) -> CheckersResult<PerftCounts> {
    let mut ids = SequentialBoardIds::starting_at(board.id() + 1);
    perft_with_ids(generator, board, depth, &mut ids)
}

pub fn perft_with_ids<G: SuccessorGenerator<Board>>(
    generator: &G,
    board: &Board,
    depth: u8,
    ids: &mut dyn BoardIdGenerator,
) -> CheckersResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for child in generator.successors(board, ids)? {
        perft_recurse(generator, board, &child, depth, 1, ids, &mut total)?;
    }
    Ok(total)
}

/// Splits the root successors across one thread each.
pub fn perft_multi_threaded(
    generator: Arc<dyn SuccessorGenerator<Board>>,
    board: &Board,
    depth: u8,
) -> CheckersResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut ids = SequentialBoardIds::starting_at(board.id() + 1);
    let root_children = generator.successors(board, &mut ids)?;
    let mut handles = Vec::with_capacity(root_children.len());

    for child in root_children {
        let generator_ref = Arc::clone(&generator);
        let parent = board.clone();
        let first_id = ids.peek();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            let mut local_ids = SequentialBoardIds::starting_at(first_id);
            let result = perft_recurse(
                generator_ref.as_ref(),
                &parent,
                &child,
                depth,
                1,
                &mut local_ids,
                &mut local,
            );
            (result, local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = match handle.join() {
            Ok(outcome) => outcome,
            Err(panic) => std::panic::resume_unwind(panic),
        };
        result?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse<G: SuccessorGenerator<Board> + ?Sized>(
    generator: &G,
    parent: &Board,
    board: &Board,
    search_depth: u8,
    current_depth: u8,
    ids: &mut dyn BoardIdGenerator,
    counts: &mut PerftCounts,
) -> CheckersResult<()> {
    if current_depth == search_depth {
        let mover = parent.turn();
        counts.nodes += 1;
        if board.stats().total(mover.next()) < parent.stats().total(mover.next()) {
            counts.captures += 1;
        }
        if board.stats().kings(mover) > parent.stats().kings(mover) {
            counts.promotions += 1;
        }
        if generator.successors(board, ids)?.is_empty() {
            counts.dead_ends += 1;
        }
        return Ok(());
    }

    for child in generator.successors(board, ids)? {
        perft_recurse(generator, board, &child, search_depth, current_depth + 1, ids, counts)?;
    }

    Ok(())
}
