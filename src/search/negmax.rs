//! Negmax cost propagation.
//!
//! Every node's score is read from the perspective of the player who moved
//! into it. Leaves take the static evaluation, rescaled by their distance
//! from the root so that shallower outcomes dominate deeper ones; interior
//! nodes take the negated best score among their visited children.

use crate::board::board_ids::BoardIdGenerator;
use crate::errors::CheckersResult;
use crate::move_generation::successor_generator::SuccessorGenerator;
use crate::search::board_scoring::BoardScorer;
use crate::search::goal::GoalCheck;
use crate::search::node::{NodeId, NodeKind, SearchTree};
use crate::search::search_state::SearchState;

pub const LEAF_SCALE: i32 = 10_000;

/// Rescales a static score by the leaf's depth from the root.
///
/// The division happens before the multiplication, so a raw score smaller in
/// magnitude than the depth scales to zero and the raw score is kept. Any
/// non-zero scaled value is pushed one further away from zero.
pub fn scale_leaf_score(raw: i32, depth: u32) -> i32 {
    let scaled = if raw != 0 && depth != 0 {
        (raw / depth as i32) * LEAF_SCALE
    } else {
        raw
    };

    if scaled > 0 {
        scaled + 1
    } else if scaled < 0 {
        scaled - 1
    } else {
        raw
    }
}

/// Negated maximum of `scores`; `None` when there are none.
pub fn fold_child_scores<I: IntoIterator<Item = i32>>(scores: I) -> Option<i32> {
    scores.into_iter().max().map(|best| -best)
}

/// Successor production and scoring for one game.
pub struct NegmaxStage<S: SearchState> {
    generator: Box<dyn SuccessorGenerator<S>>,
    scorer: Box<dyn BoardScorer<S>>,
    goal: Box<dyn GoalCheck<S>>,
}

impl<S: SearchState> NegmaxStage<S> {
    pub fn new(
        generator: Box<dyn SuccessorGenerator<S>>,
        scorer: Box<dyn BoardScorer<S>>,
        goal: Box<dyn GoalCheck<S>>,
    ) -> Self {
        Self {
            generator,
            scorer,
            goal,
        }
    }

    pub fn mover_has_lost(&self, state: &S) -> bool {
        self.goal.mover_has_lost(state)
    }

    /// Successor states, or none once the side to act has lost.
    pub fn successors(&self, state: &S, ids: &mut dyn BoardIdGenerator) -> CheckersResult<Vec<S>> {
        if self.goal.mover_has_lost(state) {
            return Ok(Vec::new());
        }
        self.generator.successors(state, ids)
    }

    pub fn post_visit(&self, tree: &mut SearchTree<S>, node: NodeId, kind: NodeKind) {
        let score = if kind == NodeKind::Leaf {
            let current = tree.node(node);
            scale_leaf_score(self.scorer.score(current.state()), current.depth())
        } else {
            let children = tree.children(node);
            fold_child_scores(children.iter().map(|&child| tree.node(child).score()))
                .unwrap_or_else(|| {
                    let current = tree.node(node);
                    scale_leaf_score(self.scorer.score(current.state()), current.depth())
                })
        };
        tree.node_mut(node).set_score(score);
    }
}
