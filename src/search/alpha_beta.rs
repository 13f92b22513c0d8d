//! Alpha-beta pruning expressed as a filter in front of node expansion.
//!
//! Pruning is decided when a grandchild is about to be expanded rather than
//! when its parent is. For a node `n` with parent `p` and grandparent `g`:
//!
//! - `g.best_child_score` is the best score `g` can already secure (lower bound);
//! - `-p.best_child_score` is the most `p` can still be worth to `g` (upper bound).
//!
//! When the lower bound strictly exceeds the upper bound, `p` can never be
//! chosen by `g`. The filter then yields no successors for `n` and marks `p`
//! evaluated so its remaining children are skipped. Every pruned subtree
//! scores strictly below a sibling already visited, which keeps the choice
//! at every node identical to an unpruned search.

use crate::search::node::{NodeId, SearchTree};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneStats {
    pub checks: u64,
    pub prunes: u64,
}

#[derive(Debug, Clone, Default)]
pub struct AlphaBetaFilter {
    stats: PruneStats,
}

impl AlphaBetaFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stats(&self) -> PruneStats {
        self.stats
    }

    /// Whether `node` must not be expanded. Marks its parent evaluated when so.
    pub fn should_prune<S>(&mut self, tree: &mut SearchTree<S>, node: NodeId) -> bool {
        let Some(parent) = tree.node(node).parent() else {
            return false;
        };
        let Some(grandparent) = tree.node(parent).parent() else {
            return false;
        };

        self.stats.checks += 1;
        let lower = tree.node(grandparent).best_child_score();
        let upper = tree.node(parent).best_child_score().map(|best| -best);

        match (lower, upper) {
            (Some(lower), Some(upper)) if lower > upper => {
                tree.node_mut(parent).mark_evaluated();
                self.stats.prunes += 1;
                true
            }
            _ => false,
        }
    }

    /// Raises the parent's best child score to this node's final score.
    pub fn post_visit<S>(&self, tree: &mut SearchTree<S>, node: NodeId) {
        if let Some(parent) = tree.node(node).parent() {
            let score = tree.node(node).score();
            tree.node_mut(parent).raise_best_child_score(score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// g -> p -> n with the given best scores on g and p.
    fn chain(g_best: Option<i32>, p_best: Option<i32>) -> (SearchTree<()>, NodeId, NodeId) {
        let mut tree = SearchTree::new(());
        let g = tree.root();
        let p = tree.spawn(g, ());
        let n = tree.spawn(p, ());
        if let Some(best) = g_best {
            tree.node_mut(g).raise_best_child_score(best);
        }
        if let Some(best) = p_best {
            tree.node_mut(p).raise_best_child_score(best);
        }
        (tree, p, n)
    }

    #[test]
    fn prunes_when_parent_cannot_be_chosen() {
        // g already secures 5; p is worth at most -(-2) = 2 to g
        let (mut tree, p, n) = chain(Some(5), Some(-2));
        let mut filter = AlphaBetaFilter::new();
        assert!(filter.should_prune(&mut tree, n));
        assert!(tree.node(p).is_evaluated());
        assert_eq!(filter.stats().prunes, 1);
    }

    #[test]
    fn equal_bounds_do_not_prune() {
        let (mut tree, p, n) = chain(Some(2), Some(-2));
        let mut filter = AlphaBetaFilter::new();
        assert!(!filter.should_prune(&mut tree, n));
        assert!(!tree.node(p).is_evaluated());
    }

    #[test]
    fn missing_bounds_do_not_prune() {
        let mut filter = AlphaBetaFilter::new();
        for (g_best, p_best) in [(None, Some(-9)), (Some(9), None), (None, None)] {
            let (mut tree, _, n) = chain(g_best, p_best);
            assert!(!filter.should_prune(&mut tree, n));
        }

        let mut shallow = SearchTree::new(());
        let root = shallow.root();
        let child = shallow.spawn(root, ());
        assert!(!filter.should_prune(&mut shallow, root));
        assert!(!filter.should_prune(&mut shallow, child));
    }

    #[test]
    fn post_visit_raises_parent_bound() {
        let (mut tree, p, n) = chain(None, Some(-4));
        tree.node_mut(n).set_score(3);
        AlphaBetaFilter::new().post_visit(&mut tree, n);
        assert_eq!(tree.node(p).best_child_score(), Some(3));

        tree.node_mut(n).set_score(-10);
        AlphaBetaFilter::new().post_visit(&mut tree, n);
        assert_eq!(tree.node(p).best_child_score(), Some(3));
    }
}
