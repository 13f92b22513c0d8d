//! The search pipeline: negmax scoring, alpha-beta filtering and the search
//! cache arranged as ordered stages behind the engine's visitor hooks.
//!
//! Expansion runs the stages in a fixed order. The alpha-beta filter is
//! consulted first because its decision depends on bounds in the current
//! tree. The cache is probed next, and only a miss reaches the negmax stage
//! and the successor generator. Pruned expansions are never cached.
//!
//! Post-visit runs negmax scoring before the alpha-beta bound update, so
//! the parent's bound always sees the node's final score.

use std::time::Instant;

use log::debug;

use crate::board::board_ids::BoardIdGenerator;
use crate::errors::CheckersResult;
use crate::search::alpha_beta::{AlphaBetaFilter, PruneStats};
use crate::search::depth_limited::{
    depth_first_search, recursive_depth_first_search, SearchHooks, SearchStats,
};
use crate::search::negmax::NegmaxStage;
use crate::search::node::{NodeId, NodeKind, SearchTree};
use crate::search::search_cache::{CacheStats, SearchCache};
use crate::search::search_state::SearchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFeatures {
    pub alpha_beta: bool,
    pub caching: bool,
}

impl Default for SearchFeatures {
    fn default() -> Self {
        Self {
            alpha_beta: true,
            caching: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Traversal {
    #[default]
    ExplicitStack,
    Recursive,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub depth_limit: u32,
    pub features: SearchFeatures,
    pub traversal: Traversal,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth_limit: 6,
            features: SearchFeatures::default(),
            traversal: Traversal::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchReport {
    pub depth_limit: u32,
    pub tree_size: usize,
    pub traversal: SearchStats,
    pub prunes: PruneStats,
    pub cache: CacheStats,
    pub elapsed_ms: u64,
}

pub struct SearchPipeline<S: SearchState> {
    negmax: NegmaxStage<S>,
    alpha_beta: Option<AlphaBetaFilter>,
    cache: Option<SearchCache<S>>,
    ids: Box<dyn BoardIdGenerator>,
    traversal: Traversal,
    last_report: SearchReport,
}

impl<S: SearchState> SearchPipeline<S> {
    pub fn new(
        negmax: NegmaxStage<S>,
        features: SearchFeatures,
        traversal: Traversal,
        ids: Box<dyn BoardIdGenerator>,
    ) -> Self {
        Self {
            negmax,
            alpha_beta: features.alpha_beta.then(AlphaBetaFilter::new),
            cache: features.caching.then(SearchCache::new),
            ids,
            traversal,
            last_report: SearchReport::default(),
        }
    }

    pub fn features(&self) -> SearchFeatures {
        SearchFeatures {
            alpha_beta: self.alpha_beta.is_some(),
            caching: self.cache.is_some(),
        }
    }

    #[inline]
    pub fn ids(&mut self) -> &mut dyn BoardIdGenerator {
        self.ids.as_mut()
    }

    pub fn mover_has_lost(&self, state: &S) -> bool {
        self.negmax.mover_has_lost(state)
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(SearchCache::stats)
    }

    pub fn last_report(&self) -> SearchReport {
        self.last_report
    }

    /// Builds and scores the game tree below `root` to `depth_limit` plies.
    pub fn search(&mut self, root: S, depth_limit: u32) -> CheckersResult<SearchTree<S>> {
        let started = Instant::now();
        let root_id = root.state_id();
        let mut tree = SearchTree::new(root);

        let traversal = match self.traversal {
            Traversal::ExplicitStack => depth_first_search(self, &mut tree, depth_limit)?,
            Traversal::Recursive => recursive_depth_first_search(self, &mut tree, depth_limit)?,
        };

        self.last_report = SearchReport {
            depth_limit,
            tree_size: tree.len(),
            traversal,
            prunes: self.alpha_beta.as_ref().map(AlphaBetaFilter::stats).unwrap_or_default(),
            cache: self.cache_stats().unwrap_or_default(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        debug!(
            "searched state {root_id} to depth {depth_limit}: {} nodes, {} expansions, {} ms",
            traversal.nodes_visited, traversal.expansions, self.last_report.elapsed_ms
        );

        Ok(tree)
    }
}

impl<S: SearchState> SearchHooks<S> for SearchPipeline<S> {
    fn pre_visit(
        &mut self,
        tree: &mut SearchTree<S>,
        node: NodeId,
        _remaining_depth: u32,
        kind: NodeKind,
    ) -> CheckersResult<()> {
        if kind == NodeKind::Start {
            if let Some(cache) = self.cache.as_mut() {
                cache.retain_path_to(tree.node(node).state().state_id());
            }
        }
        Ok(())
    }

    fn expand(
        &mut self,
        tree: &mut SearchTree<S>,
        node: NodeId,
        kind: NodeKind,
    ) -> CheckersResult<Vec<NodeId>> {
        if let Some(filter) = self.alpha_beta.as_mut() {
            if filter.should_prune(tree, node) {
                return Ok(Vec::new());
            }
        }

        let state_id = tree.node(node).state().state_id();
        let cached = match self.cache.as_mut() {
            Some(cache) => cache.probe(state_id, kind),
            None => None,
        };

        let successors = match cached {
            Some(successors) => successors,
            None => {
                let successors = self
                    .negmax
                    .successors(tree.node(node).state(), self.ids.as_mut())?;
                if let Some(cache) = self.cache.as_mut() {
                    cache.store(state_id, kind, successors.clone());
                }
                successors
            }
        };

        Ok(successors
            .into_iter()
            .map(|state| tree.spawn(node, state))
            .collect())
    }

    fn post_visit(
        &mut self,
        tree: &mut SearchTree<S>,
        node: NodeId,
        _remaining_depth: u32,
        kind: NodeKind,
    ) -> CheckersResult<()> {
        self.negmax.post_visit(tree, node, kind);
        if let Some(filter) = self.alpha_beta.as_ref() {
            filter.post_visit(tree, node);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::board::Board;
    use crate::board::board_ids::{BoardId, SequentialBoardIds};
    use crate::board::turn::Turn;
    use crate::move_generation::checkers_successors::CheckersMoveGenerator;
    use crate::search::board_scoring::{BoardScorer, CheckersScorer};
    use crate::search::goal::CheckersGoal;
    use crate::search::negmax::scale_leaf_score;

    fn pipeline(features: SearchFeatures, traversal: Traversal, first_id: BoardId) -> SearchPipeline<Board> {
        SearchPipeline::new(
            NegmaxStage::new(
                Box::new(CheckersMoveGenerator),
                Box::new(CheckersScorer::new()),
                Box::new(CheckersGoal),
            ),
            features,
            traversal,
            Box::new(SequentialBoardIds::starting_at(first_id)),
        )
    }

    fn root_scores(tree: &SearchTree<Board>) -> Vec<(Board, i32)> {
        tree.children(tree.root())
            .iter()
            .map(|&child| (tree.node(child).state().clone(), tree.node(child).score()))
            .collect()
    }

    #[test]
    fn traversals_build_identical_trees() {
        let root = Board::starting_position(0, Turn::Max).expect("starting position builds");
        for features in [
            SearchFeatures { alpha_beta: false, caching: false },
            SearchFeatures::default(),
        ] {
            let mut stack = pipeline(features, Traversal::ExplicitStack, 1);
            let mut recursive = pipeline(features, Traversal::Recursive, 1);

            let stack_tree = stack.search(root.clone(), 4).expect("search runs");
            let recursive_tree = recursive.search(root.clone(), 4).expect("search runs");

            assert_eq!(stack_tree.len(), recursive_tree.len());
            assert_eq!(root_scores(&stack_tree), root_scores(&recursive_tree));
            assert_eq!(
                stack_tree.node(stack_tree.root()).score(),
                recursive_tree.node(recursive_tree.root()).score()
            );
            assert_eq!(stack.last_report().traversal, recursive.last_report().traversal);
        }
    }

    #[test]
    fn pruning_keeps_the_best_root_child() {
        let root = Board::starting_position(0, Turn::Min).expect("starting position builds");
        let mut full = pipeline(SearchFeatures { alpha_beta: false, caching: false }, Traversal::default(), 1);
        let mut pruned = pipeline(SearchFeatures { alpha_beta: true, caching: false }, Traversal::default(), 1);

        let full_tree = full.search(root.clone(), 4).expect("search runs");
        let pruned_tree = pruned.search(root, 4).expect("search runs");

        let best = |tree: &SearchTree<Board>| {
            let id = tree.ranked_children(tree.root())[0];
            (tree.node(id).state().clone(), tree.node(id).score())
        };
        assert_eq!(best(&full_tree), best(&pruned_tree));
        assert!(pruned_tree.len() < full_tree.len());
        assert!(pruned.last_report().prunes.prunes > 0);
    }

    #[test]
    fn repeated_search_from_same_root_hits_cache() {
        let root = Board::starting_position(0, Turn::Max).expect("starting position builds");
        let mut cached = pipeline(SearchFeatures::default(), Traversal::default(), 1);

        let first = cached.search(root.clone(), 1).expect("search runs");
        let second = cached.search(root, 1).expect("search runs");

        let stats = cached.cache_stats().expect("caching enabled");
        assert_eq!(stats.hits, 1);
        let ids = |tree: &SearchTree<Board>| -> Vec<BoardId> {
            tree.children(tree.root())
                .iter()
                .map(|&child| tree.node(child).state().id())
                .collect()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn depth_one_scores_are_scaled_leaves() {
        let root = Board::starting_position(0, Turn::Max).expect("starting position builds");
        let mut plain = pipeline(SearchFeatures { alpha_beta: false, caching: false }, Traversal::default(), 1);
        let tree = plain.search(root, 1).expect("search runs");

        let scorer = CheckersScorer::new();
        for &child in tree.children(tree.root()) {
            let node = tree.node(child);
            let raw = scorer.score(node.state());
            assert_eq!(node.score(), scale_leaf_score(raw, 1));
        }
        let best = tree
            .children(tree.root())
            .iter()
            .map(|&child| tree.node(child).score())
            .max()
            .expect("opening has moves");
        assert_eq!(tree.node(tree.root()).score(), -best);
    }
}
