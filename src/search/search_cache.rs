//! Search cache of already-expanded nodes.
//!
//! Entries are keyed by the expanded state's id and the node kind it was
//! expanded as, and hold the successor states produced by that expansion.
//! Ids identify concrete state instances, so this is a cache of searches
//! already performed rather than a transposition table over equal positions.
//!
//! Successors are linked back to the state they were produced from. When a
//! new search starts from a state that was produced earlier, everything
//! outside the path to it (its ancestors and every sibling subtree) can
//! never be reached again and is evicted.

use std::collections::HashMap;

use log::{debug, trace};

use crate::board::board_ids::BoardId;
use crate::search::node::NodeKind;
use crate::search::search_state::SearchState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub evictions: u64,
}

#[derive(Debug, Clone)]
pub struct SearchCache<S> {
    entries: HashMap<(BoardId, NodeKind), Vec<S>>,
    parents: HashMap<BoardId, BoardId>,
    stats: CacheStats,
}

impl<S> Default for SearchCache<S> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            parents: HashMap::new(),
            stats: CacheStats::default(),
        }
    }
}

impl<S: SearchState> SearchCache<S> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.parents.clear();
        self.stats = CacheStats::default();
    }

    /// Copies of the successors stored for `(id, kind)`.
    pub fn probe(&mut self, id: BoardId, kind: NodeKind) -> Option<Vec<S>> {
        self.stats.probes += 1;
        let hit = self.entries.get(&(id, kind)).cloned();
        if hit.is_some() {
            self.stats.hits += 1;
            trace!("cache hit for state {id} ({kind:?})");
        }
        hit
    }

    pub fn store(&mut self, id: BoardId, kind: NodeKind, successors: Vec<S>) {
        self.stats.stores += 1;
        for successor in &successors {
            self.parents.insert(successor.state_id(), id);
        }
        self.entries.insert((id, kind), successors);
    }

    /// Evicts every entry that cannot be reached from `root` any more.
    pub fn retain_path_to(&mut self, root: BoardId) {
        let before = self.entries.len();
        let mut kept = root;

        while let Some(parent) = self.parents.remove(&kept) {
            for sibling in self.take_successor_ids(parent) {
                if sibling != kept {
                    self.clear_subtree(sibling);
                }
            }
            kept = parent;
        }

        let evicted = (before - self.entries.len()) as u64;
        if evicted > 0 {
            self.stats.evictions += evicted;
            debug!(
                "search cache evicted {evicted} entries, {} retained below state {root}",
                self.entries.len()
            );
        }
    }

    fn take_successor_ids(&mut self, id: BoardId) -> Vec<BoardId> {
        [NodeKind::Start, NodeKind::Transition, NodeKind::Leaf]
            .into_iter()
            .filter_map(|kind| self.entries.remove(&(id, kind)))
            .flatten()
            .map(|state| state.state_id())
            .collect()
    }

    fn clear_subtree(&mut self, id: BoardId) {
        let mut open = vec![id];
        while let Some(current) = open.pop() {
            self.parents.remove(&current);
            open.extend(self.take_successor_ids(current));
        }
    }
}
