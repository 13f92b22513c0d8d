//! Depth-limited post-order depth-first search.
//!
//! The engine knows nothing about scoring or pruning. It drives a
//! [`SearchHooks`] implementation through three notifications per node:
//! `pre_visit`, `expand` (skipped for leaves) and `post_visit`. Children are
//! visited one at a time in the order `expand` returned them, and each child
//! is fully post-visited before it is attached to its parent and before the
//! next sibling starts. Once a node is marked evaluated its remaining
//! children are skipped.
//!
//! A node that ends up with no visited children is post-visited as
//! [`NodeKind::Leaf`] regardless of the kind it was entered with.
//!
//! [`depth_first_search`] keeps its own frame stack and is the production
//! traversal. [`recursive_depth_first_search`] is a straightforward
//! recursive rendition that must produce the same tree.

use crate::errors::{CheckersError, CheckersResult};
use crate::search::node::{NodeId, NodeKind, SearchTree};

pub trait SearchHooks<S> {
    fn pre_visit(
        &mut self,
        tree: &mut SearchTree<S>,
        node: NodeId,
        remaining_depth: u32,
        kind: NodeKind,
    ) -> CheckersResult<()>;

    /// Spawns the successors of `node` in `tree` and returns them in visit order.
    fn expand(
        &mut self,
        tree: &mut SearchTree<S>,
        node: NodeId,
        kind: NodeKind,
    ) -> CheckersResult<Vec<NodeId>>;

    fn post_visit(
        &mut self,
        tree: &mut SearchTree<S>,
        node: NodeId,
        remaining_depth: u32,
        kind: NodeKind,
    ) -> CheckersResult<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub expansions: u64,
    pub leaves: u64,
    pub skipped_children: u64,
}

#[inline]
fn child_kind(child_depth: u32) -> NodeKind {
    if child_depth == 0 {
        NodeKind::Leaf
    } else {
        NodeKind::Transition
    }
}

fn check_depth_limit(depth_limit: u32) -> CheckersResult<()> {
    if depth_limit == 0 {
        return Err(CheckersError::InvalidDepthLimit(depth_limit));
    }
    Ok(())
}

struct Frame {
    node: NodeId,
    remaining_depth: u32,
    kind: NodeKind,
    pending: std::vec::IntoIter<NodeId>,
    visited: usize,
    entered: bool,
}

impl Frame {
    fn new(node: NodeId, remaining_depth: u32, kind: NodeKind) -> Self {
        Self {
            node,
            remaining_depth,
            kind,
            pending: Vec::new().into_iter(),
            visited: 0,
            entered: false,
        }
    }
}

/// Explicit-stack traversal from the tree root.
pub fn depth_first_search<S, H>(
    hooks: &mut H,
    tree: &mut SearchTree<S>,
    depth_limit: u32,
) -> CheckersResult<SearchStats>
where
    H: SearchHooks<S> + ?Sized,
{
    check_depth_limit(depth_limit)?;

    let mut stats = SearchStats::default();
    let mut stack = vec![Frame::new(tree.root(), depth_limit, NodeKind::Start)];

    while let Some(top) = stack.len().checked_sub(1) {
        if !stack[top].entered {
            let frame = &mut stack[top];
            frame.entered = true;
            stats.nodes_visited += 1;
            hooks.pre_visit(tree, frame.node, frame.remaining_depth, frame.kind)?;
            if frame.kind != NodeKind::Leaf {
                stats.expansions += 1;
                frame.pending = hooks.expand(tree, frame.node, frame.kind)?.into_iter();
            }
        }

        let frame = &mut stack[top];
        if !tree.node(frame.node).is_evaluated() {
            if let Some(child) = frame.pending.next() {
                let child_depth = frame.remaining_depth.saturating_sub(1);
                stack.push(Frame::new(child, child_depth, child_kind(child_depth)));
                continue;
            }
        }

        let Some(done) = stack.pop() else {
            break;
        };
        stats.skipped_children += done.pending.len() as u64;
        let kind = if done.visited == 0 {
            stats.leaves += 1;
            NodeKind::Leaf
        } else {
            done.kind
        };
        hooks.post_visit(tree, done.node, done.remaining_depth, kind)?;

        if let Some(parent) = stack.last_mut() {
            tree.attach_child(parent.node, done.node);
            parent.visited += 1;
        }
    }

    Ok(stats)
}

/// Recursive traversal producing the same tree as [`depth_first_search`].
pub fn recursive_depth_first_search<S, H>(
    hooks: &mut H,
    tree: &mut SearchTree<S>,
    depth_limit: u32,
) -> CheckersResult<SearchStats>
where
    H: SearchHooks<S> + ?Sized,
{
    check_depth_limit(depth_limit)?;

    let mut stats = SearchStats::default();
    let root = tree.root();
    visit(hooks, tree, root, depth_limit, NodeKind::Start, &mut stats)?;
    Ok(stats)
}

fn visit<S, H>(
    hooks: &mut H,
    tree: &mut SearchTree<S>,
    node: NodeId,
    remaining_depth: u32,
    kind: NodeKind,
    stats: &mut SearchStats,
) -> CheckersResult<()>
where
    H: SearchHooks<S> + ?Sized,
{
    stats.nodes_visited += 1;
    hooks.pre_visit(tree, node, remaining_depth, kind)?;

    let successors = if kind != NodeKind::Leaf {
        stats.expansions += 1;
        hooks.expand(tree, node, kind)?
    } else {
        Vec::new()
    };

    let child_depth = remaining_depth.saturating_sub(1);
    let mut visited = 0;
    for (i, child) in successors.iter().copied().enumerate() {
        if tree.node(node).is_evaluated() {
            stats.skipped_children += (successors.len() - i) as u64;
            break;
        }
        visit(hooks, tree, child, child_depth, child_kind(child_depth), stats)?;
        tree.attach_child(node, child);
        visited += 1;
    }

    let kind = if visited == 0 {
        stats.leaves += 1;
        NodeKind::Leaf
    } else {
        kind
    };
    hooks.post_visit(tree, node, remaining_depth, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Uniform tree of the given branching factor that records every event.
    struct Recorder {
        branching: usize,
        events: Vec<String>,
        evaluate_after_first_child: Option<NodeId>,
    }

    impl Recorder {
        fn new(branching: usize) -> Self {
            Self {
                branching,
                events: Vec::new(),
                evaluate_after_first_child: None,
            }
        }
    }

    impl SearchHooks<u32> for Recorder {
        fn pre_visit(
            &mut self,
            tree: &mut SearchTree<u32>,
            node: NodeId,
            remaining_depth: u32,
            kind: NodeKind,
        ) -> CheckersResult<()> {
            self.events
                .push(format!("pre {} {remaining_depth} {kind:?}", tree.node(node).state()));
            Ok(())
        }

        fn expand(
            &mut self,
            tree: &mut SearchTree<u32>,
            node: NodeId,
            _kind: NodeKind,
        ) -> CheckersResult<Vec<NodeId>> {
            let base = *tree.node(node).state() * 10;
            Ok((1..=self.branching as u32)
                .map(|i| tree.spawn(node, base + i))
                .collect())
        }

        fn post_visit(
            &mut self,
            tree: &mut SearchTree<u32>,
            node: NodeId,
            _remaining_depth: u32,
            kind: NodeKind,
        ) -> CheckersResult<()> {
            self.events.push(format!("post {} {kind:?}", tree.node(node).state()));
            if let Some(parent) = tree.node(node).parent() {
                if Some(parent) == self.evaluate_after_first_child {
                    tree.node_mut(parent).mark_evaluated();
                }
            }
            Ok(())
        }
    }

    #[test]
    fn visits_in_post_order() {
        let mut hooks = Recorder::new(2);
        let mut tree = SearchTree::new(1);
        let stats = depth_first_search(&mut hooks, &mut tree, 2).expect("search runs");

        assert_eq!(
            hooks.events,
            vec![
                "pre 1 2 Start",
                "pre 11 1 Transition",
                "pre 111 0 Leaf",
                "post 111 Leaf",
                "pre 112 0 Leaf",
                "post 112 Leaf",
                "post 11 Transition",
                "pre 12 1 Transition",
                "pre 121 0 Leaf",
                "post 121 Leaf",
                "pre 122 0 Leaf",
                "post 122 Leaf",
                "post 12 Transition",
                "post 1 Start",
            ]
        );
        assert_eq!(stats.nodes_visited, 7);
        assert_eq!(stats.expansions, 3);
        assert_eq!(stats.leaves, 4);
    }

    #[test]
    fn childless_node_is_post_visited_as_leaf() {
        let mut hooks = Recorder::new(0);
        let mut tree = SearchTree::new(1);
        depth_first_search(&mut hooks, &mut tree, 3).expect("search runs");
        assert_eq!(hooks.events, vec!["pre 1 3 Start", "post 1 Leaf"]);
    }

    #[test]
    fn evaluated_node_skips_remaining_children() {
        let mut hooks = Recorder::new(3);
        let mut tree = SearchTree::new(1);
        hooks.evaluate_after_first_child = Some(tree.root());

        let stats = depth_first_search(&mut hooks, &mut tree, 1).expect("search runs");
        assert_eq!(tree.children(tree.root()).len(), 1);
        assert_eq!(stats.skipped_children, 2);
        assert_eq!(hooks.events.last().map(String::as_str), Some("post 1 Start"));
    }

    #[test]
    fn recursive_and_stack_traversals_agree() {
        for branching in 0..4 {
            for depth in 1..4 {
                let mut stack_hooks = Recorder::new(branching);
                let mut stack_tree = SearchTree::new(1);
                let stack_stats =
                    depth_first_search(&mut stack_hooks, &mut stack_tree, depth).expect("search runs");

                let mut rec_hooks = Recorder::new(branching);
                let mut rec_tree = SearchTree::new(1);
                let rec_stats = recursive_depth_first_search(&mut rec_hooks, &mut rec_tree, depth)
                    .expect("search runs");

                assert_eq!(stack_hooks.events, rec_hooks.events);
                assert_eq!(stack_stats, rec_stats);
                assert_eq!(stack_tree.len(), rec_tree.len());
            }
        }
    }

    #[test]
    fn zero_depth_is_rejected() {
        let mut hooks = Recorder::new(2);
        let mut tree = SearchTree::new(1);
        assert_eq!(
            depth_first_search(&mut hooks, &mut tree, 0),
            Err(CheckersError::InvalidDepthLimit(0))
        );
        assert_eq!(
            recursive_depth_first_search(&mut hooks, &mut tree, 0),
            Err(CheckersError::InvalidDepthLimit(0))
        );
    }
}
