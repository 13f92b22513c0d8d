//! Search-tree nodes stored in a per-search arena.
//!
//! Nodes are addressed by `NodeId` and never removed while the tree lives.
//! A node is created with its parent link when its parent is expanded; it is
//! only added to the parent's `children` once it has been fully visited.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a search.
    Start,
    /// Interior node with remaining depth budget.
    Transition,
    /// Budget exhausted; never expanded.
    Leaf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Node<S> {
    state: S,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: u32,
    score: i32,
    evaluated: bool,
    best_child_score: Option<i32>,
}

impl<S> Node<S> {
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Distance from the root in plies.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Negmax score from the perspective of the player who moved into this node.
    #[inline]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[inline]
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    /// Set once no further children of this node need visiting.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    #[inline]
    pub fn mark_evaluated(&mut self) {
        self.evaluated = true;
    }

    /// Highest score among the children visited so far.
    #[inline]
    pub fn best_child_score(&self) -> Option<i32> {
        self.best_child_score
    }

    pub fn raise_best_child_score(&mut self, score: i32) {
        if self.best_child_score.map_or(true, |best| score > best) {
            self.best_child_score = Some(score);
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchTree<S> {
    nodes: Vec<Node<S>>,
}

impl<S> SearchTree<S> {
    pub fn new(root: S) -> Self {
        Self {
            nodes: vec![Node {
                state: root,
                parent: None,
                children: Vec::new(),
                depth: 0,
                score: 0,
                evaluated: false,
                best_child_score: None,
            }],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.0]
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Creates a node below `parent` without attaching it as a child yet.
    pub fn spawn(&mut self, parent: NodeId, state: S) -> NodeId {
        let depth = self.nodes[parent.0].depth + 1;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            state,
            parent: Some(parent),
            children: Vec::new(),
            depth,
            score: 0,
            evaluated: false,
            best_child_score: None,
        });
        id
    }

    /// Records a visited child. The parent's evaluated flag is left untouched,
    /// so a pruning decision made while visiting the child persists.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    /// Children of `id` ordered by descending score; ties keep visit order.
    pub fn ranked_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut ranked = self.children(id).to_vec();
        ranked.sort_by_key(|&child| std::cmp::Reverse(self.node(child).score()));
        ranked
    }
}
