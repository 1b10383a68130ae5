//! The parse tree arena.
//!
//! Nodes live in one flat `Vec`, addressed by [`NodeIndex`] rather than
//! owned by their parent. A recursive-descent parser that backtracks
//! (speculative parsing of an ambiguous prefix) can discard a sub-tree by
//! just not linking its indices anywhere, without juggling ownership.
//!
//! Parent pointers are *not* a field on `Node` — they're a side table built
//! once, after parsing finishes, by [`NodeArena::build_parent_table`].
//! Nothing before that call needs an expr's parent, and computing it eagerly
//! during parsing would mean threading it through every recursive-descent
//! call.

use crate::node::Node;
use pyrite_common::span::Span;

/// An index into a [`NodeArena`]. `u32` rather than `usize` keeps every
/// `Node` variant's child lists compact; real source files do not approach
/// four billion nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct NodeIndex(u32);

impl NodeIndex {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct NodeSlot {
    node: Node,
    span: Span,
}

/// Owns every node of one file's parse tree.
#[derive(Default, Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct NodeArena {
    nodes: Vec<NodeSlot>,
    parents: Vec<Option<NodeIndex>>,
}

impl NodeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, node: Node, span: Span) -> NodeIndex {
        let index = NodeIndex(u32::try_from(self.nodes.len()).expect("parse tree exceeds u32 node capacity"));
        self.nodes.push(NodeSlot { node, span });
        index
    }

    #[must_use]
    pub fn get(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.index()].node
    }

    #[must_use]
    pub fn span(&self, index: NodeIndex) -> Span {
        self.nodes[index.index()].span
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk every node's children and record its parent. Run once, right
    /// after the module finishes parsing.
    pub fn build_parent_table(&mut self, root: NodeIndex) {
        self.parents.clear();
        self.parents.resize(self.nodes.len(), None);
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            for child in self.get(current).children() {
                self.parents[child.index()] = Some(current);
                stack.push(child);
            }
        }
    }

    #[must_use]
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.parents.get(index.index()).copied().flatten()
    }

    /// Walk from `index` up through `parent` links to the module root.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let mut current = Some(index);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.parent(next);
            Some(next)
        })
    }
}

#[cfg(test)]
#[path = "../tests/arena_tests.rs"]
mod tests;
