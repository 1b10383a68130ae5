//! Control-flow graph nodes.
//!
//! One flow node per program point that can affect narrowing, linked
//! backwards through `antecedents` — the same backwards-antecedent shape
//! the teacher binder's flow arena uses, since narrowing only ever walks
//! from a use back to its governing assignments/branches, never forward.

use pyrite_parser::NodeIndex;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FlowNodeId(u32);

impl FlowNodeId {
    pub const NONE: Self = Self(u32::MAX);

    #[must_use]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }

    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct FlowFlags: u16 {
        const START = 1 << 0;
        const ASSIGNMENT = 1 << 1;
        const BRANCH_LABEL = 1 << 2;
        const LOOP_LABEL = 1 << 3;
        const CONDITION_TRUE = 1 << 4;
        const CONDITION_FALSE = 1 << 5;
        const POST_FINALLY = 1 << 6;
        /// A call whose callee might be declared to return `NoReturn`; the
        /// checker resolves whether everything downstream is unreachable
        /// once the callee's type is known.
        const CALL = 1 << 7;
        const WILDCARD_IMPORT = 1 << 8;
        const UNREACHABLE = 1 << 9;
    }
}

/// One node of a function or module's flow graph. `node` points back at the
/// parse-tree node this flow point corresponds to: the assignment target,
/// the tested condition, the call expression. Nodes with no natural parse
/// anchor (a loop's back-edge label, a merge after an if/else) carry `None`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FlowNode {
    pub flags: FlowFlags,
    pub node: Option<NodeIndex>,
    pub antecedents: SmallVec<[FlowNodeId; 2]>,
}

#[derive(Default, Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FlowNodeArena {
    nodes: Vec<FlowNode>,
}

impl FlowNodeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, flags: FlowFlags) -> FlowNodeId {
        let id = FlowNodeId(u32::try_from(self.nodes.len()).expect("flow graph exceeds u32 node capacity"));
        self.nodes.push(FlowNode { flags, node: None, antecedents: SmallVec::new() });
        id
    }

    #[must_use]
    pub fn get(&self, id: FlowNodeId) -> Option<&FlowNode> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: FlowNodeId) -> Option<&mut FlowNode> {
        self.nodes.get_mut(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/flow_tests.rs"]
mod tests;
