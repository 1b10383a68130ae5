//! Flow-node factory helpers.
//!
//! Split out of `binder.rs` the way the teacher binder keeps its flow-graph
//! construction in its own file: every statement/expression handler in
//! `binder.rs` builds its piece of the graph out of these few primitives
//! rather than pushing to `flow_nodes` directly.

use crate::binder::Binder;
use crate::flow::{FlowFlags, FlowNodeId};
use pyrite_parser::NodeIndex;

impl Binder<'_> {
    /// Record `antecedent` as a predecessor of `node`, skipping both an
    /// already-unreachable antecedent and a duplicate entry. Mirrors the
    /// teacher binder's `add_antecedent` dedup/unreachable-filtering.
    pub(crate) fn add_antecedent(&mut self, node: FlowNodeId, antecedent: FlowNodeId) {
        if antecedent.is_none() || antecedent == self.unreachable_flow {
            return;
        }
        if let Some(flow_node) = self.flow_nodes.get_mut(node) {
            if !flow_node.antecedents.contains(&antecedent) {
                flow_node.antecedents.push(antecedent);
            }
        }
    }

    /// A join point with (initially) no predecessors; callers add them via
    /// `add_antecedent` as each contributing branch finishes binding.
    pub(crate) fn create_branch_label(&mut self) -> FlowNodeId {
        self.flow_nodes.alloc(FlowFlags::BRANCH_LABEL)
    }

    /// The flow node a loop body starts from; its antecedents are the
    /// pre-loop flow and every continue/fall-through edge from the body.
    pub(crate) fn create_loop_label(&mut self) -> FlowNodeId {
        self.flow_nodes.alloc(FlowFlags::LOOP_LABEL)
    }

    /// One arm of a condition (`is_true` selects the truthy/falsy branch),
    /// anchored to the tested expression so narrowing can re-evaluate it.
    pub(crate) fn create_flow_condition(&mut self, is_true: bool, antecedent: FlowNodeId, condition: NodeIndex) -> FlowNodeId {
        if antecedent.is_none() {
            return antecedent;
        }
        let flags = if is_true { FlowFlags::CONDITION_TRUE } else { FlowFlags::CONDITION_FALSE };
        let id = self.flow_nodes.alloc(flags);
        if let Some(flow_node) = self.flow_nodes.get_mut(id) {
            flow_node.node = Some(condition);
        }
        self.add_antecedent(id, antecedent);
        id
    }

    /// A narrowing point for `target = ...`, anchored to the assignment
    /// target so the evaluator can read off the narrowed type there.
    pub(crate) fn create_flow_assignment(&mut self, antecedent: FlowNodeId, target: NodeIndex) -> FlowNodeId {
        let id = self.flow_nodes.alloc(FlowFlags::ASSIGNMENT);
        if let Some(flow_node) = self.flow_nodes.get_mut(id) {
            flow_node.node = Some(target);
        }
        self.add_antecedent(id, antecedent);
        id
    }

    /// A call expression that might be declared `NoReturn`; the checker
    /// resolves reachability past this point once it knows the callee's
    /// signature.
    pub(crate) fn create_flow_call(&mut self, antecedent: FlowNodeId, call: NodeIndex) -> FlowNodeId {
        let id = self.flow_nodes.alloc(FlowFlags::CALL);
        if let Some(flow_node) = self.flow_nodes.get_mut(id) {
            flow_node.node = Some(call);
        }
        self.add_antecedent(id, antecedent);
        id
    }

    /// `from x import *`: every name in scope from this point on might have
    /// been injected, so unresolved-name checks back off.
    pub(crate) fn create_flow_wildcard_import(&mut self, antecedent: FlowNodeId, import: NodeIndex) -> FlowNodeId {
        let id = self.flow_nodes.alloc(FlowFlags::WILDCARD_IMPORT);
        if let Some(flow_node) = self.flow_nodes.get_mut(id) {
            flow_node.node = Some(import);
        }
        self.add_antecedent(id, antecedent);
        id
    }

    /// The join after a `try`/`except`/`finally`: reachable from the end of
    /// the try body and from every handler, since an exception can surface
    /// after any partial execution of the body.
    pub(crate) fn create_post_finally(&mut self, antecedents: &[FlowNodeId]) -> FlowNodeId {
        let id = self.flow_nodes.alloc(FlowFlags::POST_FINALLY);
        for &antecedent in antecedents {
            self.add_antecedent(id, antecedent);
        }
        id
    }
}
