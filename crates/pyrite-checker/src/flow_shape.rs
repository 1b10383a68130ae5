//! Structural fall-through analysis: does control reach the end of a
//! statement or block, or does every path through it exit via `return`,
//! `raise`, `break`, or `continue`?
//!
//! This is a syntactic approximation, not a query against the binder's
//! flow graph — the flow graph already collapses everything past an exit
//! statement onto one shared unreachable node, with no per-statement
//! record of *which* statement was unreachable, so there is nothing there
//! for a diagnostic to point at. Walking the tree directly gives each
//! rule exact spans to report.

use pyrite_parser::{Node, NodeArena, NodeIndex};

/// True iff every statement in `statements` falls through, i.e. control
/// can reach the position right after the block.
pub(crate) fn block_falls_through(arena: &NodeArena, statements: &[NodeIndex]) -> bool {
    statements.iter().all(|&stmt| statement_falls_through(arena, stmt))
}

/// True iff control can reach the position right after `stmt`.
pub(crate) fn statement_falls_through(arena: &NodeArena, stmt: NodeIndex) -> bool {
    match arena.get(stmt) {
        Node::Return { .. } | Node::Raise { .. } | Node::Break | Node::Continue => false,
        Node::If { body, or_else, .. } => {
            if or_else.is_empty() {
                true
            } else {
                block_falls_through(arena, body) || block_falls_through(arena, or_else)
            }
        }
        Node::While { test, body, .. } => while_falls_through(arena, *test, body),
        Node::For { .. } => true,
        Node::Try { body, handlers, or_else, finally, .. } => try_falls_through(arena, body, handlers, or_else, finally),
        Node::With { body, .. } => block_falls_through(arena, body),
        Node::Match { cases, .. } => match_falls_through(arena, cases),
        _ => true,
    }
}

/// A `while` loop falls through unless its condition is the literal `True`
/// and no reachable `break` escapes it — an endless loop with no exit.
/// Doesn't recognize other always-true spellings (`while 1:`): that would
/// need constant folding this pass doesn't do.
fn while_falls_through(arena: &NodeArena, test: NodeIndex, body: &[NodeIndex]) -> bool {
    if is_literally_true(arena, test) && !contains_break(arena, body) {
        return false;
    }
    true
}

fn is_literally_true(arena: &NodeArena, node: NodeIndex) -> bool {
    matches!(arena.get(node), Node::BoolLiteral(true))
}

fn try_falls_through(arena: &NodeArena, body: &[NodeIndex], handlers: &[pyrite_parser::node::ExceptHandler], or_else: &[NodeIndex], finally: &[NodeIndex]) -> bool {
    if !finally.is_empty() && !block_falls_through(arena, finally) {
        return false;
    }
    let normal_falls = if or_else.is_empty() { block_falls_through(arena, body) } else { block_falls_through(arena, body) && block_falls_through(arena, or_else) };
    normal_falls || handlers.iter().any(|h| block_falls_through(arena, &h.body))
}

/// A `match` falls through unless some case pattern always matches (a bare
/// capture with no guard) and every case body itself doesn't fall through.
fn match_falls_through(arena: &NodeArena, cases: &[pyrite_parser::node::MatchCase]) -> bool {
    let has_catchall = cases.iter().any(|c| c.guard.is_none() && matches!(arena.get(c.pattern), Node::PatternCapture { .. }));
    if !has_catchall {
        return true;
    }
    cases.iter().any(|c| block_falls_through(arena, &c.body))
}

/// True if a `break` targeting this loop occurs anywhere in `statements`,
/// without crossing into a nested loop, function, or class — a `break`
/// inside those belongs to them, not to the loop being asked about.
pub(crate) fn contains_break(arena: &NodeArena, statements: &[NodeIndex]) -> bool {
    statements.iter().any(|&stmt| statement_contains_break(arena, stmt))
}

fn statement_contains_break(arena: &NodeArena, stmt: NodeIndex) -> bool {
    match arena.get(stmt) {
        Node::Break => true,
        Node::If { body, or_else, .. } => contains_break(arena, body) || contains_break(arena, or_else),
        Node::Try { body, handlers, or_else, finally, .. } => {
            contains_break(arena, body) || handlers.iter().any(|h| contains_break(arena, &h.body)) || contains_break(arena, or_else) || contains_break(arena, finally)
        }
        Node::With { body, .. } => contains_break(arena, body),
        Node::Match { cases, .. } => cases.iter().any(|c| contains_break(arena, &c.body)),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/flow_shape_tests.rs"]
mod tests;
