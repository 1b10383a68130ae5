//! Statements that can never run because every path through whatever
//! precedes them in the same block always exits first.
//!
//! Reports only the first unreachable statement per block: once one is
//! flagged, the rest of the block is unreachable for the same reason and
//! repeating the diagnostic would just be noise.

use crate::context::CheckerContext;
use crate::flow_shape::statement_falls_through;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule};
use pyrite_parser::{Node, NodeIndex};

pub(crate) fn check(ctx: &CheckerContext, out: &mut Vec<Diagnostic>) {
    if let Node::Module { body } = ctx.arena.get(ctx.root) {
        check_block(ctx, body, out);
    }
}

fn check_block(ctx: &CheckerContext, statements: &[NodeIndex], out: &mut Vec<Diagnostic>) {
    let mut unreachable = false;
    for &stmt in statements {
        if unreachable {
            if let Some(diag) = ctx.report(ctx.arena.span(stmt), DiagnosticRule::Unreachable, "this code is unreachable") {
                out.push(diag);
            }
            return;
        }
        if !statement_falls_through(ctx.arena, stmt) {
            unreachable = true;
        }
        recurse_into(ctx, stmt, out);
    }
}

fn recurse_into(ctx: &CheckerContext, stmt: NodeIndex, out: &mut Vec<Diagnostic>) {
    match ctx.arena.get(stmt) {
        Node::FunctionDef { body, .. } | Node::ClassDef { body, .. } => check_block(ctx, body, out),
        Node::If { body, or_else, .. } | Node::While { body, or_else, .. } | Node::For { body, or_else, .. } => {
            check_block(ctx, body, out);
            check_block(ctx, or_else, out);
        }
        Node::With { body, .. } => check_block(ctx, body, out),
        Node::Try { body, handlers, or_else, finally, .. } => {
            check_block(ctx, body, out);
            for handler in handlers {
                check_block(ctx, &handler.body, out);
            }
            check_block(ctx, or_else, out);
            check_block(ctx, finally, out);
        }
        Node::Match { cases, .. } => {
            for case in cases {
                check_block(ctx, &case.body, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "../../tests/unreachable_tests.rs"]
mod tests;
