//! A class's `metaclass=` keyword that doesn't resolve to a class at all.
//!
//! There's no dedicated diagnostic rule for this in the catalog, so it
//! reports under the general-issues catch-all, same as a real checker
//! does for cases that don't warrant their own rule code. Detecting a
//! metaclass *conflict* among a class's bases (the other half of what a
//! full implementation would check) would need a populated
//! `ClassData::bases`/metaclass-propagation the solver doesn't build —
//! left out rather than faked.

use crate::context::CheckerContext;
use crate::walk;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule};
use pyrite_parser::{Node, NodeIndex};
use pyrite_solver::TypeData;

pub(crate) fn check(ctx: &CheckerContext, out: &mut Vec<Diagnostic>) {
    let mut on_class = |node: NodeIndex| check_class(ctx, node, out);
    let mut ignore_function = |_: NodeIndex| {};
    walk::for_each_def(ctx.arena, ctx.root, &mut ignore_function, &mut on_class);
}

fn check_class(ctx: &CheckerContext, node: NodeIndex, out: &mut Vec<Diagnostic>) {
    let Node::ClassDef { keywords, .. } = ctx.arena.get(node) else { return };
    let Some((_, metaclass_expr)) = keywords.iter().find(|(name, _)| name == "metaclass") else { return };

    let resolved = ctx.evaluator.get_type(*metaclass_expr);
    let is_class = matches!(ctx.interner.lookup(resolved), Some(TypeData::Class(_)));
    if is_class {
        return;
    }

    if let Some(diag) = ctx.report(ctx.arena.span(*metaclass_expr), DiagnosticRule::GeneralTypeIssues, "metaclass expression does not resolve to a class") {
        out.push(diag);
    }
}

#[cfg(test)]
#[path = "../../tests/metaclass_tests.rs"]
mod tests;
