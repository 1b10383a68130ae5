//! A class whose bases have no consistent C3 linearization (e.g.
//! `class C(A, B)` where `A` and `B` disagree on a shared ancestor's
//! relative order). The evaluator already falls back to `[self, object]`
//! for such a class so the rest of type checking can proceed; this rule
//! is just what surfaces that fallback as a diagnostic.

use crate::context::CheckerContext;
use crate::walk;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule};
use pyrite_parser::{Node, NodeIndex};

pub(crate) fn check(ctx: &CheckerContext, out: &mut Vec<Diagnostic>) {
    let mut ignore_function = |_: NodeIndex| {};
    let mut on_class = |class_node: NodeIndex| check_class(ctx, class_node, out);
    walk::for_each_def(ctx.arena, ctx.root, &mut ignore_function, &mut on_class);
}

fn check_class(ctx: &CheckerContext, class_node: NodeIndex, out: &mut Vec<Diagnostic>) {
    let Node::ClassDef { name, .. } = ctx.arena.get(class_node) else { return };
    ctx.evaluator.get_type(class_node);
    if !ctx.evaluator.has_mro_error(class_node) {
        return;
    }
    if let Some(diag) = ctx.report(ctx.arena.span(class_node), DiagnosticRule::GeneralTypeIssues, format!("cannot create a consistent method resolution order for bases of \"{name}\"")) {
        out.push(diag);
    }
}

#[cfg(test)]
#[path = "../../tests/mro_tests.rs"]
mod tests;
