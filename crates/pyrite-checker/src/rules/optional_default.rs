//! A parameter default that isn't assignable to its own annotation —
//! overwhelmingly a bare `None` default against a non-Optional
//! annotation, PEP 484's "implicit Optional" footgun. Unlike a checker
//! that widens the annotation to `Optional[...]` for the rest of the
//! function, this one takes the annotation at face value and reports the
//! mismatch instead.

use crate::context::CheckerContext;
use crate::walk;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule};
use pyrite_parser::{Node, NodeIndex};
use pyrite_solver::is_assignable;

pub(crate) fn check(ctx: &CheckerContext, out: &mut Vec<Diagnostic>) {
    let mut on_function = |node: NodeIndex| check_function(ctx, node, out);
    let mut ignore_class = |_: NodeIndex| {};
    walk::for_each_def(ctx.arena, ctx.root, &mut on_function, &mut ignore_class);
}

fn check_function(ctx: &CheckerContext, node: NodeIndex, out: &mut Vec<Diagnostic>) {
    let Node::FunctionDef { params, .. } = ctx.arena.get(node) else { return };
    for param in params {
        let (Some(annotation), Some(default)) = (param.annotation, param.default) else { continue };
        let declared = ctx.evaluator.eval_annotation(annotation);
        let default_type = ctx.evaluator.get_type(default);
        if is_assignable(ctx.interner, declared, default_type) {
            continue;
        }
        if let Some(diag) = ctx.report(param.span, DiagnosticRule::AssignmentType, format!("default value is not assignable to parameter \"{}\"", param.name)) {
            out.push(diag);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/optional_default_tests.rs"]
mod tests;
