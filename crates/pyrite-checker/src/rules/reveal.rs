//! `reveal_type(expr)` and `reveal_locals()` are not real functions; Pyright
//! recognizes the bare names as pseudo-builtins and turns a call to either
//! one into an informational diagnostic describing what the checker
//! currently believes, rather than treating it as an ordinary (and
//! undefined) call. Severity is always `Information`, independent of
//! `typeCheckingMode` or any `reportX` override, so this reports directly
//! through `Diagnostic::new` instead of `CheckerContext::report`.

use crate::context::CheckerContext;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule, Severity};
use pyrite_parser::{Node, NodeIndex};
use pyrite_solver::render_type_name;

pub(crate) fn check(ctx: &CheckerContext, out: &mut Vec<Diagnostic>) {
    walk(ctx, ctx.root, out);
}

fn walk(ctx: &CheckerContext, node: NodeIndex, out: &mut Vec<Diagnostic>) {
    if let Node::Call { func, args, .. } = ctx.arena.get(node) {
        if let Node::Name { id } = ctx.arena.get(*func) {
            match (id.as_str(), args.as_slice()) {
                ("reveal_type", [target]) => out.push(reveal_type_diagnostic(ctx, node, *target)),
                ("reveal_locals", []) => {
                    if let Some(diag) = reveal_locals_diagnostic(ctx, node) {
                        out.push(diag);
                    }
                }
                _ => {}
            }
        }
    }

    for child in ctx.arena.get(node).children() {
        walk(ctx, child, out);
    }
}

fn reveal_type_diagnostic(ctx: &CheckerContext, call_node: NodeIndex, target: NodeIndex) -> Diagnostic {
    let ty = ctx.evaluator.get_type(target);
    let name = render_type_name(ctx.interner, ty);
    Diagnostic::new(ctx.file.to_string(), ctx.arena.span(call_node), Severity::Information, DiagnosticRule::RevealType, format!("Type is '{name}'"))
}

fn reveal_locals_diagnostic(ctx: &CheckerContext, call_node: NodeIndex) -> Option<Diagnostic> {
    let scope_id = ctx.arena.ancestors(call_node).find_map(|ancestor| ctx.bind.node_scopes.get(&ancestor).copied())?;
    let scope = ctx.bind.scopes.get(scope_id)?;

    let mut locals: Vec<(String, String)> = scope
        .table
        .iter()
        .map(|(name, &symbol_id)| (name.clone(), render_type_name(ctx.interner, ctx.evaluator.declared_type_of(symbol_id))))
        .collect();
    if locals.is_empty() {
        return None;
    }
    locals.sort();

    let body = locals.iter().map(|(name, ty)| format!("{name}: {ty}")).collect::<Vec<_>>().join(", ");
    Some(Diagnostic::new(ctx.file.to_string(), ctx.arena.span(call_node), Severity::Information, DiagnosticRule::RevealType, format!("Locals: {body}")))
}

#[cfg(test)]
#[path = "../../tests/reveal_tests.rs"]
mod tests;
