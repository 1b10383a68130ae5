//! Local variables and parameters that are declared but never read.
//!
//! Scoped to function bodies only — module- and class-level names are
//! exempt, since those routinely exist for their side effects or as part
//! of the module's public surface rather than to be read locally, and
//! flagging them would be mostly noise. `self`, `cls`, and any name
//! starting with `_` are exempt too, the conventional "deliberately
//! unused" markers; this is a simplification next to a real checker's
//! dataflow-based unused-assignment analysis, not an attempt to match it.

use crate::context::CheckerContext;
use crate::walk;
use pyrite_binder::SymbolFlags;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule};
use pyrite_parser::{Node, NodeIndex};
use rustc_hash::FxHashSet;

pub(crate) fn check(ctx: &CheckerContext, out: &mut Vec<Diagnostic>) {
    let mut used = FxHashSet::default();
    for (&node, &symbol_id) in &ctx.bind.node_symbols {
        if !matches!(ctx.arena.get(node), Node::Name { .. }) {
            continue;
        }
        // `Binder::declare` records the declaration's own target node in
        // `node_symbols` too, so a bare `x = 1` would otherwise count as
        // its own use.
        let is_declaration_site = ctx.bind.symbols.get(symbol_id).is_some_and(|s| s.declarations.iter().any(|d| d.node() == node));
        if !is_declaration_site {
            used.insert(symbol_id);
        }
    }

    let mut on_function = |function_node: NodeIndex| check_function(ctx, function_node, &used, out);
    let mut ignore_class = |_: NodeIndex| {};
    walk::for_each_def(ctx.arena, ctx.root, &mut on_function, &mut ignore_class);
}

fn check_function(ctx: &CheckerContext, function_node: NodeIndex, used: &FxHashSet<pyrite_binder::SymbolId>, out: &mut Vec<Diagnostic>) {
    let Some(&scope_id) = ctx.bind.node_scopes.get(&function_node) else { return };
    let Some(scope) = ctx.bind.scopes.get(scope_id) else { return };

    for (name, &symbol_id) in scope.table.iter() {
        if name == "self" || name == "cls" || name.starts_with('_') {
            continue;
        }
        if used.contains(&symbol_id) {
            continue;
        }
        let Some(symbol) = ctx.bind.symbols.get(symbol_id) else { continue };
        if !symbol.flags.intersects(SymbolFlags::VARIABLE | SymbolFlags::PARAMETER) {
            continue;
        }
        let Some(declaration) = symbol.declarations.first() else { continue };
        let kind = if symbol.flags.contains(SymbolFlags::PARAMETER) { "parameter" } else { "variable" };
        if let Some(diag) = ctx.report(declaration.span(), DiagnosticRule::UnusedVariable, format!("{kind} \"{name}\" is not accessed")) {
            out.push(diag);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unused_tests.rs"]
mod tests;
