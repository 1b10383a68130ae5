//! A subclass method whose signature isn't compatible with a same-named
//! method on one of its (locally defined) base classes.
//!
//! This only checks a derived class directly against its own written
//! bases, one level up — not the full MRO `ClassData::mro` now carries —
//! since overriding a method two levels up while a class in between also
//! overrides it is a comparison against *that* intermediate class, not
//! the original ancestor, and a direct-bases walk already gets that for
//! free by running once per subclass in the hierarchy. Base expressions
//! are resolved structurally (only bare names that resolve to another
//! `ClassDef` in the same file; imported bases are out of reach).
//! Properties, `staticmethod`/`classmethod`/`overload`-decorated methods
//! are skipped: their override rules differ from a plain method's and
//! aren't worth the extra cases here.

use crate::context::CheckerContext;
use crate::walk;
use pyrite_binder::Declaration;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule};
use pyrite_parser::{Node, NodeIndex};
use pyrite_solver::{is_assignable, FunctionSig, TypeData};
use rustc_hash::FxHashMap;

pub(crate) fn check(ctx: &CheckerContext, out: &mut Vec<Diagnostic>) {
    let mut ignore_function = |_: NodeIndex| {};
    let mut on_class = |class_node: NodeIndex| check_class(ctx, class_node, out);
    walk::for_each_def(ctx.arena, ctx.root, &mut ignore_function, &mut on_class);
}

fn check_class(ctx: &CheckerContext, class_node: NodeIndex, out: &mut Vec<Diagnostic>) {
    let Node::ClassDef { bases, body, .. } = ctx.arena.get(class_node) else { return };
    let derived_methods = direct_methods(ctx.arena, body);

    for &base_expr in bases {
        let Some(base_node) = resolve_class_node(ctx, base_expr) else { continue };
        let Node::ClassDef { body: base_body, .. } = ctx.arena.get(base_node) else { continue };
        let base_methods = direct_methods(ctx.arena, base_body);

        for (name, &derived_node) in &derived_methods {
            let Some(&base_method_node) = base_methods.get(name) else { continue };
            check_override(ctx, name, derived_node, base_method_node, out);
        }
    }
}

fn resolve_class_node(ctx: &CheckerContext, base_expr: NodeIndex) -> Option<NodeIndex> {
    let symbol_id = *ctx.bind.node_symbols.get(&base_expr)?;
    let symbol = ctx.bind.symbols.get(symbol_id)?;
    symbol.declarations.iter().find_map(|d| match d {
        Declaration::Class { node, .. } => Some(*node),
        _ => None,
    })
}

fn direct_methods(arena: &pyrite_parser::NodeArena, class_body: &[NodeIndex]) -> FxHashMap<String, NodeIndex> {
    let mut methods = FxHashMap::default();
    for &stmt in class_body {
        if let Node::FunctionDef { name, decorators, .. } = arena.get(stmt) {
            if decorators.iter().any(|&d| is_exempt_decorator(arena, d)) {
                continue;
            }
            methods.insert(name.clone(), stmt);
        }
    }
    methods
}

fn is_exempt_decorator(arena: &pyrite_parser::NodeArena, node: NodeIndex) -> bool {
    let name = match arena.get(node) {
        Node::Name { id } => id.as_str(),
        Node::Attribute { attr, .. } => attr.as_str(),
        Node::Call { func, .. } => return is_exempt_decorator(arena, *func),
        _ => return false,
    };
    matches!(name, "property" | "staticmethod" | "classmethod" | "overload" | "setter" | "getter" | "deleter")
}

fn check_override(ctx: &CheckerContext, name: &str, derived_node: NodeIndex, base_node: NodeIndex, out: &mut Vec<Diagnostic>) {
    let (Some(derived_sig), Some(base_sig)) = (function_sig(ctx, derived_node), function_sig(ctx, base_node)) else { return };

    let return_compatible = is_assignable(ctx.interner, base_sig.return_type, derived_sig.return_type);
    let params_compatible = derived_sig.parameters.len() == base_sig.parameters.len()
        && derived_sig
            .parameters
            .iter()
            .skip(1)
            .zip(base_sig.parameters.iter().skip(1))
            .all(|(derived_param, base_param)| is_assignable(ctx.interner, derived_param.annotated_type, base_param.annotated_type));

    if return_compatible && params_compatible {
        return;
    }
    if let Some(diag) = ctx.report(ctx.arena.span(derived_node), DiagnosticRule::IncompatibleMethodOverride, format!("\"{name}\" overrides a base class method incompatibly")) {
        out.push(diag.with_related(ctx.file.to_string(), ctx.arena.span(base_node), format!("base class declares \"{name}\" here")));
    }
}

fn function_sig(ctx: &CheckerContext, node: NodeIndex) -> Option<FunctionSig> {
    match ctx.interner.lookup(ctx.evaluator.get_type(node)) {
        Some(TypeData::Function(sig)) => Some(sig),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/overrides_tests.rs"]
mod tests;
