//! A function declares a return type that requires a value, but has a
//! path that reaches the end of its body without one.
//!
//! Narrowed to functions that clearly mean to return something: a stub
//! with no `return` at all (an abstract method, a `Protocol` method, a
//! body that's just `...`) never trips this, and neither does a
//! generator, whose "return" is exhaustion rather than a `return`
//! statement. Generator detection is a shallow scan of the function's own
//! body for `yield`/`yield from` — it doesn't look inside nested
//! expressions, so a `yield` buried inside a call argument or comprehension
//! won't be found; that's rare enough in practice not to be worth a full
//! expression walker here.

use crate::context::CheckerContext;
use crate::flow_shape::block_falls_through;
use crate::walk;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule};
use pyrite_parser::{Node, NodeArena, NodeIndex};
use pyrite_solver::TypeId;
use pyrite_solver::TypeData;

pub(crate) fn check(ctx: &CheckerContext, out: &mut Vec<Diagnostic>) {
    let mut on_function = |node: NodeIndex| check_function(ctx, node, out);
    let mut ignore_class = |_: NodeIndex| {};
    walk::for_each_def(ctx.arena, ctx.root, &mut on_function, &mut ignore_class);
}

fn check_function(ctx: &CheckerContext, node: NodeIndex, out: &mut Vec<Diagnostic>) {
    let Node::FunctionDef { body, returns, .. } = ctx.arena.get(node) else { return };
    let Some(returns_node) = *returns else { return };

    if walk::any_nested_statement(ctx.arena, body, &is_yield_statement) {
        return;
    }
    if !walk::any_nested_statement(ctx.arena, body, &is_return_with_value) {
        return;
    }
    if !block_falls_through(ctx.arena, body) {
        return;
    }

    let return_type = ctx.evaluator.eval_annotation(returns_node);
    if !requires_a_value(ctx, return_type) {
        return;
    }

    if let Some(diag) = ctx.report(ctx.arena.span(returns_node), DiagnosticRule::ReturnType, "function can fall off the end without returning a value on every path") {
        out.push(diag);
    }
}

fn requires_a_value(ctx: &CheckerContext, return_type: TypeId) -> bool {
    if matches!(return_type, TypeId::NONE | TypeId::ANY | TypeId::UNKNOWN | TypeId::NEVER) {
        return false;
    }
    if let Some(TypeData::Union(members)) = ctx.interner.lookup(return_type) {
        return !members.contains(&TypeId::NONE);
    }
    true
}

fn is_return_with_value(arena: &NodeArena, stmt: NodeIndex) -> bool {
    matches!(arena.get(stmt), Node::Return { value: Some(_) })
}

fn is_yield_statement(arena: &NodeArena, stmt: NodeIndex) -> bool {
    let value = match arena.get(stmt) {
        Node::ExprStatement { value } | Node::Return { value: Some(value) } | Node::Assign { value, .. } | Node::AugAssign { value, .. } => *value,
        Node::AnnAssign { value: Some(value), .. } => *value,
        _ => return false,
    };
    matches!(arena.get(value), Node::Yield { .. } | Node::YieldFrom { .. })
}

#[cfg(test)]
#[path = "../../tests/returns_tests.rs"]
mod tests;
