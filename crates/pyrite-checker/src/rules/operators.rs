//! A binary operator used on two operands whose builtin scalar types
//! don't support it (`1 + "a"`, `"a" // 2`, ...).
//!
//! Unlike the other rules in this module, which only need "every
//! function"/"every class," this one needs "every expression anywhere in
//! the tree," so it walks via `Node::children()` from the root rather
//! than `walk::for_each_def`.

use crate::context::CheckerContext;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule};
use pyrite_parser::{Node, NodeIndex};
use pyrite_solver::{binary_op_outcome, OperatorOutcome, TypeData, TypeId};

pub(crate) fn check(ctx: &CheckerContext, out: &mut Vec<Diagnostic>) {
    walk(ctx, ctx.root, out);
}

fn walk(ctx: &CheckerContext, node: NodeIndex, out: &mut Vec<Diagnostic>) {
    if let Node::BinOpExpr { left, op, right } = ctx.arena.get(node) {
        let left_type = ctx.evaluator.get_type(*left);
        let right_type = ctx.evaluator.get_type(*right);
        if binary_op_outcome(ctx.interner, *op, left_type, right_type) == OperatorOutcome::Unsupported {
            let left_name = scalar_class_name(ctx, left_type);
            let right_name = scalar_class_name(ctx, right_type);
            let symbol = operator_symbol(*op);
            if let Some(diag) = ctx.report(ctx.arena.span(node), DiagnosticRule::OperatorIssue, format!("Operator '{symbol}' not supported for types '{left_name}' and '{right_name}'")) {
                out.push(diag);
            }
        }
    }

    for child in ctx.arena.get(node).children() {
        walk(ctx, child, out);
    }
}

/// `binary_op_outcome` only returns `Unsupported` when both operands
/// already resolved to a builtin scalar `ClassInstance`, so this always
/// has a name to report; `"<unknown>"` is unreachable in practice.
fn scalar_class_name(ctx: &CheckerContext, ty: TypeId) -> String {
    match ctx.interner.lookup(ty) {
        Some(TypeData::ClassInstance(class_id, _)) => ctx.interner.lookup_class(class_id).name,
        _ => "<unknown>".to_string(),
    }
}

fn operator_symbol(op: pyrite_parser::node::BinaryOp) -> &'static str {
    use pyrite_parser::node::BinaryOp;
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::FloorDiv => "//",
        BinaryOp::Mod => "%",
        BinaryOp::Pow => "**",
        BinaryOp::MatMul => "@",
        BinaryOp::BitAnd => "&",
        BinaryOp::BitOr => "|",
        BinaryOp::BitXor => "^",
        BinaryOp::LShift => "<<",
        BinaryOp::RShift => ">>",
    }
}

#[cfg(test)]
#[path = "../../tests/operators_tests.rs"]
mod tests;
