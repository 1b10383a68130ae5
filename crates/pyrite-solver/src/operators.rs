//! Builtin binary-operator result types, used both to answer `getType`
//! for a `BinOpExpr` and to let the checker's operator rule flag a
//! combination this crate doesn't recognize.
//!
//! Grounded on CPython's numeric tower (`bool < int < float < complex`,
//! each operator promoting to the wider operand) and `str`/`bytes`
//! concatenation/repetition; this crate carries no typeshed-equivalent
//! stub corpus with `__add__`/`__radd__` dunder signatures to dispatch
//! through, so user-defined classes are out of scope here entirely —
//! only when both operands already resolve to one of these builtin
//! scalar classes does this module have an opinion.

use crate::intern::{TypeId, TypeInterner};
use crate::types::TypeData;
use pyrite_parser::node::BinaryOp;

const NUMERIC_TOWER: [&str; 4] = ["bool", "int", "float", "complex"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorOutcome {
    /// The operator is supported for these operands; callers that need a
    /// type should use this one.
    Supported(TypeId),
    /// Both operands resolved to a recognized builtin scalar class and
    /// the combination isn't one CPython supports.
    Unsupported,
    /// At least one operand isn't a builtin scalar class (a user class,
    /// `Unknown`, `Any`, a union, ...) — this module has no opinion.
    Indeterminate,
}

#[must_use]
pub fn binary_op_outcome(interner: &TypeInterner, op: BinaryOp, left: TypeId, right: TypeId) -> OperatorOutcome {
    if left == TypeId::ANY || left == TypeId::UNKNOWN || right == TypeId::ANY || right == TypeId::UNKNOWN {
        return OperatorOutcome::Indeterminate;
    }
    let (Some(left_name), Some(right_name)) = (scalar_class_name(interner, left), scalar_class_name(interner, right)) else {
        return OperatorOutcome::Indeterminate;
    };

    match result_side(op, &left_name, &right_name) {
        Some(Side::Left) => OperatorOutcome::Supported(left),
        Some(Side::Right) => OperatorOutcome::Supported(right),
        None => OperatorOutcome::Unsupported,
    }
}

fn scalar_class_name(interner: &TypeInterner, id: TypeId) -> Option<String> {
    match interner.lookup(id)? {
        TypeData::ClassInstance(class_id, _) => Some(interner.lookup_class(class_id).name),
        _ => None,
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

fn result_side(op: BinaryOp, left: &str, right: &str) -> Option<Side> {
    let numeric_rank = |name: &str| NUMERIC_TOWER.iter().position(|&candidate| candidate == name);
    let wider = |l: usize, r: usize| if l >= r { Side::Left } else { Side::Right };

    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Pow | BinaryOp::Div => {
            if let (Some(l), Some(r)) = (numeric_rank(left), numeric_rank(right)) {
                return Some(wider(l, r));
            }
            match op {
                BinaryOp::Add if left == right && matches!(left, "str" | "bytes") => Some(Side::Left),
                BinaryOp::Mul if matches!(left, "str" | "bytes") && right == "int" => Some(Side::Left),
                BinaryOp::Mul if left == "int" && matches!(right, "str" | "bytes") => Some(Side::Right),
                _ => None,
            }
        }
        // complex doesn't support `%`/`//` in CPython.
        BinaryOp::Mod | BinaryOp::FloorDiv => {
            let non_complex_rank = |name: &str| (name != "complex").then(|| numeric_rank(name)).flatten();
            let l = non_complex_rank(left)?;
            let r = non_complex_rank(right)?;
            Some(wider(l, r))
        }
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor | BinaryOp::LShift | BinaryOp::RShift => {
            let integral = |name: &str| matches!(name, "bool" | "int");
            (integral(left) && integral(right)).then_some(Side::Left)
        }
        BinaryOp::MatMul => None,
    }
}

#[cfg(test)]
#[path = "../tests/operators_tests.rs"]
mod tests;
