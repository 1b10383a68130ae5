//! Overload resolution: try signatures in source order, first full match
//! wins; report against the last signature when none match.
//!
//! Grounded on the teacher's overload-compatibility handling
//! (`tests/overload_compatibility_tests.rs`); Python's `@overload`
//! decorator has no return-type-driven disambiguation the way some
//! TypeScript overload call sites do, so this stays a pure
//! first-match-in-source-order walk with no scoring/ranking step.

use crate::assignability::is_assignable;
use crate::intern::{TypeId, TypeInterner};
use crate::types::{FunctionSig, ParameterKind};

#[derive(Debug, PartialEq, Eq)]
pub struct OverloadMismatch {
    /// Index into the overload list of the signature reported against —
    /// always the last one, per the spec's "report using the last
    /// overload's signature" rule.
    pub reported_against: usize,
}

/// Resolve a call's argument types against a set of overload signatures,
/// trying each in declaration order and returning the first fully
/// compatible one along with its index.
pub fn resolve<'a>(interner: &TypeInterner, overloads: &'a [FunctionSig], argument_types: &[TypeId]) -> Result<(usize, &'a FunctionSig), OverloadMismatch> {
    for (index, sig) in overloads.iter().enumerate() {
        if matches_call(interner, sig, argument_types) {
            return Ok((index, sig));
        }
    }
    Err(OverloadMismatch { reported_against: overloads.len().saturating_sub(1) })
}

fn matches_call(interner: &TypeInterner, sig: &FunctionSig, argument_types: &[TypeId]) -> bool {
    let max_positional = sig.parameters.iter().filter(|p| matches!(p.kind, ParameterKind::PositionalOnly | ParameterKind::PositionalOrKeyword)).count();
    let has_var_positional = sig.parameters.iter().any(|p| p.kind == ParameterKind::VarPositional);

    if argument_types.len() < sig.required_positional_count() {
        return false;
    }
    if argument_types.len() > max_positional && !has_var_positional {
        return false;
    }

    sig.parameters.iter().filter(|p| matches!(p.kind, ParameterKind::PositionalOnly | ParameterKind::PositionalOrKeyword)).zip(argument_types.iter()).all(|(param, arg)| is_assignable(interner, param.annotated_type, *arg))
}

/// The overload set's own type, used only when the declarations carry no
/// `@overload` markers at all — a plain union of every listed return type,
/// per the spec's "used only if `@overload` decorators are absent" rule.
#[must_use]
pub fn union_of_return_types(interner: &TypeInterner, overloads: &[FunctionSig]) -> TypeId {
    interner.union(overloads.iter().map(|sig| sig.return_type).collect())
}

#[cfg(test)]
#[path = "../tests/overloads_tests.rs"]
mod tests;
