//! `src` assignable to `dst`? Nominal for ordinary classes, structural for
//! `Protocol`-marked ones (PEP 544), with `Any`/`Unknown` absorbing
//! everything and `Never` assignable to everything.
//!
//! Grounded on the teacher's `assignability_checker.rs`/`query_boundaries/
//! assignability.rs` split between a fast nominal path and a slower
//! structural-member-walk path for interface-like types; Python only has
//! one structural marker (`Protocol`) rather than TypeScript's implicit
//! structural typing for every object type, so the structural path is
//! gated on `ClassData::is_protocol` instead of running unconditionally.

use crate::intern::{TypeId, TypeInterner};
use crate::mro::linearize;
use crate::types::{ClassId, TypeData};
#[cfg(test)]
use rustc_hash::FxHashMap;

#[derive(Debug, PartialEq, Eq)]
pub enum AssignabilityError {
    NotAssignable { dst: TypeId, src: TypeId },
    MissingProtocolMember { protocol: ClassId, member: String },
    IncompatibleMember { protocol: ClassId, member: String },
}

pub type AssignabilityResult = Result<(), Vec<AssignabilityError>>;

pub fn check_assignable(interner: &TypeInterner, dst: TypeId, src: TypeId) -> AssignabilityResult {
    if is_assignable(interner, dst, src) {
        Ok(())
    } else {
        Err(vec![AssignabilityError::NotAssignable { dst, src }])
    }
}

#[must_use]
pub fn is_assignable(interner: &TypeInterner, dst: TypeId, src: TypeId) -> bool {
    if dst == TypeId::ANY || dst == TypeId::UNKNOWN || src == TypeId::ANY || src == TypeId::UNKNOWN {
        return true;
    }
    if src == TypeId::NEVER {
        return true;
    }
    if dst == src {
        return true;
    }

    let (dst_data, src_data) = match (interner.lookup(dst), interner.lookup(src)) {
        (Some(d), Some(s)) => (d, s),
        _ => return false,
    };

    match (&dst_data, &src_data) {
        (TypeData::Union(members), _) => members.iter().any(|m| is_assignable(interner, *m, src)),
        (_, TypeData::Union(members)) => members.iter().all(|m| is_assignable(interner, dst, *m)),
        (TypeData::None, TypeData::None) => true,
        (TypeData::LiteralInstance(_, dst_class), TypeData::LiteralInstance(_, src_class)) => dst_class == src_class && src_data == dst_data,
        (TypeData::ClassInstance(dst_class, _), TypeData::LiteralInstance(_, src_class)) => class_is_assignable(interner, *dst_class, *src_class),
        (TypeData::ClassInstance(dst_class, dst_args), TypeData::ClassInstance(src_class, src_args)) => {
            if !class_is_assignable(interner, *dst_class, *src_class) {
                return false;
            }
            dst_args.len() == src_args.len() && dst_args.iter().zip(src_args.iter()).all(|(d, s)| is_assignable(interner, *d, *s))
        }
        (TypeData::Class(dst_class), TypeData::Class(src_class)) => class_is_assignable(interner, *dst_class, *src_class),
        (TypeData::Function(dst_sig), TypeData::Function(src_sig)) => function_is_assignable(interner, dst_sig, src_sig),
        (TypeData::Tuple(dst_elems, dst_var), TypeData::Tuple(src_elems, src_var)) => tuple_is_assignable(interner, dst_elems, *dst_var, src_elems, *src_var),
        (TypeData::Module(a), TypeData::Module(b)) => a == b,
        _ => false,
    }
}

fn class_is_assignable(interner: &TypeInterner, dst: ClassId, src: ClassId) -> bool {
    if dst == src {
        return true;
    }
    let dst_data = interner.lookup_class(dst);
    if dst_data.is_protocol {
        return protocol_is_satisfied(interner, dst, src);
    }
    mro_of(interner, src).contains(&dst)
}

fn mro_of(interner: &TypeInterner, class_id: ClassId) -> Vec<ClassId> {
    let data = interner.lookup_class(class_id);
    if !data.mro.is_empty() {
        return data.mro;
    }
    linearize(interner, class_id, &data.bases).unwrap_or_else(|_| vec![class_id])
}

/// `src` satisfies protocol `dst` iff every member `dst` declares exists on
/// `src` (walking `src`'s own MRO) with an assignable type.
fn protocol_is_satisfied(interner: &TypeInterner, protocol: ClassId, src: ClassId) -> bool {
    let protocol_data = interner.lookup_class(protocol);
    let src_mro = mro_of(interner, src);

    for (name, protocol_member) in &protocol_data.members {
        let found = src_mro.iter().find_map(|ancestor| interner.lookup_class(*ancestor).members.get(name).cloned());
        match found {
            Some(src_member) => {
                if !is_assignable(interner, protocol_member.declared_type, src_member.declared_type) {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

fn function_is_assignable(interner: &TypeInterner, dst: &crate::types::FunctionSig, src: &crate::types::FunctionSig) -> bool {
    // Parameters are contravariant, the return type is covariant.
    if dst.parameters.len() < src.required_positional_count() {
        return false;
    }
    for (d, s) in dst.parameters.iter().zip(src.parameters.iter()) {
        if !is_assignable(interner, s.annotated_type, d.annotated_type) {
            return false;
        }
    }
    is_assignable(interner, dst.return_type, src.return_type)
}

fn tuple_is_assignable(interner: &TypeInterner, dst: &crate::types::TypeVec, dst_var: crate::types::Variadicity, src: &crate::types::TypeVec, src_var: crate::types::Variadicity) -> bool {
    use crate::types::Variadicity::{Fixed, Unbounded};
    match (dst_var, src_var) {
        (Fixed, Fixed) => dst.len() == src.len() && dst.iter().zip(src.iter()).all(|(d, s)| is_assignable(interner, *d, *s)),
        (Unbounded, Unbounded) => dst.last().zip(src.last()).is_some_and(|(d, s)| is_assignable(interner, *d, *s)),
        (Unbounded, Fixed) => {
            let Some(dst_elem) = dst.last() else { return src.is_empty() };
            src.iter().all(|s| is_assignable(interner, *dst_elem, *s))
        }
        (Fixed, Unbounded) => false,
    }
}

#[cfg(test)]
#[path = "../tests/assignability_tests.rs"]
mod tests;
