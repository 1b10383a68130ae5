//! Type-variable inference from a call site: collect constraints from
//! argument assignability against parameter annotations, then solve by
//! least-upper-bound for covariant slots and greatest-lower-bound for
//! contravariant slots.
//!
//! Grounded on the teacher's `generic_checker.rs`/`query_boundaries/
//! generic_checker.rs` constraint-collection-then-solve split, reusing
//! `ena`'s union-find the way type-inference engines generally do: each
//! call-site occurrence of a type parameter becomes an inference variable,
//! and repeated occurrences of the *same* parameter in one signature unify
//! to one variable so their constraints accumulate together rather than
//! needing to be merged by hand afterward.

use crate::intern::{TypeId, TypeInterner};
use crate::types::TypeVarId;
use ena::unify::{InPlaceUnificationTable, NoError, UnifyKey, UnifyValue};
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct InferenceVar(u32);

impl UnifyKey for InferenceVar {
    type Value = Constraint;

    fn index(&self) -> u32 {
        self.0
    }

    fn from_index(u: u32) -> Self {
        InferenceVar(u)
    }

    fn tag() -> &'static str {
        "pyrite_solver::generics::InferenceVar"
    }
}

/// Raw, un-merged constraint contributions for one type variable.
/// `unify_values` only concatenates — the actual least-upper-bound /
/// greatest-lower-bound computation happens in [`InferenceContext::solve`]
/// once every argument has contributed, since that computation needs the
/// interner and `ena`'s `UnifyValue` trait doesn't have access to one.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
struct Constraint {
    lower_bounds: Vec<TypeId>,
    upper_bounds: Vec<TypeId>,
}

impl UnifyValue for Constraint {
    type Error = NoError;

    fn unify_values(a: &Self, b: &Self) -> Result<Self, NoError> {
        let mut merged = a.clone();
        merged.lower_bounds.extend(b.lower_bounds.iter().copied());
        merged.upper_bounds.extend(b.upper_bounds.iter().copied());
        Ok(merged)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum InferenceError {
    /// No type satisfies every constraint collected for this type
    /// variable (e.g. an argument's lower bound isn't assignable to
    /// another argument's upper bound).
    NoSolution(TypeVarId),
}

/// Accumulates constraints for one call site's type-variable solving,
/// then resolves each variable to a concrete [`TypeId`].
pub struct InferenceContext {
    table: InPlaceUnificationTable<InferenceVar>,
    vars: FxHashMap<TypeVarId, InferenceVar>,
}

impl Default for InferenceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceContext {
    #[must_use]
    pub fn new() -> Self {
        Self { table: InPlaceUnificationTable::new(), vars: FxHashMap::default() }
    }

    fn var_for(&mut self, type_var: TypeVarId) -> InferenceVar {
        *self.vars.entry(type_var).or_insert_with(|| self.table.new_key(Constraint::default()))
    }

    /// Record that `type_var` was used at an argument position assignable
    /// *from* `argument_type` (the ordinary covariant case: the
    /// parameter's declared position accepts this argument, so the
    /// solved type must be at least as wide as `argument_type`).
    pub fn add_lower_bound(&mut self, type_var: TypeVarId, argument_type: TypeId) {
        let var = self.var_for(type_var);
        let mut constraint = self.table.probe_value(var);
        constraint.lower_bounds.push(argument_type);
        self.table.unify_var_value(var, constraint).expect("Constraint::unify_values never fails");
    }

    /// Record a contravariant use (the type variable appears in a
    /// position that *consumes* a value, such as a callback parameter):
    /// the solved type must be narrow enough to stay assignable to every
    /// such upper bound.
    pub fn add_upper_bound(&mut self, type_var: TypeVarId, parameter_type: TypeId) {
        let var = self.var_for(type_var);
        let mut constraint = self.table.probe_value(var);
        constraint.upper_bounds.push(parameter_type);
        self.table.unify_var_value(var, constraint).expect("Constraint::unify_values never fails");
    }

    /// Solve every type variable that received at least one constraint.
    /// A variable with only lower bounds solves to their union (the
    /// least upper bound in this lattice, since union is exactly the
    /// join). A variable with only upper bounds solves to the narrowest
    /// of them it can — this lattice has no general meet operation
    /// (there's no intersection type), so a variable constrained only
    /// contravariantly solves to the *first* upper bound and every other
    /// upper bound must accept it, matching the spec's "fail with a
    /// specific diagnostic when no solution satisfies all constraints."
    pub fn solve(&mut self, interner: &TypeInterner) -> Result<FxHashMap<TypeVarId, TypeId>, InferenceError> {
        let mut solutions = FxHashMap::default();
        for (&type_var, &var) in &self.vars.clone() {
            let constraint = self.table.probe_value(var);
            let solved = if !constraint.lower_bounds.is_empty() {
                interner.union(constraint.lower_bounds.clone())
            } else if let Some((first, rest)) = constraint.upper_bounds.split_first() {
                for upper in rest {
                    if !crate::assignability::is_assignable(interner, *upper, *first) {
                        return Err(InferenceError::NoSolution(type_var));
                    }
                }
                *first
            } else {
                TypeId::UNKNOWN
            };

            if !constraint.upper_bounds.is_empty() && !constraint.lower_bounds.is_empty() {
                for upper in &constraint.upper_bounds {
                    if !crate::assignability::is_assignable(interner, *upper, solved) {
                        return Err(InferenceError::NoSolution(type_var));
                    }
                }
            }

            solutions.insert(type_var, solved);
        }
        Ok(solutions)
    }
}

/// Substitute every `TypeVar` reachable from `type_id` using `solutions`,
/// leaving unresolved type variables as `Unknown` rather than leaking a
/// dangling variable id into a checked program.
#[must_use]
pub fn substitute(interner: &TypeInterner, type_id: TypeId, solutions: &FxHashMap<TypeVarId, TypeId>) -> TypeId {
    match interner.lookup(type_id) {
        Some(crate::types::TypeData::TypeVar(id, ..)) => solutions.get(&id).copied().unwrap_or(TypeId::UNKNOWN),
        Some(crate::types::TypeData::Union(members)) => {
            let substituted: Vec<TypeId> = members.iter().map(|m| substitute(interner, *m, solutions)).collect();
            interner.union(substituted)
        }
        Some(crate::types::TypeData::ClassInstance(class_id, args)) => {
            let substituted: crate::types::TypeVec = args.iter().map(|a| substitute(interner, *a, solutions)).collect();
            interner.intern(crate::types::TypeData::ClassInstance(class_id, substituted))
        }
        _ => type_id,
    }
}

#[cfg(test)]
#[path = "../tests/generics_tests.rs"]
mod tests;
