use super::*;
use crate::intern::TypeInterner;
use crate::types::TypeVarId;

#[test]
fn a_type_variable_with_only_lower_bounds_solves_to_their_union() {
    let interner = TypeInterner::new();
    let mut ctx = InferenceContext::new();
    let t = TypeVarId(0);
    ctx.add_lower_bound(t, TypeId::NONE);
    ctx.add_lower_bound(t, TypeId::UNKNOWN);

    let solutions = ctx.solve(&interner).expect("union of two lower bounds always solves");
    let solved = solutions[&t];
    match interner.lookup(solved) {
        Some(crate::types::TypeData::Union(members)) => {
            assert!(members.contains(&TypeId::NONE));
            assert!(members.contains(&TypeId::UNKNOWN));
        }
        other => panic!("expected a union of the two lower bounds, got {other:?}"),
    }
}

#[test]
fn a_type_variable_with_a_single_lower_bound_solves_to_exactly_that_bound() {
    let interner = TypeInterner::new();
    let mut ctx = InferenceContext::new();
    let t = TypeVarId(0);
    ctx.add_lower_bound(t, TypeId::NONE);

    let solutions = ctx.solve(&interner).expect("a single lower bound always solves");
    assert_eq!(solutions[&t], TypeId::NONE);
}

#[test]
fn a_lower_bound_of_never_alone_solves_to_never() {
    let interner = TypeInterner::new();
    let mut ctx = InferenceContext::new();
    let t = TypeVarId(0);
    ctx.add_lower_bound(t, TypeId::NEVER);
    let solutions = ctx.solve(&interner).expect("a never-only lower bound still solves");
    // `Never` unions away to nothing, which the union helper maps back to
    // `Never` — the solver doesn't special-case this further.
    assert_eq!(solutions[&t], TypeId::NEVER);
}

#[test]
fn repeated_occurrences_of_the_same_type_variable_accumulate_into_one_set_of_constraints() {
    let interner = TypeInterner::new();
    let mut ctx = InferenceContext::new();
    let t = TypeVarId(0);
    ctx.add_lower_bound(t, TypeId::NONE);
    ctx.add_lower_bound(t, TypeId::NONE);

    let solutions = ctx.solve(&interner).expect("solving succeeds");
    assert_eq!(solutions[&t], TypeId::NONE);
    assert_eq!(solutions.len(), 1);
}

#[test]
fn an_upper_bound_only_variable_solves_to_the_first_upper_bound() {
    let interner = TypeInterner::new();
    let mut ctx = InferenceContext::new();
    let t = TypeVarId(0);
    ctx.add_upper_bound(t, TypeId::UNKNOWN);

    let solutions = ctx.solve(&interner).expect("a single upper bound always solves");
    assert_eq!(solutions[&t], TypeId::UNKNOWN);
}

#[test]
fn conflicting_upper_bounds_fail_to_solve() {
    let interner = TypeInterner::new();
    let mut ctx = InferenceContext::new();
    let t = TypeVarId(0);
    let widget = interner.intern_class(crate::types::ClassData { module: "m".into(), name: "Widget".into(), bases: Vec::new(), mro: Vec::new(), members: Default::default(), metaclass: None, slots: None, is_protocol: false });
    let widget_instance = interner.intern(crate::types::TypeData::ClassInstance(widget, crate::types::TypeVec::new()));

    ctx.add_upper_bound(t, TypeId::NONE);
    ctx.add_upper_bound(t, widget_instance);

    assert_eq!(ctx.solve(&interner), Err(InferenceError::NoSolution(t)));
}

#[test]
fn substitute_replaces_a_bare_type_variable_with_its_solution() {
    let interner = TypeInterner::new();
    let t = TypeVarId(0);
    let var_type = interner.intern(crate::types::TypeData::TypeVar(t, crate::types::Variance::Invariant, None, crate::types::TypeVec::new()));

    let mut solutions = rustc_hash::FxHashMap::default();
    solutions.insert(t, TypeId::NONE);

    assert_eq!(substitute(&interner, var_type, &solutions), TypeId::NONE);
}

#[test]
fn substitute_leaves_an_unsolved_type_variable_as_unknown() {
    let interner = TypeInterner::new();
    let t = TypeVarId(0);
    let var_type = interner.intern(crate::types::TypeData::TypeVar(t, crate::types::Variance::Invariant, None, crate::types::TypeVec::new()));

    let solutions = rustc_hash::FxHashMap::default();
    assert_eq!(substitute(&interner, var_type, &solutions), TypeId::UNKNOWN);
}

#[test]
fn substitute_recurses_into_class_instance_type_arguments() {
    let interner = TypeInterner::new();
    let t = TypeVarId(0);
    let var_type = interner.intern(crate::types::TypeData::TypeVar(t, crate::types::Variance::Covariant, None, crate::types::TypeVec::new()));
    let list_class = interner.intern_class(crate::types::ClassData { module: "builtins".into(), name: "list".into(), bases: Vec::new(), mro: Vec::new(), members: Default::default(), metaclass: None, slots: None, is_protocol: false });
    let list_of_t = interner.intern(crate::types::TypeData::ClassInstance(list_class, crate::types::TypeVec::from_vec(vec![var_type])));

    let mut solutions = rustc_hash::FxHashMap::default();
    solutions.insert(t, TypeId::NONE);

    let substituted = substitute(&interner, list_of_t, &solutions);
    match interner.lookup(substituted) {
        Some(crate::types::TypeData::ClassInstance(class_id, args)) => {
            assert_eq!(class_id, list_class);
            assert_eq!(args.as_slice(), &[TypeId::NONE]);
        }
        other => panic!("expected a substituted ClassInstance, got {other:?}"),
    }
}
