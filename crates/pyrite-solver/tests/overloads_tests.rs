use super::*;
use crate::intern::TypeInterner;
use crate::types::{FunctionSig, Parameter, ParameterKind, TypeData};

fn sig(interner: &TypeInterner, param_types: &[TypeId], return_type: TypeId) -> FunctionSig {
    let _ = interner;
    FunctionSig {
        parameters: param_types.iter().map(|t| Parameter { name: "arg".into(), kind: ParameterKind::PositionalOrKeyword, annotated_type: *t, has_default: false }).collect(),
        return_type,
        type_parameters: Vec::new(),
        is_async: false,
    }
}

#[test]
fn the_first_matching_overload_in_source_order_wins() {
    let interner = TypeInterner::new();
    let int_class = interner.intern_class(crate::types::ClassData { module: "builtins".into(), name: "int".into(), bases: Vec::new(), mro: Vec::new(), members: Default::default(), metaclass: None, slots: None, is_protocol: false });
    let str_class = interner.intern_class(crate::types::ClassData { module: "builtins".into(), name: "str".into(), bases: Vec::new(), mro: Vec::new(), members: Default::default(), metaclass: None, slots: None, is_protocol: false });
    let int_i = interner.intern(TypeData::ClassInstance(int_class, crate::types::TypeVec::new()));
    let str_i = interner.intern(TypeData::ClassInstance(str_class, crate::types::TypeVec::new()));

    let overloads = vec![sig(&interner, &[int_i], int_i), sig(&interner, &[str_i], str_i)];

    let (index, matched) = resolve(&interner, &overloads, &[str_i]).expect("the second overload should match a str argument");
    assert_eq!(index, 1);
    assert_eq!(matched.return_type, str_i);
}

#[test]
fn no_matching_overload_reports_against_the_last_signature() {
    let interner = TypeInterner::new();
    let int_class = interner.intern_class(crate::types::ClassData { module: "builtins".into(), name: "int".into(), bases: Vec::new(), mro: Vec::new(), members: Default::default(), metaclass: None, slots: None, is_protocol: false });
    let str_class = interner.intern_class(crate::types::ClassData { module: "builtins".into(), name: "str".into(), bases: Vec::new(), mro: Vec::new(), members: Default::default(), metaclass: None, slots: None, is_protocol: false });
    let bytes_class = interner.intern_class(crate::types::ClassData { module: "builtins".into(), name: "bytes".into(), bases: Vec::new(), mro: Vec::new(), members: Default::default(), metaclass: None, slots: None, is_protocol: false });
    let int_i = interner.intern(TypeData::ClassInstance(int_class, crate::types::TypeVec::new()));
    let str_i = interner.intern(TypeData::ClassInstance(str_class, crate::types::TypeVec::new()));
    let bytes_i = interner.intern(TypeData::ClassInstance(bytes_class, crate::types::TypeVec::new()));

    let overloads = vec![sig(&interner, &[int_i], int_i), sig(&interner, &[str_i], str_i)];

    let err = resolve(&interner, &overloads, &[bytes_i]).unwrap_err();
    assert_eq!(err, OverloadMismatch { reported_against: 1 });
}

#[test]
fn too_few_arguments_for_every_overload_is_a_mismatch() {
    let interner = TypeInterner::new();
    let int_class = interner.intern_class(crate::types::ClassData { module: "builtins".into(), name: "int".into(), bases: Vec::new(), mro: Vec::new(), members: Default::default(), metaclass: None, slots: None, is_protocol: false });
    let int_i = interner.intern(TypeData::ClassInstance(int_class, crate::types::TypeVec::new()));
    let overloads = vec![sig(&interner, &[int_i, int_i], int_i)];

    assert!(resolve(&interner, &overloads, &[int_i]).is_err());
}

#[test]
fn an_empty_overload_list_reports_against_index_zero_without_underflowing() {
    let interner = TypeInterner::new();
    let overloads: Vec<FunctionSig> = Vec::new();
    let err = resolve(&interner, &overloads, &[]).unwrap_err();
    assert_eq!(err, OverloadMismatch { reported_against: 0 });
}

#[test]
fn union_of_return_types_is_used_when_no_overload_decorators_are_present() {
    let interner = TypeInterner::new();
    let sigs = vec![sig(&interner, &[], TypeId::NONE), sig(&interner, &[], TypeId::UNKNOWN)];
    let union = union_of_return_types(&interner, &sigs);
    match interner.lookup(union) {
        Some(TypeData::Union(members)) => {
            assert!(members.contains(&TypeId::NONE));
            assert!(members.contains(&TypeId::UNKNOWN));
        }
        other => panic!("expected a union of the two return types, got {other:?}"),
    }
}
