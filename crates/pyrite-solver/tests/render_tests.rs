use super::*;
use crate::intern::TypeInterner;
use crate::types::{ClassData, TypeData, TypeVec};
use rustc_hash::FxHashMap;

fn instance_of(interner: &TypeInterner, name: &str) -> TypeId {
    let class_id = interner.intern_class(ClassData { module: "builtins".to_string(), name: name.to_string(), bases: Vec::new(), mro: Vec::new(), members: FxHashMap::default(), metaclass: None, slots: None, is_protocol: false });
    interner.intern(TypeData::ClassInstance(class_id, TypeVec::new()))
}

#[test]
fn a_class_instance_renders_as_its_class_name() {
    let interner = TypeInterner::new();
    let int_ty = instance_of(&interner, "int");
    assert_eq!(render_type_name(&interner, int_ty), "int");
}

#[test]
fn none_renders_as_none() {
    let interner = TypeInterner::new();
    assert_eq!(render_type_name(&interner, TypeId::NONE), "None");
}

#[test]
fn a_union_renders_each_member_joined_by_pipes() {
    let interner = TypeInterner::new();
    let int_ty = instance_of(&interner, "int");
    let union = interner.union(vec![int_ty, TypeId::NONE]);
    assert_eq!(render_type_name(&interner, union), "None | int");
}

#[test]
fn unknown_renders_as_unknown() {
    let interner = TypeInterner::new();
    assert_eq!(render_type_name(&interner, TypeId::UNKNOWN), "Unknown");
}
