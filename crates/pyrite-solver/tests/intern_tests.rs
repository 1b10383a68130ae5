use super::*;

#[test]
fn fixed_ids_are_preseeded_and_stable() {
    let interner = TypeInterner::new();
    assert_eq!(interner.lookup(TypeId::UNKNOWN), Some(TypeData::Unknown));
    assert_eq!(interner.lookup(TypeId::ANY), Some(TypeData::Any));
    assert_eq!(interner.lookup(TypeId::NONE), Some(TypeData::None));
    assert_eq!(interner.lookup(TypeId::NEVER), Some(TypeData::Never));
}

#[test]
fn interning_the_same_data_twice_returns_the_same_id() {
    let interner = TypeInterner::new();
    let class = interner.intern_class(ClassData { module: "m".into(), name: "Widget".into(), bases: Vec::new(), mro: Vec::new(), members: FxHashMap::default(), metaclass: None, slots: None, is_protocol: false });
    let a = interner.intern(TypeData::ClassInstance(class, TypeVec::new()));
    let b = interner.intern(TypeData::ClassInstance(class, TypeVec::new()));
    assert_eq!(a, b);
}

#[test]
fn distinct_data_interns_to_distinct_ids() {
    let interner = TypeInterner::new();
    let a = interner.intern_class(ClassData { module: "m".into(), name: "A".into(), bases: Vec::new(), mro: Vec::new(), members: FxHashMap::default(), metaclass: None, slots: None, is_protocol: false });
    let b = interner.intern_class(ClassData { module: "m".into(), name: "B".into(), bases: Vec::new(), mro: Vec::new(), members: FxHashMap::default(), metaclass: None, slots: None, is_protocol: false });
    let ta = interner.intern(TypeData::ClassInstance(a, TypeVec::new()));
    let tb = interner.intern(TypeData::ClassInstance(b, TypeVec::new()));
    assert_ne!(ta, tb);
}

#[test]
fn union_with_any_collapses_to_any() {
    let interner = TypeInterner::new();
    let class = interner.intern_class(ClassData { module: "m".into(), name: "Widget".into(), bases: Vec::new(), mro: Vec::new(), members: FxHashMap::default(), metaclass: None, slots: None, is_protocol: false });
    let widget = interner.intern(TypeData::ClassInstance(class, TypeVec::new()));
    assert_eq!(interner.union2(widget, TypeId::ANY), TypeId::ANY);
}

#[test]
fn union_drops_never_members() {
    let interner = TypeInterner::new();
    let class = interner.intern_class(ClassData { module: "m".into(), name: "Widget".into(), bases: Vec::new(), mro: Vec::new(), members: FxHashMap::default(), metaclass: None, slots: None, is_protocol: false });
    let widget = interner.intern(TypeData::ClassInstance(class, TypeVec::new()));
    assert_eq!(interner.union2(widget, TypeId::NEVER), widget);
}

#[test]
fn union_of_no_members_is_never() {
    let interner = TypeInterner::new();
    assert_eq!(interner.union(Vec::new()), TypeId::NEVER);
}

#[test]
fn union_of_a_single_member_returns_that_member() {
    let interner = TypeInterner::new();
    assert_eq!(interner.union(vec![TypeId::NONE]), TypeId::NONE);
}

#[test]
fn union_deduplicates_and_flattens_nested_unions() {
    let interner = TypeInterner::new();
    let inner = interner.union2(TypeId::NONE, TypeId::UNKNOWN);
    let outer = interner.union(vec![inner, TypeId::NONE]);
    match interner.lookup(outer) {
        Some(TypeData::Union(members)) => {
            let mut ids: Vec<u32> = members.iter().map(|m| m.0).collect();
            ids.sort_unstable();
            assert_eq!(ids, vec![TypeId::UNKNOWN.0, TypeId::NONE.0]);
        }
        other => panic!("expected a flattened union, got {other:?}"),
    }
}

#[test]
fn modules_intern_by_path_and_are_idempotent() {
    let interner = TypeInterner::new();
    let a = interner.intern_module("pkg.mod");
    let b = interner.intern_module("pkg.mod");
    assert_eq!(a, b);
    assert_eq!(interner.module_path(a), "pkg.mod");
}

#[test]
fn update_class_replaces_the_stored_data_in_place() {
    let interner = TypeInterner::new();
    let class = interner.intern_class(ClassData { module: "m".into(), name: "Widget".into(), bases: Vec::new(), mro: Vec::new(), members: FxHashMap::default(), metaclass: None, slots: None, is_protocol: false });
    let mut updated = interner.lookup_class(class);
    updated.mro = vec![class];
    interner.update_class(class, updated);
    assert_eq!(interner.lookup_class(class).mro, vec![class]);
}
