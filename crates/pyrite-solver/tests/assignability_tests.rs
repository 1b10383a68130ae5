use super::*;
use crate::intern::TypeInterner;
use crate::mro::linearize;
use crate::types::{ClassData, FunctionSig, LiteralValue, Member, MemberKind, Parameter, ParameterKind, TypeVec, Variadicity};

fn class(interner: &TypeInterner, name: &str, bases: Vec<ClassId>) -> ClassId {
    let id = interner.intern_class(ClassData { module: "m".into(), name: name.into(), bases: bases.clone(), mro: Vec::new(), members: Default::default(), metaclass: None, slots: None, is_protocol: false });
    let mro = linearize(interner, id, &bases).expect("linearization should succeed for well-formed test hierarchies");
    let mut data = interner.lookup_class(id);
    data.mro = mro;
    interner.update_class(id, data);
    id
}

fn instance(interner: &TypeInterner, class_id: ClassId) -> TypeId {
    interner.intern(TypeData::ClassInstance(class_id, TypeVec::new()))
}

#[test]
fn any_and_unknown_absorb_everything_on_either_side() {
    let interner = TypeInterner::new();
    let widget = instance(&interner, class(&interner, "Widget", Vec::new()));
    assert!(is_assignable(&interner, TypeId::ANY, widget));
    assert!(is_assignable(&interner, widget, TypeId::ANY));
    assert!(is_assignable(&interner, TypeId::UNKNOWN, widget));
    assert!(is_assignable(&interner, widget, TypeId::UNKNOWN));
}

#[test]
fn never_is_assignable_to_anything() {
    let interner = TypeInterner::new();
    let widget = instance(&interner, class(&interner, "Widget", Vec::new()));
    assert!(is_assignable(&interner, widget, TypeId::NEVER));
}

#[test]
fn a_subclass_instance_is_assignable_to_a_base_class_instance() {
    let interner = TypeInterner::new();
    let object = class(&interner, "object", Vec::new());
    let base = class(&interner, "Base", vec![object]);
    let derived = class(&interner, "Derived", vec![base]);
    assert!(is_assignable(&interner, instance(&interner, base), instance(&interner, derived)));
    assert!(!is_assignable(&interner, instance(&interner, derived), instance(&interner, base)));
}

#[test]
fn unrelated_classes_are_not_assignable() {
    let interner = TypeInterner::new();
    let a = class(&interner, "A", Vec::new());
    let b = class(&interner, "B", Vec::new());
    assert!(!is_assignable(&interner, instance(&interner, a), instance(&interner, b)));
}

#[test]
fn a_literal_is_assignable_to_its_base_class_instance() {
    let interner = TypeInterner::new();
    let str_class = class(&interner, "str", Vec::new());
    let literal = interner.intern(TypeData::LiteralInstance(LiteralValue::Str("ok".into()), str_class));
    assert!(is_assignable(&interner, instance(&interner, str_class), literal));
}

#[test]
fn two_literals_are_assignable_only_when_the_exact_value_matches() {
    let interner = TypeInterner::new();
    let str_class = class(&interner, "str", Vec::new());
    let ok = interner.intern(TypeData::LiteralInstance(LiteralValue::Str("ok".into()), str_class));
    let other_ok = interner.intern(TypeData::LiteralInstance(LiteralValue::Str("ok".into()), str_class));
    let no = interner.intern(TypeData::LiteralInstance(LiteralValue::Str("no".into()), str_class));
    assert!(is_assignable(&interner, ok, other_ok));
    assert!(!is_assignable(&interner, ok, no));
}

#[test]
fn a_union_destination_accepts_a_source_assignable_to_any_member() {
    let interner = TypeInterner::new();
    let widget = instance(&interner, class(&interner, "Widget", Vec::new()));
    let dst = interner.union2(TypeId::NONE, widget);
    assert!(is_assignable(&interner, dst, widget));
    assert!(is_assignable(&interner, dst, TypeId::NONE));
}

#[test]
fn a_union_source_requires_every_member_assignable_to_the_destination() {
    let interner = TypeInterner::new();
    let object = class(&interner, "object", Vec::new());
    let widget = class(&interner, "Widget", vec![object]);
    let src = interner.union2(TypeId::NONE, instance(&interner, widget));
    assert!(!is_assignable(&interner, instance(&interner, object), src));

    let src_without_none = interner.union2(instance(&interner, widget), instance(&interner, widget));
    assert!(is_assignable(&interner, instance(&interner, object), src_without_none));
}

#[test]
fn a_protocol_is_satisfied_structurally_without_nominal_inheritance() {
    let interner = TypeInterner::new();
    let int_class = class(&interner, "int", Vec::new());
    let int_instance = instance(&interner, int_class);

    let protocol = interner.intern_class(ClassData {
        module: "m".into(),
        name: "Sized".into(),
        bases: Vec::new(),
        mro: vec![],
        members: FxHashMap::from_iter([("__len__".to_string(), Member { declared_type: int_instance, owner: ClassId(0), overrides: None, is_abstract: false, kind: MemberKind::Method })]),
        metaclass: None,
        slots: None,
        is_protocol: true,
    });

    let has_len = class(&interner, "HasLen", Vec::new());
    let mut data = interner.lookup_class(has_len);
    data.members.insert("__len__".to_string(), Member { declared_type: int_instance, owner: has_len, overrides: None, is_abstract: false, kind: MemberKind::Method });
    interner.update_class(has_len, data);

    let missing_len = class(&interner, "NoLen", Vec::new());

    assert!(is_assignable(&interner, instance(&interner, protocol), instance(&interner, has_len)));
    assert!(!is_assignable(&interner, instance(&interner, protocol), instance(&interner, missing_len)));
}

#[test]
fn function_parameters_are_contravariant_and_the_return_type_is_covariant() {
    let interner = TypeInterner::new();
    let object = class(&interner, "object", Vec::new());
    let widget = class(&interner, "Widget", vec![object]);

    let narrow_param_sig = FunctionSig { parameters: vec![Parameter { name: "x".into(), kind: ParameterKind::PositionalOrKeyword, annotated_type: instance(&interner, widget), has_default: false }], return_type: instance(&interner, widget), type_parameters: Vec::new(), is_async: false };
    let wide_param_sig = FunctionSig { parameters: vec![Parameter { name: "x".into(), kind: ParameterKind::PositionalOrKeyword, annotated_type: instance(&interner, object), has_default: false }], return_type: instance(&interner, widget), type_parameters: Vec::new(), is_async: false };

    let narrow_param_fn = interner.intern(TypeData::Function(narrow_param_sig));
    let wide_param_fn = interner.intern(TypeData::Function(wide_param_sig));

    // A function accepting the wider parameter type is assignable where a
    // function accepting only the narrower type is expected.
    assert!(is_assignable(&interner, narrow_param_fn, wide_param_fn));
    assert!(!is_assignable(&interner, wide_param_fn, narrow_param_fn));
}

#[test]
fn fixed_length_tuples_require_equal_length_and_elementwise_assignability() {
    let interner = TypeInterner::new();
    let object = class(&interner, "object", Vec::new());
    let widget = class(&interner, "Widget", vec![object]);
    let object_i = instance(&interner, object);
    let widget_i = instance(&interner, widget);

    let dst = interner.intern(TypeData::Tuple(TypeVec::from_vec(vec![object_i, object_i]), Variadicity::Fixed));
    let src = interner.intern(TypeData::Tuple(TypeVec::from_vec(vec![widget_i, widget_i]), Variadicity::Fixed));
    let wrong_len = interner.intern(TypeData::Tuple(TypeVec::from_vec(vec![widget_i]), Variadicity::Fixed));

    assert!(is_assignable(&interner, dst, src));
    assert!(!is_assignable(&interner, dst, wrong_len));
}

#[test]
fn an_unbounded_destination_accepts_any_fixed_tuple_whose_elements_match_the_repeated_type() {
    let interner = TypeInterner::new();
    let int_class = class(&interner, "int", Vec::new());
    let int_i = instance(&interner, int_class);

    let dst = interner.intern(TypeData::Tuple(TypeVec::from_vec(vec![int_i]), Variadicity::Unbounded));
    let src = interner.intern(TypeData::Tuple(TypeVec::from_vec(vec![int_i, int_i, int_i]), Variadicity::Fixed));
    assert!(is_assignable(&interner, dst, src));
}

#[test]
fn a_fixed_destination_never_accepts_an_unbounded_source() {
    let interner = TypeInterner::new();
    let int_class = class(&interner, "int", Vec::new());
    let int_i = instance(&interner, int_class);

    let dst = interner.intern(TypeData::Tuple(TypeVec::from_vec(vec![int_i, int_i]), Variadicity::Fixed));
    let src = interner.intern(TypeData::Tuple(TypeVec::from_vec(vec![int_i]), Variadicity::Unbounded));
    assert!(!is_assignable(&interner, dst, src));
}
