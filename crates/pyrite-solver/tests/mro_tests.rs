use super::*;
use crate::intern::TypeInterner;

fn class(interner: &TypeInterner, name: &str, bases: Vec<ClassId>) -> ClassId {
    let id = interner.intern_class(ClassData { module: "m".into(), name: name.into(), bases: bases.clone(), mro: Vec::new(), members: Default::default(), metaclass: None, slots: None, is_protocol: false });
    let mro = linearize(interner, id, &bases).expect("linearization should succeed for well-formed test hierarchies");
    let mut data = interner.lookup_class(id);
    data.mro = mro;
    interner.update_class(id, data);
    id
}

#[test]
fn a_class_with_no_bases_linearizes_to_itself() {
    let interner = TypeInterner::new();
    let object = class(&interner, "object", Vec::new());
    assert_eq!(interner.lookup_class(object).mro, vec![object]);
}

#[test]
fn single_inheritance_linearizes_to_a_straight_chain() {
    let interner = TypeInterner::new();
    let object = class(&interner, "object", Vec::new());
    let base = class(&interner, "Base", vec![object]);
    let derived = class(&interner, "Derived", vec![base]);
    assert_eq!(interner.lookup_class(derived).mro, vec![derived, base, object]);
}

#[test]
fn diamond_inheritance_linearizes_depth_first_left_to_right_with_object_last() {
    let interner = TypeInterner::new();
    let object = class(&interner, "object", Vec::new());
    let a = class(&interner, "A", vec![object]);
    let b = class(&interner, "B", vec![a]);
    let c = class(&interner, "C", vec![a]);
    let d = class(&interner, "D", vec![b, c]);
    assert_eq!(interner.lookup_class(d).mro, vec![d, b, c, a, object]);
}

#[test]
fn inconsistent_base_order_is_rejected() {
    let interner = TypeInterner::new();
    let object = class(&interner, "object", Vec::new());
    let x = class(&interner, "X", vec![object]);
    let y = class(&interner, "Y", vec![object]);
    // X(Y) and Y(X) together impose contradictory orderings on a third
    // class that inherits both ways round.
    let xy = class(&interner, "XY", vec![x, y]);
    let yx = class(&interner, "YX", vec![y, x]);
    let result = linearize(&interner, ClassId(u32::MAX), &[xy, yx]);
    assert_eq!(result, Err(MroError::Inconsistent));
}
