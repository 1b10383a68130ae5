use super::*;
use crate::intern::TypeInterner;
use crate::types::{ClassData, TypeData};
use pyrite_parser::node::BinaryOp;
use rustc_hash::FxHashMap;

fn instance_of(interner: &TypeInterner, name: &str) -> TypeId {
    let class_id = interner.intern_class(ClassData { module: "builtins".to_string(), name: name.to_string(), bases: Vec::new(), mro: Vec::new(), members: FxHashMap::default(), metaclass: None, slots: None, is_protocol: false });
    interner.intern(TypeData::ClassInstance(class_id, crate::types::TypeVec::new()))
}

#[test]
fn adding_two_ints_is_supported_and_widens_to_int() {
    let interner = TypeInterner::new();
    let int_ty = instance_of(&interner, "int");
    assert_eq!(binary_op_outcome(&interner, BinaryOp::Add, int_ty, int_ty), OperatorOutcome::Supported(int_ty));
}

#[test]
fn adding_int_and_float_widens_to_float() {
    let interner = TypeInterner::new();
    let int_ty = instance_of(&interner, "int");
    let float_ty = instance_of(&interner, "float");
    assert_eq!(binary_op_outcome(&interner, BinaryOp::Add, int_ty, float_ty), OperatorOutcome::Supported(float_ty));
    assert_eq!(binary_op_outcome(&interner, BinaryOp::Add, float_ty, int_ty), OperatorOutcome::Supported(float_ty));
}

#[test]
fn adding_an_int_and_a_str_is_unsupported() {
    let interner = TypeInterner::new();
    let int_ty = instance_of(&interner, "int");
    let str_ty = instance_of(&interner, "str");
    assert_eq!(binary_op_outcome(&interner, BinaryOp::Add, int_ty, str_ty), OperatorOutcome::Unsupported);
}

#[test]
fn an_unknown_operand_is_indeterminate_not_unsupported() {
    let interner = TypeInterner::new();
    let str_ty = instance_of(&interner, "str");
    assert_eq!(binary_op_outcome(&interner, BinaryOp::Add, str_ty, TypeId::UNKNOWN), OperatorOutcome::Indeterminate);
}

#[test]
fn repeating_a_string_by_an_int_is_supported() {
    let interner = TypeInterner::new();
    let str_ty = instance_of(&interner, "str");
    let int_ty = instance_of(&interner, "int");
    assert_eq!(binary_op_outcome(&interner, BinaryOp::Mul, str_ty, int_ty), OperatorOutcome::Supported(str_ty));
}

#[test]
fn floor_division_with_complex_is_unsupported() {
    let interner = TypeInterner::new();
    let complex_ty = instance_of(&interner, "complex");
    assert_eq!(binary_op_outcome(&interner, BinaryOp::FloorDiv, complex_ty, complex_ty), OperatorOutcome::Unsupported);
}
