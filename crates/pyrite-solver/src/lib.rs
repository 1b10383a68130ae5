//! The type lattice and the flow-sensitive evaluator that assigns types to
//! expressions: interning, MRO linearization, assignability, narrowing,
//! generic inference, and overload resolution, sitting on top of a bound
//! file's symbol table and flow graph from `pyrite-binder`.
//!
//! This crate has no knowledge of diagnostics or checking rules — it only
//! answers "what type is this" and "is this type assignable to that one."
//! `pyrite-checker` drives it and turns its answers into reported problems.

pub mod assignability;
pub mod evaluator;
pub mod generics;
pub mod intern;
pub mod mro;
pub mod narrowing;
pub mod operators;
pub mod overloads;
pub mod recursion;
pub mod render;
pub mod types;

pub use assignability::{is_assignable, AssignabilityError, AssignabilityResult};
pub use evaluator::Evaluator;
pub use generics::{InferenceContext, InferenceError};
pub use intern::{TypeId, TypeInterner};
pub use mro::{linearize, MroError};
pub use narrowing::{predicate_for_name, Predicate};
pub use operators::{binary_op_outcome, OperatorOutcome};
pub use overloads::{resolve as resolve_overload, OverloadMismatch};
pub use recursion::{RecursionGuard, RecursionLimitExceeded, RecursionProfile};
pub use render::render_type_name;
pub use types::{
    ClassData, ClassId, FunctionSig, LiteralValue, Member, MemberKind, ModuleId, Parameter, ParameterKind, TypeData, TypeVarId, TypeVec, Variadicity, Variance,
};
