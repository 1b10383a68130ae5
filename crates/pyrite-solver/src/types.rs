//! The type lattice: one tagged enum, interned behind [`crate::intern::TypeId`]
//! so that structurally-identical types share storage and compare by id.
//!
//! Grounded on the teacher's `TypeData` shape (`tsz-solver` test files
//! reference `TypeData::Union(ListId)`, a `TypeInterner`, and `TypeId`
//! constants like `TypeId::STRING`) generalized from TypeScript's richer
//! lattice (no intersection types, no index signatures, no template
//! literals — Python's gradual type system doesn't have those) down to the
//! PEP-484 set named by the data model: `Unknown`, `Any`, `None`, `Never`,
//! literals, class instances, classes, functions, overloaded functions,
//! unions, type variables, modules, and tuples.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Small inline vector for union members and tuple elements; most unions
/// and tuples in real code are 2-4 members.
pub type TypeVec = SmallVec<[crate::intern::TypeId; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClassId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModuleId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeVarId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variance {
    Invariant,
    Covariant,
    Contravariant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    PositionalOnly,
    PositionalOrKeyword,
    VarPositional,
    KeywordOnly,
    VarKeyword,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
    pub annotated_type: crate::intern::TypeId,
    pub has_default: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionSig {
    pub parameters: Vec<Parameter>,
    pub return_type: crate::intern::TypeId,
    pub type_parameters: Vec<TypeVarId>,
    pub is_async: bool,
}

impl FunctionSig {
    #[must_use]
    pub fn required_positional_count(&self) -> usize {
        self.parameters
            .iter()
            .take_while(|p| matches!(p.kind, ParameterKind::PositionalOnly | ParameterKind::PositionalOrKeyword) && !p.has_default)
            .count()
    }
}

/// A `Literal["x"]`/`Literal[1]`/`Literal[True]`-style literal value; kept
/// distinct from its underlying base type (`str`/`int`/`bool`) so
/// assignability can special-case "literal is assignable to its base."
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Bytes(Vec<u8>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variadicity {
    /// A fixed-length tuple: every element type is listed explicitly.
    Fixed,
    /// `tuple[int, ...]`: the last element type repeats indefinitely.
    Unbounded,
}

/// The interned payload behind a [`crate::intern::TypeId`].
///
/// `Union` invariants (spec data model): flat (no member is itself a
/// `Union`), at least two members, members compared as an unordered set
/// for equality but display order is preserved — enforced by
/// [`crate::intern::TypeInterner::union`], never by constructing this
/// variant directly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Unknown,
    Any,
    None,
    Never,
    LiteralInstance(LiteralValue, ClassId),
    ClassInstance(ClassId, TypeVec),
    Class(ClassId),
    Function(FunctionSig),
    OverloadedFunction(Vec<FunctionSig>),
    Union(TypeVec),
    TypeVar(TypeVarId, Variance, Option<crate::intern::TypeId>, TypeVec),
    Module(ModuleId),
    Tuple(TypeVec, Variadicity),
}

/// A resolved class: MRO, own+inherited members with override tracking,
/// base classes, metaclass, `__slots__`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassData {
    pub module: String,
    pub name: String,
    pub bases: Vec<ClassId>,
    /// C3 linearization, self first, `object` last. Empty until
    /// [`crate::mro::linearize`] has run for this class.
    pub mro: Vec<ClassId>,
    pub members: FxHashMap<String, Member>,
    pub metaclass: Option<ClassId>,
    pub slots: Option<Vec<String>>,
    pub is_protocol: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub declared_type: crate::intern::TypeId,
    pub owner: ClassId,
    /// Set once a subclass's member of the same name is seen during MRO
    /// member-table construction; used by the checker's override-mismatch
    /// rule.
    pub overrides: Option<ClassId>,
    pub is_abstract: bool,
    pub kind: MemberKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Method,
    Property,
    ClassVar,
    InstanceVar,
}
