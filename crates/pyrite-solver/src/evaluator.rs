//! `getType(node) -> Type`, memoized and lazy, plus annotation evaluation
//! and the function-signature builder every other subsystem in this crate
//! consumes.
//!
//! Grounded on the teacher's `context_resolver.rs`/`symbol_resolver.rs`
//! split between "what does this name resolve to" and "what type does the
//! resolved thing have," generalized to Python's narrower annotation
//! grammar (`X`, `Optional[X]`, `Union[X, Y, ...]`, `list[X]`/`List[X]`,
//! `dict[K, V]`/`Dict[K, V]`, `tuple[X, ...]`/`Tuple[X, ...]`, qualified
//! `module.Name`) rather than TypeScript's much larger type-expression
//! grammar.

use crate::intern::{TypeId, TypeInterner};
use crate::mro::{self, MroError};
use crate::narrowing;
use crate::operators;
use crate::recursion::RecursionProfile;
use crate::types::{ClassData, ClassId, FunctionSig, Member, MemberKind, Parameter, ParameterKind, TypeData};
use pyrite_binder::flow::{FlowFlags, FlowNodeId};
use pyrite_binder::symbol::{Declaration, SymbolId};
use pyrite_binder::BindResult;
use pyrite_parser::node::{BinaryOp, ParamKind};
use pyrite_parser::{Node, NodeArena, NodeIndex};
use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// One file's type evaluator: everything it needs to assign a type to any
/// expression node in that file, plus a memoization cache so re-asking for
/// the same node's type after a narrower query elsewhere is free.
pub struct Evaluator<'a> {
    arena: &'a NodeArena,
    bind: &'a BindResult,
    interner: &'a TypeInterner,
    /// The dotted module name this file binds as, used only to label
    /// classes defined in it; not resolved against the import graph here.
    module_name: String,
    cache: RefCell<FxHashMap<NodeIndex, TypeId>>,
    /// Nodes currently being evaluated, to satisfy the spec's "cyclic
    /// reentrance resolves to Unknown" failure rule rather than
    /// overflowing the stack on self-referential annotations.
    in_progress: RefCell<rustc_hash::FxHashSet<NodeIndex>>,
    well_known: RefCell<FxHashMap<&'static str, ClassId>>,
    /// `ClassDef` nodes whose bases couldn't be linearized into a
    /// consistent MRO, recorded by [`Self::type_of_class_def`] so the
    /// checker's MRO rule can report it without redoing the linearization.
    mro_errors: RefCell<rustc_hash::FxHashSet<NodeIndex>>,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(arena: &'a NodeArena, bind: &'a BindResult, interner: &'a TypeInterner, module_name: String) -> Self {
        Self {
            arena,
            bind,
            interner,
            module_name,
            cache: RefCell::new(FxHashMap::default()),
            in_progress: RefCell::new(rustc_hash::FxHashSet::default()),
            well_known: RefCell::new(FxHashMap::default()),
            mro_errors: RefCell::new(rustc_hash::FxHashSet::default()),
        }
    }

    /// Whether `node` (a `ClassDef`) fell back to `[self, object]` because
    /// its bases have no consistent C3 linearization.
    #[must_use]
    pub fn has_mro_error(&self, node: NodeIndex) -> bool {
        self.mro_errors.borrow().contains(&node)
    }

    /// The declared type of a symbol directly, bypassing flow narrowing —
    /// for callers (`reveal_locals()`) that have a `SymbolId` but no
    /// specific `Name` use-site node to narrow from.
    #[must_use]
    pub fn declared_type_of(&self, symbol_id: SymbolId) -> TypeId {
        self.declared_type_of_symbol(symbol_id)
    }

    /// The type of expression `node`, computed on first ask and cached
    /// thereafter. Only `Name` expressions resolve through declarations
    /// and flow narrowing; every other node shape is treated as an
    /// annotation-position expression (the evaluator's other main
    /// consumer) and evaluated structurally.
    pub fn get_type(&self, node: NodeIndex) -> TypeId {
        if let Some(&cached) = self.cache.borrow().get(&node) {
            return cached;
        }
        if !self.in_progress.borrow_mut().insert(node) {
            return TypeId::UNKNOWN;
        }

        let result = match self.arena.get(node) {
            Node::Name { .. } => self.type_of_name_use(node),
            Node::FunctionDef { .. } => self.type_of_function_def(node),
            Node::ClassDef { .. } => self.type_of_class_def(node),
            Node::BinOpExpr { .. } => self.type_of_bin_op(node),
            Node::BoolOpExpr { .. } => self.type_of_bool_op(node),
            Node::Compare { .. } => self.type_of_compare(node),
            Node::Call { .. } => self.type_of_call(node),
            Node::NumberLiteral { .. } | Node::StringLiteral { .. } | Node::FStringLiteral { .. } | Node::BoolLiteral(_) | Node::EllipsisLiteral => self.type_of_literal(node),
            _ => self.eval_annotation(node),
        };

        self.in_progress.borrow_mut().remove(&node);
        self.cache.borrow_mut().insert(node, result);
        result
    }

    fn type_of_name_use(&self, node: NodeIndex) -> TypeId {
        let Some(&symbol_id) = self.bind.node_symbols.get(&node) else {
            return TypeId::UNKNOWN;
        };
        let declared = self.declared_type_of_symbol(symbol_id);

        let Node::Name { id: name } = self.arena.get(node) else { return declared };
        let Some(&flow_id) = self.bind.node_flow.get(&node) else { return declared };

        self.narrow_from(flow_id, name, declared)
    }

    /// Walk backward from `flow_id` through the flow graph, applying every
    /// condition predicate relevant to `subject` and merging at branch
    /// points. `fallback` is the type used where the walk can't improve on
    /// the declared type: an unrecognized predicate, a loop back-edge
    /// beyond the bounded widening step, or a node with no antecedents.
    fn narrow_from(&self, flow_id: FlowNodeId, subject: &str, fallback: TypeId) -> TypeId {
        let profile = RecursionProfile::for_property_lookup();
        self.narrow_from_guarded(flow_id, subject, fallback, 0, &profile)
    }

    fn narrow_from_guarded(&self, flow_id: FlowNodeId, subject: &str, fallback: TypeId, loop_depth: usize, profile: &RecursionProfile) -> TypeId {
        let Ok(_guard) = profile.enter() else { return fallback };
        let Some(flow_node) = self.bind.flow_nodes.get(flow_id) else { return fallback };

        if flow_node.flags.contains(FlowFlags::LOOP_LABEL) {
            if loop_depth >= narrowing::LOOP_WIDENING_BOUND {
                return fallback;
            }
            return narrowing::merge_antecedents(self.interner, &self.bind.flow_nodes, flow_id, |a| self.narrow_from_guarded(a, subject, fallback, loop_depth + 1, profile));
        }

        if let Some(branch_is_true) = narrowing::is_condition_node(flow_node.flags) {
            let Some(antecedent) = flow_node.antecedents.first().copied() else { return fallback };
            let incoming = self.narrow_from_guarded(antecedent, subject, fallback, loop_depth, profile);
            let Some(condition_node) = flow_node.node else { return incoming };
            let Some((predicate, polarity)) = narrowing::predicate_for_name(self.arena, condition_node, subject, &|ann| Some(self.eval_annotation(ann))) else {
                return incoming;
            };
            return narrowing::apply_predicate(self.interner, &predicate, branch_is_true, polarity, incoming);
        }

        if flow_node.flags.contains(FlowFlags::BRANCH_LABEL) || flow_node.flags.contains(FlowFlags::POST_FINALLY) {
            if flow_node.antecedents.is_empty() {
                return fallback;
            }
            return narrowing::merge_antecedents(self.interner, &self.bind.flow_nodes, flow_id, |a| self.narrow_from_guarded(a, subject, fallback, loop_depth, profile));
        }

        // ASSIGNMENT, CALL, WILDCARD_IMPORT, START: none of these narrow
        // `subject` further on their own node; keep walking to the single
        // antecedent (START has none, so this naturally bottoms out).
        match flow_node.antecedents.first().copied() {
            Some(antecedent) => self.narrow_from_guarded(antecedent, subject, fallback, loop_depth, profile),
            None => fallback,
        }
    }

    fn declared_type_of_symbol(&self, symbol_id: SymbolId) -> TypeId {
        let Some(symbol) = self.bind.symbols.get(symbol_id) else {
            return TypeId::UNKNOWN;
        };
        let declared: Vec<TypeId> = symbol.declarations.iter().map(|decl| self.type_of_declaration(decl)).collect();
        self.interner.union(declared)
    }

    fn type_of_declaration(&self, declaration: &Declaration) -> TypeId {
        match declaration {
            Declaration::Variable { annotation: Some(ann), .. } | Declaration::Parameter { annotation: Some(ann), .. } => self.eval_annotation(*ann),
            Declaration::Variable { .. } | Declaration::Parameter { .. } | Declaration::ImportAlias { .. } | Declaration::ImportFromAs { .. } => TypeId::UNKNOWN,
            Declaration::Function { node, .. } => self.type_of_function_def(*node),
            Declaration::Class { node, .. } => self.type_of_class_def(*node),
        }
    }

    fn type_of_function_def(&self, node: NodeIndex) -> TypeId {
        let Node::FunctionDef { params, returns, is_async, .. } = self.arena.get(node) else {
            return TypeId::UNKNOWN;
        };
        let sig = FunctionSig {
            parameters: classify_params(params).into_iter().map(|(param, kind)| Parameter { name: param.name.clone(), kind, annotated_type: param.annotation.map_or(TypeId::UNKNOWN, |a| self.eval_annotation(a)), has_default: param.default.is_some() }).collect(),
            return_type: returns.map_or(TypeId::UNKNOWN, |r| self.eval_annotation(r)),
            type_parameters: Vec::new(),
            is_async: *is_async,
        };
        self.interner.intern(TypeData::Function(sig))
    }

    /// A literal used as a value (not in annotation position, where
    /// [`Self::eval_annotation`]'s `StringLiteral` arm means something
    /// else entirely — a quoted forward reference). Resolves to a plain
    /// instance of the literal's builtin class; this crate doesn't build
    /// `Literal[...]`-narrowed types, so `"x"` and `"y"` both resolve to
    /// the same `str` instance type rather than distinct literal types.
    fn type_of_literal(&self, node: NodeIndex) -> TypeId {
        let class_name = match self.arena.get(node) {
            Node::NumberLiteral { kind, .. } => match kind {
                pyrite_common::numeric::NumericKind::Int => "int",
                pyrite_common::numeric::NumericKind::Float => "float",
                pyrite_common::numeric::NumericKind::Imaginary => "complex",
            },
            Node::StringLiteral { is_bytes, .. } => {
                if *is_bytes {
                    "bytes"
                } else {
                    "str"
                }
            }
            Node::FStringLiteral { .. } => "str",
            Node::BoolLiteral(_) => "bool",
            Node::EllipsisLiteral => "ellipsis",
            _ => return TypeId::UNKNOWN,
        };
        self.resolve_builtin_or_class_name(class_name)
    }

    /// `a + b`-shaped expressions: operand types feed
    /// `operators::binary_op_outcome`, which already knows the builtin
    /// numeric-tower/`str`/`bytes` promotion rules. Anything it can't
    /// decide (a user class, `Unknown`/`Any` operand) falls back to
    /// `Unknown` here — reporting the unsupported case is the checker's
    /// job, not this one's, since this crate only answers "what type."
    fn type_of_bin_op(&self, node: NodeIndex) -> TypeId {
        let Node::BinOpExpr { left, op, right } = self.arena.get(node) else {
            return TypeId::UNKNOWN;
        };
        let left_type = self.get_type(*left);
        let right_type = self.get_type(*right);
        match operators::binary_op_outcome(self.interner, *op, left_type, right_type) {
            operators::OperatorOutcome::Supported(result) => result,
            operators::OperatorOutcome::Unsupported | operators::OperatorOutcome::Indeterminate => TypeId::UNKNOWN,
        }
    }

    /// `a and b`/`a or c`: short-circuiting means the result is whichever
    /// operand actually ran, so the static type is the union of every
    /// operand's type.
    fn type_of_bool_op(&self, node: NodeIndex) -> TypeId {
        let Node::BoolOpExpr { values, .. } = self.arena.get(node) else {
            return TypeId::UNKNOWN;
        };
        let types = values.iter().map(|&value| self.get_type(value)).collect();
        self.interner.union(types)
    }

    /// A comparison chain (`a < b <= c`) always produces `bool`; operands
    /// are still evaluated so their own types are cached for anything
    /// else that inspects them (e.g. an operator-mismatch check on one
    /// leg of the chain).
    fn type_of_compare(&self, node: NodeIndex) -> TypeId {
        let Node::Compare { left, comparators, .. } = self.arena.get(node) else {
            return TypeId::UNKNOWN;
        };
        self.get_type(*left);
        for &comparator in comparators {
            self.get_type(comparator);
        }
        self.resolve_builtin_or_class_name("bool")
    }

    /// A call's type is its callee's return type: a plain function's
    /// declared return type, an overload set's first matching
    /// signature's return type (falling back to the last signature's per
    /// the spec's "report against the last overload" rule), or — calling
    /// a class itself — a fresh instance of that class.
    fn type_of_call(&self, node: NodeIndex) -> TypeId {
        let Node::Call { func, args, .. } = self.arena.get(node) else {
            return TypeId::UNKNOWN;
        };
        match self.interner.lookup(self.get_type(*func)) {
            Some(TypeData::Function(sig)) => sig.return_type,
            Some(TypeData::Class(class_id)) => self.interner.intern(TypeData::ClassInstance(class_id, crate::types::TypeVec::new())),
            Some(TypeData::OverloadedFunction(sigs)) => {
                let argument_types: Vec<TypeId> = args.iter().map(|&a| self.get_type(a)).collect();
                match crate::overloads::resolve(self.interner, &sigs, &argument_types) {
                    Ok((_, sig)) => sig.return_type,
                    Err(mismatch) => sigs.get(mismatch.reported_against).map_or(TypeId::UNKNOWN, |sig| sig.return_type),
                }
            }
            _ => TypeId::UNKNOWN,
        }
    }

    /// Resolve a `ClassDef`'s base-class expressions and body into a real
    /// `ClassData` (bases, own-declared members, C3-linearized MRO), then
    /// mint the class's `TypeId`. The shell is interned first and patched
    /// in place afterward so `mro::linearize` can see sibling bases'
    /// already-computed MROs (own `bases` is all it needs from `self`, so
    /// the still-empty shell never leaks into the computation).
    fn type_of_class_def(&self, node: NodeIndex) -> TypeId {
        let Node::ClassDef { name, bases, body, .. } = self.arena.get(node) else {
            return TypeId::UNKNOWN;
        };
        let base_ids: Vec<ClassId> = bases.iter().filter_map(|&base| self.base_class_id(base)).collect();
        let is_protocol = bases.iter().any(|&base| matches!(self.base_name(base), Some("Protocol")));

        let class_id = self.interner.intern_class(ClassData { module: self.module_name.clone(), name: name.clone(), bases: base_ids.clone(), mro: Vec::new(), members: FxHashMap::default(), metaclass: None, slots: None, is_protocol });
        let members = self.class_members(class_id, body, &base_ids);
        let mro = match mro::linearize(self.interner, class_id, &base_ids) {
            Ok(mro) => mro,
            Err(MroError::Inconsistent) => {
                self.mro_errors.borrow_mut().insert(node);
                vec![class_id, self.well_known_class_id("object")]
            }
        };

        self.interner.update_class(class_id, ClassData { module: self.module_name.clone(), name: name.clone(), bases: base_ids, mro, members, metaclass: None, slots: None, is_protocol });
        self.interner.intern(TypeData::Class(class_id))
    }

    /// Resolve a base-class expression to the `ClassId` it names: a bare
    /// name or attribute access resolving to a `ClassDef` declared in this
    /// file goes through [`Self::get_type`] (reusing its cycle guard, in
    /// case two classes in the same file name each other as bases);
    /// anything else — an imported class, a builtin exception, a name the
    /// binder couldn't resolve — falls back to a well-known placeholder
    /// class keyed by its bare name.
    fn base_class_id(&self, base_expr: NodeIndex) -> Option<ClassId> {
        if let Some(class_node) = self.local_class_def_for(base_expr) {
            if let Some(TypeData::Class(class_id)) = self.interner.lookup(self.get_type(class_node)) {
                return Some(class_id);
            }
        }
        let name = self.base_name(base_expr)?;
        Some(self.well_known_class_id(name))
    }

    fn base_name(&self, node: NodeIndex) -> Option<&str> {
        match self.arena.get(node) {
            Node::Name { id } => Some(id.as_str()),
            Node::Attribute { attr, .. } => Some(attr.as_str()),
            _ => None,
        }
    }

    fn local_class_def_for(&self, node: NodeIndex) -> Option<NodeIndex> {
        let symbol_id = *self.bind.node_symbols.get(&node)?;
        let symbol = self.bind.symbols.get(symbol_id)?;
        symbol.declarations.iter().find_map(|decl| match decl {
            Declaration::Class { node, .. } => Some(*node),
            _ => None,
        })
    }

    /// Build `class_id`'s own member table from its body's direct
    /// function/variable declarations — nested scopes don't contribute,
    /// and inherited members stay out of this table on purpose: lookups
    /// that need an ancestor's member walk the MRO themselves (see
    /// `assignability::mro_of`) rather than finding a merged copy here.
    fn class_members(&self, class_id: ClassId, body: &[NodeIndex], base_ids: &[ClassId]) -> FxHashMap<String, Member> {
        let mut members = FxHashMap::default();
        for &stmt in body {
            match self.arena.get(stmt) {
                Node::FunctionDef { name, decorators, .. } => {
                    let is_property = decorators.iter().any(|&d| decorator_name(self.arena, d) == Some("property"));
                    let is_abstract = decorators.iter().any(|&d| decorator_name(self.arena, d) == Some("abstractmethod"));
                    let kind = if is_property { MemberKind::Property } else { MemberKind::Method };
                    let overrides = self.find_ancestor_member_owner(base_ids, name);
                    members.insert(name.clone(), Member { declared_type: self.get_type(stmt), owner: class_id, overrides, is_abstract, kind });
                }
                Node::AnnAssign { target, annotation, .. } => {
                    if let Node::Name { id } = self.arena.get(*target) {
                        let overrides = self.find_ancestor_member_owner(base_ids, id);
                        members.insert(id.clone(), Member { declared_type: self.eval_annotation(*annotation), owner: class_id, overrides, is_abstract: false, kind: MemberKind::ClassVar });
                    }
                }
                Node::Assign { targets, value, .. } => {
                    if let [target] = targets.as_slice() {
                        if let Node::Name { id } = self.arena.get(*target) {
                            let overrides = self.find_ancestor_member_owner(base_ids, id);
                            members.insert(id.clone(), Member { declared_type: self.get_type(*value), owner: class_id, overrides, is_abstract: false, kind: MemberKind::ClassVar });
                        }
                    }
                }
                _ => {}
            }
        }
        members
    }

    /// The nearest base (in declaration order, walking each base's own MRO
    /// before moving to the next base) that already declares a member
    /// named `name`, if any. Used only to stamp `Member::overrides` on the
    /// subclass's own member; instance/attribute lookup doesn't go through
    /// this helper.
    fn find_ancestor_member_owner(&self, base_ids: &[ClassId], name: &str) -> Option<ClassId> {
        for &base_id in base_ids {
            let data = self.interner.lookup_class(base_id);
            let chain = if data.mro.is_empty() { vec![base_id] } else { data.mro };
            for ancestor in chain {
                if self.interner.lookup_class(ancestor).members.contains_key(name) {
                    return Some(ancestor);
                }
            }
        }
        None
    }

    /// Evaluate a type-annotation expression. Anything outside the
    /// recognized grammar (`X`, `Optional[X]`, `Union[X, ...]`,
    /// `list[X]`/`dict[K, V]`/`tuple[X, ...]`, a bare qualified name,
    /// `None`) falls back to `Unknown` per the spec's failure model.
    pub fn eval_annotation(&self, node: NodeIndex) -> TypeId {
        match self.arena.get(node) {
            Node::NoneLiteral => TypeId::NONE,
            Node::Name { id } => self.resolve_builtin_or_class_name(id),
            Node::Attribute { attr, .. } => self.resolve_builtin_or_class_name(attr),
            Node::StringLiteral { value, .. } => {
                // A quoted (deferred) annotation: re-parse its text isn't
                // available here without a fresh tokenize/parse pass, so
                // quoted forward references resolve to `Unknown` rather
                // than recursing into the scanner from the solver.
                let _ = value;
                TypeId::UNKNOWN
            }
            Node::Subscript { value, slice } => self.eval_subscript_annotation(*value, *slice),
            Node::BinOpExpr { left, op: BinaryOp::BitOr, right } => self.interner.union2(self.eval_annotation(*left), self.eval_annotation(*right)),
            _ => TypeId::UNKNOWN,
        }
    }

    fn eval_subscript_annotation(&self, value: NodeIndex, slice: NodeIndex) -> TypeId {
        let Node::Name { id: head } = self.arena.get(value) else {
            return TypeId::UNKNOWN;
        };
        let args = self.subscript_elements(slice);

        match head.as_str() {
            "Optional" if args.len() == 1 => self.interner.union2(self.eval_annotation(args[0]), TypeId::NONE),
            "Union" => {
                let members = args.iter().map(|a| self.eval_annotation(*a)).collect();
                self.interner.union(members)
            }
            "List" | "list" | "Set" | "set" | "FrozenSet" | "frozenset" | "Iterable" | "Sequence" => self.resolve_builtin_or_class_name(head),
            "Dict" | "dict" | "Mapping" => self.resolve_builtin_or_class_name(head),
            "Tuple" | "tuple" => {
                let has_ellipsis = args.last().is_some_and(|a| matches!(self.arena.get(*a), Node::EllipsisLiteral));
                let elements: crate::types::TypeVec = if has_ellipsis { args[..args.len() - 1].iter().map(|a| self.eval_annotation(*a)).collect() } else { args.iter().map(|a| self.eval_annotation(*a)).collect() };
                let variadicity = if has_ellipsis { crate::types::Variadicity::Unbounded } else { crate::types::Variadicity::Fixed };
                self.interner.intern(TypeData::Tuple(elements, variadicity))
            }
            _ => {
                let class_id = self.well_known_class_id(head);
                let type_args: crate::types::TypeVec = args.iter().map(|a| self.eval_annotation(*a)).collect();
                self.interner.intern(TypeData::ClassInstance(class_id, type_args))
            }
        }
    }

    fn subscript_elements(&self, slice: NodeIndex) -> Vec<NodeIndex> {
        match self.arena.get(slice) {
            Node::TupleExpr { elements, .. } => elements.clone(),
            _ => vec![slice],
        }
    }

    /// Resolve a bare name used in annotation position to a `Class`
    /// instance type, minting a fresh (member-less) `ClassId` the first
    /// time a given name is seen within this evaluator. Real class bodies
    /// declared in this file resolve through [`Self::type_of_class_def`]
    /// instead; this path only covers annotation references to names the
    /// evaluator hasn't (yet) walked a declaration for, e.g. stub-only or
    /// builtin types.
    fn resolve_builtin_or_class_name(&self, name: &str) -> TypeId {
        if name == "Any" {
            return TypeId::ANY;
        }
        if name == "None" {
            return TypeId::NONE;
        }
        if name == "NoReturn" || name == "Never" {
            return TypeId::NEVER;
        }
        let class_id = self.well_known_class_id(name);
        self.interner.intern(TypeData::ClassInstance(class_id, crate::types::TypeVec::new()))
    }

    fn well_known_class_id(&self, name: &str) -> ClassId {
        *self.well_known.borrow_mut().entry(intern_static(name)).or_insert_with(|| {
            self.interner.intern_class(ClassData { module: "builtins".to_string(), name: name.to_string(), bases: Vec::new(), mro: Vec::new(), members: FxHashMap::default(), metaclass: None, slots: None, is_protocol: false })
        })
    }
}

/// Extract a decorator expression's bare name (`@foo`, `@mod.foo`, or
/// `@foo(...)` all yield `"foo"`) for exact matching against a fixed set
/// of recognized decorator names.
fn decorator_name<'b>(arena: &'b NodeArena, node: NodeIndex) -> Option<&'b str> {
    match arena.get(node) {
        Node::Name { id } => Some(id.as_str()),
        Node::Attribute { attr, .. } => Some(attr.as_str()),
        Node::Call { func, .. } => decorator_name(arena, *func),
        _ => None,
    }
}

/// Leak `name` into a `&'static str` so it can key the well-known-class
/// cache. Annotation names are a small, bounded vocabulary per file (the
/// set of distinct type names actually written down), so this never grows
/// unbounded in practice.
fn intern_static(name: &str) -> &'static str {
    Box::leak(name.to_string().into_boxed_str())
}

/// Python's parameter-kind grammar is positional: a `/` marker retroactively
/// makes every preceding normal parameter positional-only; a `*` marker (or
/// `*args`) makes every following one keyword-only.
fn classify_params(params: &[pyrite_parser::node::Param]) -> Vec<(&pyrite_parser::node::Param, ParameterKind)> {
    let slash_index = params.iter().position(|p| p.kind == ParamKind::PositionalOnlyMarker);
    let mut seen_star = false;
    let mut out = Vec::with_capacity(params.len());

    for (index, param) in params.iter().enumerate() {
        match param.kind {
            ParamKind::PositionalOnlyMarker => continue,
            ParamKind::KeywordOnlyMarker => {
                seen_star = true;
            }
            ParamKind::VarArgs => {
                out.push((param, ParameterKind::VarPositional));
                seen_star = true;
            }
            ParamKind::KwArgs => out.push((param, ParameterKind::VarKeyword)),
            ParamKind::Normal => {
                let kind = if slash_index.is_some_and(|slash| index < slash) {
                    ParameterKind::PositionalOnly
                } else if seen_star {
                    ParameterKind::KeywordOnly
                } else {
                    ParameterKind::PositionalOrKeyword
                };
                out.push((param, kind));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../tests/evaluator_tests.rs"]
mod tests;
