//! Scope, symbol, and flow-graph construction: one pass over a module's
//! parse tree building three persistent side structures the later stages
//! query by id — scope tree, symbol table, and control-flow graph — rather
//! than re-walking the tree themselves.
//!
//! Left to right, top to bottom, single pass, the same shape as the teacher
//! binder's `bind_source_file` entry point — just without the declaration
//! merge-compatibility matrix, hoisting, and module-augmentation machinery
//! that TypeScript's module system needs and Python's doesn't.

use crate::file_features::FileFeatures;
use crate::flow::{FlowFlags, FlowNodeArena, FlowNodeId};
use crate::scope::{NameRedirect, Scope, ScopeArena, ScopeFlags, ScopeId, ScopeKind};
use crate::symbol::{Declaration, SymbolArena, SymbolFlags, SymbolId};
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule, Severity};
use pyrite_parser::node::{ExceptHandler, ImportAlias, MatchCase, Param, WithItem};
use pyrite_parser::{Dialect, Node, NodeArena, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};

/// Everything produced by binding one module.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BindResult {
    pub symbols: SymbolArena,
    pub scopes: ScopeArena,
    pub flow_nodes: FlowNodeArena,
    pub file_features: FileFeatures,
    pub module_scope_id: ScopeId,
    pub node_symbols: FxHashMap<NodeIndex, SymbolId>,
    pub node_scopes: FxHashMap<NodeIndex, ScopeId>,
    pub node_flow: FxHashMap<NodeIndex, FlowNodeId>,
    /// `Name` nodes that resolved to nothing in this file's own scopes —
    /// not necessarily an error, since a builtin or star-import might still
    /// supply the name once the evaluator runs.
    pub unresolved_names: FxHashSet<NodeIndex>,
    pub dunder_all: Option<Vec<String>>,
    pub diagnostics: Vec<Diagnostic>,
}

pub(crate) struct FunctionContext {
    pub(crate) is_async: bool,
    pub(crate) saw_yield: bool,
}

pub struct Binder<'a> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) file: &'a str,
    pub(crate) dialect: Dialect,
    pub(crate) symbols: SymbolArena,
    pub(crate) scopes: ScopeArena,
    pub(crate) flow_nodes: FlowNodeArena,
    pub(crate) file_features: FileFeatures,
    pub(crate) module_scope_id: ScopeId,
    pub(crate) node_symbols: FxHashMap<NodeIndex, SymbolId>,
    pub(crate) node_scopes: FxHashMap<NodeIndex, ScopeId>,
    pub(crate) node_flow: FxHashMap<NodeIndex, FlowNodeId>,
    pub(crate) unresolved_names: FxHashSet<NodeIndex>,
    pub(crate) dunder_all: Option<Vec<String>>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) current_scope_id: ScopeId,
    pub(crate) current_flow: FlowNodeId,
    pub(crate) unreachable_flow: FlowNodeId,
    pub(crate) function_stack: Vec<FunctionContext>,
}

/// Bind one module's parse tree.
#[must_use]
pub fn bind_module(arena: &NodeArena, root: NodeIndex, file: &str, dialect: Dialect) -> BindResult {
    let mut binder = Binder {
        arena,
        file,
        dialect,
        symbols: SymbolArena::new(),
        scopes: ScopeArena::new(),
        flow_nodes: FlowNodeArena::new(),
        file_features: FileFeatures::empty(),
        module_scope_id: ScopeId::NONE,
        node_symbols: FxHashMap::default(),
        node_scopes: FxHashMap::default(),
        node_flow: FxHashMap::default(),
        unresolved_names: FxHashSet::default(),
        dunder_all: None,
        diagnostics: Vec::new(),
        current_scope_id: ScopeId::NONE,
        current_flow: FlowNodeId::NONE,
        unreachable_flow: FlowNodeId::NONE,
        function_stack: Vec::new(),
    };

    let builtin_scope = binder.scopes.alloc(Scope::new(ScopeId::NONE, ScopeKind::Builtin, root));
    binder.module_scope_id = binder.scopes.alloc(Scope::new(builtin_scope, ScopeKind::Module, root));
    binder.current_scope_id = binder.module_scope_id;
    binder.node_scopes.insert(root, binder.module_scope_id);
    binder.unreachable_flow = binder.flow_nodes.alloc(FlowFlags::UNREACHABLE);
    binder.current_flow = binder.flow_nodes.alloc(FlowFlags::START);

    let body = match arena.get(root) {
        Node::Module { body } => body.clone(),
        _ => Vec::new(),
    };
    binder.prescan_global_nonlocal(&body);
    for stmt in &body {
        binder.bind_stmt(*stmt);
    }

    BindResult {
        symbols: binder.symbols,
        scopes: binder.scopes,
        flow_nodes: binder.flow_nodes,
        file_features: binder.file_features,
        module_scope_id: binder.module_scope_id,
        node_symbols: binder.node_symbols,
        node_scopes: binder.node_scopes,
        node_flow: binder.node_flow,
        unresolved_names: binder.unresolved_names,
        dunder_all: binder.dunder_all,
        diagnostics: binder.diagnostics,
    }
}

impl<'a> Binder<'a> {
    fn enter_scope(&mut self, kind: ScopeKind, owning_node: NodeIndex) -> ScopeId {
        let parent = self.current_scope_id;
        let id = self.scopes.alloc(Scope::new(parent, kind, owning_node));
        self.node_scopes.insert(owning_node, id);
        self.current_scope_id = id;
        id
    }

    fn exit_scope(&mut self) {
        if let Some(scope) = self.scopes.get(self.current_scope_id) {
            self.current_scope_id = scope.parent;
        }
    }

    fn current_scope_kind(&self) -> ScopeKind {
        self.scopes.get(self.current_scope_id).map_or(ScopeKind::Module, |s| s.kind)
    }

    fn mark_saw_yield(&mut self) {
        if let Some(ctx) = self.function_stack.last_mut() {
            ctx.saw_yield = true;
        }
    }

    fn resolve_name(&self, name: &str) -> Option<SymbolId> {
        for (i, scope_id) in self.scopes.ancestors(self.current_scope_id).enumerate() {
            let scope = self.scopes.get(scope_id)?;
            if i > 0 && scope.kind == ScopeKind::Class {
                continue;
            }
            if let Some(id) = scope.table.get(name) {
                return Some(id);
            }
        }
        None
    }

    fn bind_name_use(&mut self, node_idx: NodeIndex, name: &str) {
        self.node_flow.insert(node_idx, self.current_flow);
        match self.resolve_name(name) {
            Some(symbol_id) => {
                self.node_symbols.insert(node_idx, symbol_id);
            }
            None => {
                self.unresolved_names.insert(node_idx);
            }
        }
    }

    fn nearest_non_comprehension_scope(&self) -> ScopeId {
        self.scopes
            .ancestors(self.current_scope_id)
            .find(|&id| self.scopes.get(id).is_some_and(|s| s.kind != ScopeKind::ListComprehension))
            .unwrap_or(self.module_scope_id)
    }

    fn resolve_declare_target(&self, name: &str) -> Result<ScopeId, ()> {
        let redirect = self.scopes.get(self.current_scope_id).and_then(|s| s.redirects.get(name).copied());
        match redirect {
            Some(NameRedirect::Global) => Ok(self.module_scope_id),
            Some(NameRedirect::Nonlocal) => {
                let parent = self.scopes.get(self.current_scope_id).map_or(ScopeId::NONE, |s| s.parent);
                self.scopes
                    .ancestors(parent)
                    .find(|&id| self.scopes.get(id).is_some_and(|s| s.kind == ScopeKind::Function && s.table.has(name)))
                    .ok_or(())
            }
            None => Ok(self.current_scope_id),
        }
    }

    /// Declare `name` via `decl`, appending to an existing symbol's
    /// declaration list rather than checking for a compatible redeclaration
    /// the way a structurally-typed language would.
    pub(crate) fn declare(&mut self, name: &str, decl: Declaration, flags: SymbolFlags) -> SymbolId {
        let target_scope = match self.resolve_declare_target(name) {
            Ok(id) => id,
            Err(()) => {
                self.diagnostics.push(Diagnostic::new(
                    self.file.to_string(),
                    decl.span(),
                    Severity::Error,
                    DiagnosticRule::SyntaxError,
                    format!("no binding for nonlocal '{name}' found"),
                ));
                self.current_scope_id
            }
        };
        let existing = self.scopes.get(target_scope).and_then(|s| s.table.get(name));
        let symbol_id = if let Some(id) = existing {
            if let Some(symbol) = self.symbols.get_mut(id) {
                symbol.flags.insert(flags);
                symbol.declarations.push(decl.clone());
            }
            id
        } else {
            let id = self.symbols.alloc(name.to_string());
            if let Some(symbol) = self.symbols.get_mut(id) {
                symbol.flags.insert(flags);
                symbol.declarations.push(decl.clone());
            }
            if let Some(scope) = self.scopes.get_mut(target_scope) {
                scope.table.set(name.to_string(), id);
            }
            id
        };
        self.node_symbols.insert(decl.node(), symbol_id);
        symbol_id
    }

    fn declare_params(&mut self, owner: NodeIndex, params: &[Param]) {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        for param in params {
            if matches!(param.kind, pyrite_parser::node::ParamKind::PositionalOnlyMarker | pyrite_parser::node::ParamKind::KeywordOnlyMarker) {
                continue;
            }
            if !seen.insert(param.name.clone()) {
                self.diagnostics.push(Diagnostic::new(
                    self.file.to_string(),
                    param.span,
                    Severity::Error,
                    DiagnosticRule::SyntaxError,
                    format!("duplicate parameter '{}' in function definition", param.name),
                ));
                continue;
            }
            let decl = Declaration::Parameter { node: owner, span: param.span, annotation: param.annotation };
            self.declare(&param.name, decl, SymbolFlags::PARAMETER);
        }
    }

    /// Assignment target of any shape: a plain name, a nested tuple/list for
    /// destructuring, a starred remainder, or an attribute/subscript target
    /// (which declares nothing new — `obj.attr = x` reads `obj`, it doesn't
    /// bind a fresh symbol).
    pub(crate) fn bind_target(&mut self, target: NodeIndex) {
        enum Shape {
            Name(String),
            Nested(Vec<NodeIndex>),
            Starred(NodeIndex),
            Attribute(NodeIndex),
            Subscript(NodeIndex, NodeIndex),
            Other,
        }
        let shape = match self.arena.get(target) {
            Node::Name { id } => Shape::Name(id.clone()),
            Node::TupleExpr { elements } | Node::ListExpr { elements } => Shape::Nested(elements.clone()),
            Node::Starred { value } => Shape::Starred(*value),
            Node::Attribute { value, .. } => Shape::Attribute(*value),
            Node::Subscript { value, slice } => Shape::Subscript(*value, *slice),
            _ => Shape::Other,
        };
        match shape {
            Shape::Name(name) => {
                let span = self.arena.span(target);
                self.declare(&name, Declaration::Variable { node: target, span, annotation: None }, SymbolFlags::VARIABLE);
                let flow = self.create_flow_assignment(self.current_flow, target);
                self.current_flow = flow;
                self.node_flow.insert(target, flow);
            }
            Shape::Nested(elements) => {
                for element in elements {
                    self.bind_target(element);
                }
            }
            Shape::Starred(value) => self.bind_target(value),
            Shape::Attribute(value) => self.bind_expr(value),
            Shape::Subscript(value, slice) => {
                self.bind_expr(value);
                self.bind_expr(slice);
            }
            Shape::Other => {}
        }
    }

    fn bind_ann_target(&mut self, target: NodeIndex, annotation: NodeIndex) {
        if let Node::Name { id } = self.arena.get(target) {
            let name = id.clone();
            let span = self.arena.span(target);
            self.declare(&name, Declaration::Variable { node: target, span, annotation: Some(annotation) }, SymbolFlags::VARIABLE);
            let flow = self.create_flow_assignment(self.current_flow, target);
            self.current_flow = flow;
            self.node_flow.insert(target, flow);
        } else {
            self.bind_target(target);
        }
    }

    /// A walrus target binds into the nearest enclosing function or module
    /// scope, skipping any comprehension scopes — PEP 572's scoping carve-out.
    fn bind_walrus_target(&mut self, target: NodeIndex) {
        if let Node::Name { id } = self.arena.get(target) {
            let name = id.clone();
            let span = self.arena.span(target);
            let target_scope = self.nearest_non_comprehension_scope();
            let saved = self.current_scope_id;
            self.current_scope_id = target_scope;
            self.declare(&name, Declaration::Variable { node: target, span, annotation: None }, SymbolFlags::VARIABLE);
            self.current_scope_id = saved;
            let flow = self.create_flow_assignment(self.current_flow, target);
            self.current_flow = flow;
            self.node_flow.insert(target, flow);
        }
    }

    fn record_dunder_all(&mut self, value: NodeIndex) {
        let elements = match self.arena.get(value) {
            Node::ListExpr { elements } | Node::TupleExpr { elements } => elements.clone(),
            _ => return,
        };
        let mut names = Vec::with_capacity(elements.len());
        for element in elements {
            if let Node::StringLiteral { value, is_bytes: false } = self.arena.get(element) {
                names.push(value.clone());
            }
        }
        self.dunder_all = Some(names);
        if let Some(scope) = self.scopes.get_mut(self.module_scope_id) {
            scope.flags.insert(ScopeFlags::EXPORTS_ALL_VIA_DUNDER_ALL);
        }
    }

    fn prescan_global_nonlocal(&mut self, body: &[NodeIndex]) {
        let mut redirects = Vec::new();
        self.collect_global_nonlocal(body, &mut redirects);
        if let Some(scope) = self.scopes.get_mut(self.current_scope_id) {
            for (name, redirect) in redirects {
                scope.redirects.insert(name, redirect);
            }
        }
    }

    /// Walk statements that share the current scope (if/for/while/with/try/
    /// match don't introduce new scopes in Python) collecting every
    /// `global`/`nonlocal` name. Stops at `def`/`class`/`lambda` boundaries:
    /// a directive inside one of those applies to *its* scope, not this one.
    fn collect_global_nonlocal(&self, stmts: &[NodeIndex], out: &mut Vec<(String, NameRedirect)>) {
        for &stmt in stmts {
            match self.arena.get(stmt) {
                Node::Global { names } => out.extend(names.iter().cloned().map(|n| (n, NameRedirect::Global))),
                Node::Nonlocal { names } => out.extend(names.iter().cloned().map(|n| (n, NameRedirect::Nonlocal))),
                Node::If { body, or_else, .. } | Node::While { body, or_else, .. } => {
                    self.collect_global_nonlocal(body, out);
                    self.collect_global_nonlocal(or_else, out);
                }
                Node::For { body, or_else, .. } => {
                    self.collect_global_nonlocal(body, out);
                    self.collect_global_nonlocal(or_else, out);
                }
                Node::With { body, .. } => self.collect_global_nonlocal(body, out),
                Node::Try { body, handlers, or_else, finally, .. } => {
                    self.collect_global_nonlocal(body, out);
                    for handler in handlers {
                        self.collect_global_nonlocal(&handler.body, out);
                    }
                    self.collect_global_nonlocal(or_else, out);
                    self.collect_global_nonlocal(finally, out);
                }
                Node::Match { cases, .. } => {
                    for case in cases {
                        self.collect_global_nonlocal(&case.body, out);
                    }
                }
                _ => {}
            }
        }
    }

    fn bind_function_def(&mut self, node_idx: NodeIndex, name: &str, is_async: bool, decorators: &[NodeIndex], params: &[Param], _returns: Option<NodeIndex>, body: &[NodeIndex]) {
        for decorator in decorators {
            self.bind_expr(*decorator);
        }
        for param in params {
            if let Some(default) = param.default {
                self.bind_expr(default);
            }
        }
        // `returns` is a deferred annotation: parsed, never walked here.

        let mut flags = SymbolFlags::FUNCTION;
        if self.current_scope_kind() == ScopeKind::Class {
            flags |= SymbolFlags::CLASS_MEMBER;
        }
        let span = self.arena.span(node_idx);
        self.declare(name, Declaration::Function { node: node_idx, span }, flags);
        let decl_flow = self.create_flow_assignment(self.current_flow, node_idx);
        self.current_flow = decl_flow;

        let outer_flow = self.current_flow;
        self.enter_scope(ScopeKind::Function, node_idx);
        if is_async {
            if let Some(scope) = self.scopes.get_mut(self.current_scope_id) {
                scope.flags.insert(ScopeFlags::IN_ASYNC);
            }
        }
        self.function_stack.push(FunctionContext { is_async, saw_yield: false });
        self.current_flow = self.flow_nodes.alloc(FlowFlags::START);
        self.prescan_global_nonlocal(body);
        self.declare_params(node_idx, params);
        for stmt in body {
            self.bind_stmt(*stmt);
        }
        let ctx = self.function_stack.pop().expect("pushed immediately above");
        if ctx.saw_yield {
            if ctx.is_async {
                self.file_features.insert(FileFeatures::ASYNC_GENERATOR_FUNCTIONS);
                if !self.dialect.python_version.supports_async_generators() {
                    self.diagnostics.push(Diagnostic::new(
                        self.file.to_string(),
                        span,
                        Severity::Error,
                        DiagnosticRule::SyntaxError,
                        "async generator functions require a newer Python version".to_string(),
                    ));
                }
            } else {
                self.file_features.insert(FileFeatures::GENERATOR_FUNCTIONS);
            }
        }
        self.exit_scope();
        self.current_flow = outer_flow;
    }

    fn bind_lambda(&mut self, node_idx: NodeIndex, params: &[Param], body: NodeIndex) {
        for param in params {
            if let Some(default) = param.default {
                self.bind_expr(default);
            }
        }
        let outer_flow = self.current_flow;
        self.enter_scope(ScopeKind::Function, node_idx);
        self.function_stack.push(FunctionContext { is_async: false, saw_yield: false });
        self.current_flow = self.flow_nodes.alloc(FlowFlags::START);
        self.declare_params(node_idx, params);
        self.bind_expr(body);
        self.function_stack.pop();
        self.exit_scope();
        self.current_flow = outer_flow;
    }

    fn bind_class_def(&mut self, node_idx: NodeIndex, name: &str, decorators: &[NodeIndex], bases: &[NodeIndex], keywords: &[(String, NodeIndex)], body: &[NodeIndex]) {
        for decorator in decorators {
            self.bind_expr(*decorator);
        }
        for base in bases {
            self.bind_expr(*base);
        }
        for (_, value) in keywords {
            self.bind_expr(*value);
        }
        let mut flags = SymbolFlags::CLASS;
        if self.current_scope_kind() == ScopeKind::Class {
            flags |= SymbolFlags::CLASS_MEMBER;
        }
        let span = self.arena.span(node_idx);
        self.declare(name, Declaration::Class { node: node_idx, span }, flags);
        let decl_flow = self.create_flow_assignment(self.current_flow, node_idx);
        self.current_flow = decl_flow;

        let outer_flow = self.current_flow;
        self.enter_scope(ScopeKind::Class, node_idx);
        self.current_flow = self.flow_nodes.alloc(FlowFlags::START);
        for stmt in body {
            self.bind_stmt(*stmt);
        }
        self.exit_scope();
        self.current_flow = outer_flow;
    }

    /// A list/set/dict/generator comprehension. The outermost `for`'s
    /// iterable is evaluated in the enclosing scope; everything else
    /// (targets, guards, the element) lives in the comprehension's own
    /// scope.
    fn bind_comprehension(&mut self, node_idx: NodeIndex) {
        let (element, value_for_dict, generators) = match self.arena.get(node_idx) {
            Node::Comprehension { element, value_for_dict, generators, .. } => (*element, *value_for_dict, generators.clone()),
            _ => return,
        };
        if generators.is_empty() {
            return;
        }
        self.bind_expr(generators[0].iter);
        let outer_flow = self.current_flow;
        self.enter_scope(ScopeKind::ListComprehension, node_idx);
        self.current_flow = self.flow_nodes.alloc(FlowFlags::START);
        for (i, generator) in generators.iter().enumerate() {
            if generator.is_async {
                if let Some(scope) = self.scopes.get_mut(self.current_scope_id) {
                    scope.flags.insert(ScopeFlags::IN_ASYNC);
                }
            }
            self.bind_target(generator.target);
            if i > 0 {
                self.bind_expr(generator.iter);
            }
            for condition in &generator.ifs {
                self.bind_expr(*condition);
            }
        }
        self.bind_expr(element);
        if let Some(value) = value_for_dict {
            self.bind_expr(value);
        }
        self.exit_scope();
        self.current_flow = outer_flow;
    }

    fn bind_for(&mut self, target: NodeIndex, iter: NodeIndex, body: &[NodeIndex], or_else: &[NodeIndex]) {
        self.bind_expr(iter);
        let pre_loop = self.current_flow;
        let loop_start = self.create_loop_label();
        self.add_antecedent(loop_start, pre_loop);
        self.current_flow = loop_start;
        self.bind_target(target);
        for stmt in body {
            self.bind_stmt(*stmt);
        }
        self.add_antecedent(loop_start, self.current_flow);
        let after_loop = self.create_branch_label();
        self.add_antecedent(after_loop, loop_start);
        self.current_flow = after_loop;
        for stmt in or_else {
            self.bind_stmt(*stmt);
        }
    }

    fn bind_while(&mut self, test: NodeIndex, body: &[NodeIndex], or_else: &[NodeIndex]) {
        let pre_loop = self.current_flow;
        let loop_start = self.create_loop_label();
        self.add_antecedent(loop_start, pre_loop);
        self.current_flow = loop_start;
        self.bind_expr(test);
        let true_branch = self.create_flow_condition(true, loop_start, test);
        let false_branch = self.create_flow_condition(false, loop_start, test);
        self.current_flow = true_branch;
        for stmt in body {
            self.bind_stmt(*stmt);
        }
        self.add_antecedent(loop_start, self.current_flow);
        self.current_flow = false_branch;
        for stmt in or_else {
            self.bind_stmt(*stmt);
        }
    }

    fn bind_if(&mut self, test: NodeIndex, body: &[NodeIndex], or_else: &[NodeIndex]) {
        self.bind_expr(test);
        let pre = self.current_flow;
        let true_branch = self.create_flow_condition(true, pre, test);
        let false_branch = self.create_flow_condition(false, pre, test);
        self.current_flow = true_branch;
        for stmt in body {
            self.bind_stmt(*stmt);
        }
        let after_then = self.current_flow;
        self.current_flow = false_branch;
        for stmt in or_else {
            self.bind_stmt(*stmt);
        }
        let after_else = self.current_flow;
        let merge = self.create_branch_label();
        self.add_antecedent(merge, after_then);
        self.add_antecedent(merge, after_else);
        self.current_flow = merge;
    }

    fn bind_try(&mut self, try_node: NodeIndex, body: &[NodeIndex], handlers: &[ExceptHandler], or_else: &[NodeIndex], finally: &[NodeIndex]) {
        let pre = self.current_flow;
        for stmt in body {
            self.bind_stmt(*stmt);
        }
        let after_try = self.current_flow;
        let mut handler_flows = Vec::with_capacity(handlers.len());
        for handler in handlers {
            self.current_flow = pre;
            if let Some(exc_type) = handler.exc_type {
                self.bind_expr(exc_type);
            }
            if let Some(name) = &handler.name {
                self.declare(name, Declaration::Variable { node: try_node, span: handler.span, annotation: None }, SymbolFlags::VARIABLE);
            }
            for stmt in &handler.body {
                self.bind_stmt(*stmt);
            }
            handler_flows.push(self.current_flow);
        }
        let mut antecedents = vec![after_try];
        antecedents.extend(handler_flows);
        let post_finally = self.create_post_finally(&antecedents);
        self.current_flow = post_finally;
        for stmt in or_else {
            self.bind_stmt(*stmt);
        }
        for stmt in finally {
            self.bind_stmt(*stmt);
        }
    }

    fn bind_match(&mut self, subject: NodeIndex, cases: &[MatchCase]) {
        self.bind_expr(subject);
        let pre = self.current_flow;
        let mut case_flows = Vec::with_capacity(cases.len());
        for case in cases {
            self.current_flow = pre;
            self.bind_pattern(case.pattern);
            if let Some(guard) = case.guard {
                self.bind_expr(guard);
            }
            for stmt in &case.body {
                self.bind_stmt(*stmt);
            }
            case_flows.push(self.current_flow);
        }
        let merge = self.create_branch_label();
        for flow in case_flows {
            self.add_antecedent(merge, flow);
        }
        self.add_antecedent(merge, pre);
        self.current_flow = merge;
    }

    /// Pattern captures bind directly into the enclosing function/module
    /// scope — `match`/`case` introduces no scope of its own in Python.
    fn bind_pattern(&mut self, node_idx: NodeIndex) {
        enum Shape {
            Capture(Option<String>),
            Value(NodeIndex),
            Sequence(Vec<NodeIndex>),
            Mapping { keys: Vec<NodeIndex>, values: Vec<NodeIndex>, rest: Option<String> },
            Class { cls: NodeIndex, positional: Vec<NodeIndex>, keyword: Vec<(String, NodeIndex)> },
            Or(Vec<NodeIndex>),
            Other,
        }
        let shape = match self.arena.get(node_idx) {
            Node::PatternCapture { name } => Shape::Capture(name.clone()),
            Node::PatternValue { value } => Shape::Value(*value),
            Node::PatternSequence { elements } => Shape::Sequence(elements.clone()),
            Node::PatternMapping { keys, values, rest } => Shape::Mapping { keys: keys.clone(), values: values.clone(), rest: rest.clone() },
            Node::PatternClass { cls, positional, keyword } => Shape::Class { cls: *cls, positional: positional.clone(), keyword: keyword.clone() },
            Node::PatternOr { alternatives } => Shape::Or(alternatives.clone()),
            _ => Shape::Other,
        };
        match shape {
            Shape::Capture(Some(name)) if name != "_" => {
                let span = self.arena.span(node_idx);
                self.declare(&name, Declaration::Variable { node: node_idx, span, annotation: None }, SymbolFlags::VARIABLE);
                let flow = self.create_flow_assignment(self.current_flow, node_idx);
                self.current_flow = flow;
            }
            Shape::Capture(_) => {}
            Shape::Value(value) => self.bind_expr(value),
            Shape::Sequence(elements) => {
                for element in elements {
                    self.bind_pattern(element);
                }
            }
            Shape::Mapping { keys, values, rest } => {
                for key in keys {
                    self.bind_expr(key);
                }
                for value in values {
                    self.bind_pattern(value);
                }
                if let Some(rest) = rest {
                    let span = self.arena.span(node_idx);
                    self.declare(&rest, Declaration::Variable { node: node_idx, span, annotation: None }, SymbolFlags::VARIABLE);
                }
            }
            Shape::Class { cls, positional, keyword } => {
                self.bind_expr(cls);
                for pattern in positional {
                    self.bind_pattern(pattern);
                }
                for (_, pattern) in keyword {
                    self.bind_pattern(pattern);
                }
            }
            Shape::Or(alternatives) => {
                for alternative in alternatives {
                    self.bind_pattern(alternative);
                }
            }
            Shape::Other => {}
        }
    }

    pub(crate) fn bind_stmt(&mut self, node_idx: NodeIndex) {
        enum Shape {
            FunctionDef { name: String, is_async: bool, decorators: Vec<NodeIndex>, params: Vec<Param>, returns: Option<NodeIndex>, body: Vec<NodeIndex> },
            ClassDef { name: String, decorators: Vec<NodeIndex>, bases: Vec<NodeIndex>, keywords: Vec<(String, NodeIndex)>, body: Vec<NodeIndex> },
            Return(Option<NodeIndex>),
            Delete(Vec<NodeIndex>),
            Assign { targets: Vec<NodeIndex>, value: NodeIndex },
            AugAssign { target: NodeIndex, value: NodeIndex },
            AnnAssign { target: NodeIndex, annotation: NodeIndex, value: Option<NodeIndex> },
            TypeAlias { name: String },
            For { target: NodeIndex, iter: NodeIndex, body: Vec<NodeIndex>, or_else: Vec<NodeIndex> },
            While { test: NodeIndex, body: Vec<NodeIndex>, or_else: Vec<NodeIndex> },
            If { test: NodeIndex, body: Vec<NodeIndex>, or_else: Vec<NodeIndex> },
            With { items: Vec<WithItem>, body: Vec<NodeIndex> },
            Match { subject: NodeIndex, cases: Vec<MatchCase> },
            Raise { exc: Option<NodeIndex>, cause: Option<NodeIndex> },
            Try { body: Vec<NodeIndex>, handlers: Vec<ExceptHandler>, or_else: Vec<NodeIndex>, finally: Vec<NodeIndex> },
            Assert { test: NodeIndex, msg: Option<NodeIndex> },
            Import(Vec<ImportAlias>),
            ImportFrom { module: Option<String>, names: Vec<ImportAlias> },
            GlobalOrNonlocal,
            ExprStatement(NodeIndex),
            ControlTransfer,
            Other,
        }

        let shape = match self.arena.get(node_idx) {
            Node::FunctionDef { name, is_async, decorators, params, returns, body, .. } => Shape::FunctionDef {
                name: name.clone(),
                is_async: *is_async,
                decorators: decorators.clone(),
                params: params.clone(),
                returns: *returns,
                body: body.clone(),
            },
            Node::ClassDef { name, decorators, bases, keywords, body, .. } => Shape::ClassDef {
                name: name.clone(),
                decorators: decorators.clone(),
                bases: bases.clone(),
                keywords: keywords.clone(),
                body: body.clone(),
            },
            Node::Return { value } => Shape::Return(*value),
            Node::Delete { targets } => Shape::Delete(targets.clone()),
            Node::Assign { targets, value, .. } => Shape::Assign { targets: targets.clone(), value: *value },
            Node::AugAssign { target, value, .. } => Shape::AugAssign { target: *target, value: *value },
            Node::AnnAssign { target, annotation, value } => Shape::AnnAssign { target: *target, annotation: *annotation, value: *value },
            Node::TypeAliasStatement { name, .. } => Shape::TypeAlias { name: name.clone() },
            Node::For { target, iter, body, or_else, .. } => Shape::For { target: *target, iter: *iter, body: body.clone(), or_else: or_else.clone() },
            Node::While { test, body, or_else } => Shape::While { test: *test, body: body.clone(), or_else: or_else.clone() },
            Node::If { test, body, or_else } => Shape::If { test: *test, body: body.clone(), or_else: or_else.clone() },
            Node::With { items, body, .. } => Shape::With { items: items.clone(), body: body.clone() },
            Node::Match { subject, cases } => Shape::Match { subject: *subject, cases: cases.clone() },
            Node::Raise { exc, cause } => Shape::Raise { exc: *exc, cause: *cause },
            Node::Try { body, handlers, or_else, finally, .. } => Shape::Try { body: body.clone(), handlers: handlers.clone(), or_else: or_else.clone(), finally: finally.clone() },
            Node::Assert { test, msg } => Shape::Assert { test: *test, msg: *msg },
            Node::Import { names } => Shape::Import(names.clone()),
            Node::ImportFrom { module, names, .. } => Shape::ImportFrom { module: module.clone(), names: names.clone() },
            Node::Global { .. } | Node::Nonlocal { .. } => Shape::GlobalOrNonlocal,
            Node::ExprStatement { value } => Shape::ExprStatement(*value),
            Node::Break | Node::Continue => Shape::ControlTransfer,
            _ => Shape::Other,
        };

        match shape {
            Shape::FunctionDef { name, is_async, decorators, params, returns, body } => {
                self.bind_function_def(node_idx, &name, is_async, &decorators, &params, returns, &body);
            }
            Shape::ClassDef { name, decorators, bases, keywords, body } => {
                self.bind_class_def(node_idx, &name, &decorators, &bases, &keywords, &body);
            }
            Shape::Return(value) => {
                if self.function_stack.is_empty() {
                    let span = self.arena.span(node_idx);
                    self.diagnostics.push(Diagnostic::new(self.file.to_string(), span, Severity::Error, DiagnosticRule::SyntaxError, "'return' outside function".to_string()));
                }
                if let Some(value) = value {
                    self.bind_expr(value);
                }
                self.current_flow = self.unreachable_flow;
            }
            Shape::Delete(targets) => {
                for target in targets {
                    self.bind_expr(target);
                }
            }
            Shape::Assign { targets, value } => {
                self.bind_expr(value);
                for &target in &targets {
                    self.bind_target(target);
                }
                if self.current_scope_id == self.module_scope_id {
                    if let [single] = targets.as_slice() {
                        if let Node::Name { id } = self.arena.get(*single) {
                            if id == "__all__" {
                                self.record_dunder_all(value);
                            }
                        }
                    }
                }
            }
            Shape::AugAssign { target, value } => {
                self.bind_expr(value);
                self.bind_expr(target);
                self.bind_target(target);
            }
            Shape::AnnAssign { target, annotation, value } => {
                if let Some(value) = value {
                    self.bind_expr(value);
                }
                self.bind_ann_target(target, annotation);
            }
            Shape::TypeAlias { name } => {
                // The aliased value is as deferred as an annotation: parsed,
                // evaluated only when something asks for this alias's type.
                let span = self.arena.span(node_idx);
                self.declare(&name, Declaration::Variable { node: node_idx, span, annotation: None }, SymbolFlags::VARIABLE);
            }
            Shape::For { target, iter, body, or_else } => self.bind_for(target, iter, &body, &or_else),
            Shape::While { test, body, or_else } => self.bind_while(test, &body, &or_else),
            Shape::If { test, body, or_else } => self.bind_if(test, &body, &or_else),
            Shape::With { items, body } => {
                for item in &items {
                    self.bind_expr(item.context_expr);
                    if let Some(vars) = item.optional_vars {
                        self.bind_target(vars);
                    }
                }
                for stmt in body {
                    self.bind_stmt(stmt);
                }
            }
            Shape::Match { subject, cases } => self.bind_match(subject, &cases),
            Shape::Raise { exc, cause } => {
                if let Some(exc) = exc {
                    self.bind_expr(exc);
                }
                if let Some(cause) = cause {
                    self.bind_expr(cause);
                }
                self.current_flow = self.unreachable_flow;
            }
            Shape::Try { body, handlers, or_else, finally } => self.bind_try(node_idx, &body, &handlers, &or_else, &finally),
            Shape::Assert { test, msg } => {
                self.bind_expr(test);
                if let Some(msg) = msg {
                    self.bind_expr(msg);
                }
            }
            Shape::Import(names) => self.bind_import(node_idx, &names),
            Shape::ImportFrom { module, names } => self.bind_import_from(node_idx, module.as_deref(), &names),
            Shape::GlobalOrNonlocal => {}
            Shape::ExprStatement(value) => self.bind_expr(value),
            Shape::ControlTransfer => self.current_flow = self.unreachable_flow,
            Shape::Other => {}
        }
    }

    pub(crate) fn bind_expr(&mut self, node_idx: NodeIndex) {
        enum Shape {
            Name(String),
            NamedExpr { target: NodeIndex, value: NodeIndex },
            Lambda { params: Vec<Param>, body: NodeIndex },
            Comprehension,
            Call { func: NodeIndex, args: Vec<NodeIndex>, keywords: Vec<(Option<String>, NodeIndex)> },
            Yield(Option<NodeIndex>),
            YieldFrom(NodeIndex),
            Generic(Vec<NodeIndex>),
        }
        let shape = match self.arena.get(node_idx) {
            Node::Name { id } => Shape::Name(id.clone()),
            Node::NamedExpr { target, value } => Shape::NamedExpr { target: *target, value: *value },
            Node::LambdaExpr { params, body } => Shape::Lambda { params: params.clone(), body: *body },
            Node::Comprehension { .. } => Shape::Comprehension,
            Node::Call { func, args, keywords } => Shape::Call { func: *func, args: args.clone(), keywords: keywords.clone() },
            Node::Yield { value } => Shape::Yield(*value),
            Node::YieldFrom { value } => Shape::YieldFrom(*value),
            other => Shape::Generic(other.children()),
        };
        match shape {
            Shape::Name(id) => self.bind_name_use(node_idx, &id),
            Shape::NamedExpr { target, value } => {
                self.bind_expr(value);
                self.file_features.insert(FileFeatures::WALRUS_TARGETS);
                self.bind_walrus_target(target);
            }
            Shape::Lambda { params, body } => self.bind_lambda(node_idx, &params, body),
            Shape::Comprehension => self.bind_comprehension(node_idx),
            Shape::Call { func, args, keywords } => {
                self.bind_expr(func);
                for arg in args {
                    self.bind_expr(arg);
                }
                for (_, value) in keywords {
                    self.bind_expr(value);
                }
                let call_flow = self.create_flow_call(self.current_flow, node_idx);
                self.current_flow = call_flow;
            }
            Shape::Yield(value) => {
                self.mark_saw_yield();
                if let Some(value) = value {
                    self.bind_expr(value);
                }
            }
            Shape::YieldFrom(value) => {
                self.mark_saw_yield();
                self.bind_expr(value);
            }
            Shape::Generic(children) => {
                for child in children {
                    self.bind_expr(child);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod tests;
