//! Parse tree node kinds.
//!
//! Each variant owns its children as [`NodeIndex`] values rather than
//! nested `Node`s — see `arena` for why. Leaf data (names, literal text,
//! operator kind) is stored inline since it doesn't need its own arena
//! slot.

use crate::arena::NodeIndex;
use pyrite_common::numeric::NumericKind;
use pyrite_common::span::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    MatMul,
    BitAnd,
    BitOr,
    BitXor,
    LShift,
    RShift,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnaryOp {
    Pos,
    Neg,
    Invert,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Is,
    IsNot,
    In,
    NotIn,
}

/// A parameter of a function definition or lambda.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Param {
    pub name: String,
    pub annotation: Option<NodeIndex>,
    pub default: Option<NodeIndex>,
    pub kind: ParamKind,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ParamKind {
    Normal,
    /// After a bare `*` or before a `/` marker — positional-only / keyword-only.
    PositionalOnlyMarker,
    KeywordOnlyMarker,
    /// `*args`
    VarArgs,
    /// `**kwargs`
    KwArgs,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ExceptHandler {
    pub exc_type: Option<NodeIndex>,
    pub name: Option<String>,
    pub body: Vec<NodeIndex>,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MatchCase {
    pub pattern: NodeIndex,
    pub guard: Option<NodeIndex>,
    pub body: Vec<NodeIndex>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct WithItem {
    pub context_expr: NodeIndex,
    pub optional_vars: Option<NodeIndex>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ImportAlias {
    pub name: String,
    pub asname: Option<String>,
    pub span: Span,
}

/// A trailing `# type: T` comment attached to a statement that supports one
/// (assignment, `for` target, `with` item) — recorded but not evaluated
/// until something asks for the statement's declared type.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TypeComment {
    pub text: String,
    pub span: Span,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Node {
    // --- Module ---
    Module {
        body: Vec<NodeIndex>,
    },

    // --- Statements ---
    FunctionDef {
        name: String,
        is_async: bool,
        decorators: Vec<NodeIndex>,
        type_params: Vec<String>,
        params: Vec<Param>,
        returns: Option<NodeIndex>,
        body: Vec<NodeIndex>,
    },
    ClassDef {
        name: String,
        decorators: Vec<NodeIndex>,
        type_params: Vec<String>,
        bases: Vec<NodeIndex>,
        keywords: Vec<(String, NodeIndex)>,
        body: Vec<NodeIndex>,
    },
    Return {
        value: Option<NodeIndex>,
    },
    Delete {
        targets: Vec<NodeIndex>,
    },
    Assign {
        targets: Vec<NodeIndex>,
        value: NodeIndex,
        type_comment: Option<TypeComment>,
    },
    AugAssign {
        target: NodeIndex,
        op: BinaryOp,
        value: NodeIndex,
    },
    AnnAssign {
        target: NodeIndex,
        annotation: NodeIndex,
        value: Option<NodeIndex>,
    },
    TypeAliasStatement {
        name: String,
        type_params: Vec<String>,
        value: NodeIndex,
    },
    For {
        is_async: bool,
        target: NodeIndex,
        iter: NodeIndex,
        body: Vec<NodeIndex>,
        or_else: Vec<NodeIndex>,
        type_comment: Option<TypeComment>,
    },
    While {
        test: NodeIndex,
        body: Vec<NodeIndex>,
        or_else: Vec<NodeIndex>,
    },
    If {
        test: NodeIndex,
        body: Vec<NodeIndex>,
        or_else: Vec<NodeIndex>,
    },
    With {
        is_async: bool,
        items: Vec<WithItem>,
        body: Vec<NodeIndex>,
        type_comment: Option<TypeComment>,
    },
    Match {
        subject: NodeIndex,
        cases: Vec<MatchCase>,
    },
    Raise {
        exc: Option<NodeIndex>,
        cause: Option<NodeIndex>,
    },
    Try {
        body: Vec<NodeIndex>,
        handlers: Vec<ExceptHandler>,
        or_else: Vec<NodeIndex>,
        finally: Vec<NodeIndex>,
        is_star: bool,
    },
    Assert {
        test: NodeIndex,
        msg: Option<NodeIndex>,
    },
    Import {
        names: Vec<ImportAlias>,
    },
    ImportFrom {
        module: Option<String>,
        level: u32,
        names: Vec<ImportAlias>,
    },
    Global {
        names: Vec<String>,
    },
    Nonlocal {
        names: Vec<String>,
    },
    ExprStatement {
        value: NodeIndex,
    },
    Pass,
    Break,
    Continue,

    // --- Expressions ---
    BoolOpExpr {
        op: BoolOp,
        values: Vec<NodeIndex>,
    },
    BinOpExpr {
        left: NodeIndex,
        op: BinaryOp,
        right: NodeIndex,
    },
    UnaryOpExpr {
        op: UnaryOp,
        operand: NodeIndex,
    },
    LambdaExpr {
        params: Vec<Param>,
        body: NodeIndex,
    },
    IfExpr {
        test: NodeIndex,
        body: NodeIndex,
        or_else: NodeIndex,
    },
    DictExpr {
        keys: Vec<Option<NodeIndex>>,
        values: Vec<NodeIndex>,
    },
    SetExpr {
        elements: Vec<NodeIndex>,
    },
    ListExpr {
        elements: Vec<NodeIndex>,
    },
    TupleExpr {
        elements: Vec<NodeIndex>,
    },
    /// `[x for x in y if z]` and its dict/set/generator cousins. `is_async`
    /// marks an `async for` clause; comprehensions can have multiple `for`
    /// clauses each with their own `if` filters, flattened here as parallel
    /// vectors indexed together.
    Comprehension {
        element: NodeIndex,
        value_for_dict: Option<NodeIndex>,
        kind: ComprehensionKind,
        generators: Vec<ComprehensionGenerator>,
    },
    Await {
        value: NodeIndex,
    },
    Yield {
        value: Option<NodeIndex>,
    },
    YieldFrom {
        value: NodeIndex,
    },
    Compare {
        left: NodeIndex,
        ops: Vec<CompareOp>,
        comparators: Vec<NodeIndex>,
    },
    Call {
        func: NodeIndex,
        args: Vec<NodeIndex>,
        keywords: Vec<(Option<String>, NodeIndex)>,
    },
    NumberLiteral {
        kind: NumericKind,
        text: String,
    },
    StringLiteral {
        value: String,
        is_bytes: bool,
    },
    FStringLiteral {
        parts: Vec<FStringPart>,
    },
    BoolLiteral(bool),
    NoneLiteral,
    EllipsisLiteral,
    Attribute {
        value: NodeIndex,
        attr: String,
    },
    Subscript {
        value: NodeIndex,
        slice: NodeIndex,
    },
    Slice {
        lower: Option<NodeIndex>,
        upper: Option<NodeIndex>,
        step: Option<NodeIndex>,
    },
    Starred {
        value: NodeIndex,
    },
    Name {
        id: String,
    },
    NamedExpr {
        target: NodeIndex,
        value: NodeIndex,
    },

    // --- Patterns (match statement) ---
    PatternCapture {
        name: Option<String>,
    },
    PatternValue {
        value: NodeIndex,
    },
    PatternSequence {
        elements: Vec<NodeIndex>,
    },
    PatternMapping {
        keys: Vec<NodeIndex>,
        values: Vec<NodeIndex>,
        rest: Option<String>,
    },
    PatternClass {
        cls: NodeIndex,
        positional: Vec<NodeIndex>,
        keyword: Vec<(String, NodeIndex)>,
    },
    PatternOr {
        alternatives: Vec<NodeIndex>,
    },

    /// A node synthesized by error recovery at `span`; the parser resyncs
    /// to the next statement boundary after inserting one of these.
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ComprehensionKind {
    List,
    Set,
    Dict,
    Generator,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ComprehensionGenerator {
    pub is_async: bool,
    pub target: NodeIndex,
    pub iter: NodeIndex,
    pub ifs: Vec<NodeIndex>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum FStringPart {
    Literal(String),
    /// An embedded expression, already parsed via a nested `Scanner`/parser
    /// invocation over the f-string's inner token range.
    Expr { value: NodeIndex, format_spec: Option<String>, conversion: Option<char> },
}

impl Node {
    /// Every direct child index, for `NodeArena::build_parent_table` and
    /// for tree walks that don't care about a node's specific shape.
    #[must_use]
    pub fn children(&self) -> Vec<NodeIndex> {
        match self {
            Node::Module { body } => body.clone(),
            Node::FunctionDef { decorators, params, returns, body, .. } => {
                let mut out = decorators.clone();
                out.extend(params.iter().filter_map(|p| p.annotation));
                out.extend(params.iter().filter_map(|p| p.default));
                out.extend(*returns);
                out.extend(body.iter().copied());
                out
            }
            Node::ClassDef { decorators, bases, keywords, body, .. } => {
                let mut out = decorators.clone();
                out.extend(bases.iter().copied());
                out.extend(keywords.iter().map(|(_, v)| *v));
                out.extend(body.iter().copied());
                out
            }
            Node::Return { value } => value.iter().copied().collect(),
            Node::Delete { targets } => targets.clone(),
            Node::Assign { targets, value, .. } => {
                let mut out = targets.clone();
                out.push(*value);
                out
            }
            Node::AugAssign { target, value, .. } => vec![*target, *value],
            Node::AnnAssign { target, annotation, value } => {
                let mut out = vec![*target, *annotation];
                out.extend(*value);
                out
            }
            Node::TypeAliasStatement { value, .. } => vec![*value],
            Node::For { target, iter, body, or_else, .. } => {
                let mut out = vec![*target, *iter];
                out.extend(body.iter().copied());
                out.extend(or_else.iter().copied());
                out
            }
            Node::While { test, body, or_else } => {
                let mut out = vec![*test];
                out.extend(body.iter().copied());
                out.extend(or_else.iter().copied());
                out
            }
            Node::If { test, body, or_else } => {
                let mut out = vec![*test];
                out.extend(body.iter().copied());
                out.extend(or_else.iter().copied());
                out
            }
            Node::With { items, body, .. } => {
                let mut out = Vec::new();
                for item in items {
                    out.push(item.context_expr);
                    out.extend(item.optional_vars);
                }
                out.extend(body.iter().copied());
                out
            }
            Node::Match { subject, cases } => {
                let mut out = vec![*subject];
                for case in cases {
                    out.push(case.pattern);
                    out.extend(case.guard);
                    out.extend(case.body.iter().copied());
                }
                out
            }
            Node::Raise { exc, cause } => exc.iter().copied().chain(cause.iter().copied()).collect(),
            Node::Try { body, handlers, or_else, finally, .. } => {
                let mut out = body.clone();
                for handler in handlers {
                    out.extend(handler.exc_type);
                    out.extend(handler.body.iter().copied());
                }
                out.extend(or_else.iter().copied());
                out.extend(finally.iter().copied());
                out
            }
            Node::Assert { test, msg } => {
                let mut out = vec![*test];
                out.extend(*msg);
                out
            }
            Node::Import { .. } | Node::ImportFrom { .. } | Node::Global { .. } | Node::Nonlocal { .. } | Node::Pass | Node::Break | Node::Continue | Node::Error => vec![],
            Node::ExprStatement { value } => vec![*value],
            Node::BoolOpExpr { values, .. } => values.clone(),
            Node::BinOpExpr { left, right, .. } => vec![*left, *right],
            Node::UnaryOpExpr { operand, .. } => vec![*operand],
            Node::LambdaExpr { params, body } => {
                let mut out: Vec<NodeIndex> = params.iter().filter_map(|p| p.default).collect();
                out.push(*body);
                out
            }
            Node::IfExpr { test, body, or_else } => vec![*test, *body, *or_else],
            Node::DictExpr { keys, values } => {
                let mut out: Vec<NodeIndex> = keys.iter().filter_map(|k| *k).collect();
                out.extend(values.iter().copied());
                out
            }
            Node::SetExpr { elements } | Node::ListExpr { elements } | Node::TupleExpr { elements } => elements.clone(),
            Node::Comprehension { element, value_for_dict, generators, .. } => {
                let mut out = vec![*element];
                out.extend(*value_for_dict);
                for gen in generators {
                    out.push(gen.target);
                    out.push(gen.iter);
                    out.extend(gen.ifs.iter().copied());
                }
                out
            }
            Node::Await { value } | Node::YieldFrom { value } => vec![*value],
            Node::Yield { value } => value.iter().copied().collect(),
            Node::Compare { left, comparators, .. } => {
                let mut out = vec![*left];
                out.extend(comparators.iter().copied());
                out
            }
            Node::Call { func, args, keywords } => {
                let mut out = vec![*func];
                out.extend(args.iter().copied());
                out.extend(keywords.iter().map(|(_, v)| *v));
                out
            }
            Node::NumberLiteral { .. } | Node::StringLiteral { .. } | Node::BoolLiteral(_) | Node::NoneLiteral | Node::EllipsisLiteral | Node::Name { .. } => vec![],
            Node::FStringLiteral { parts } => parts
                .iter()
                .filter_map(|p| match p {
                    FStringPart::Expr { value, .. } => Some(*value),
                    FStringPart::Literal(_) => None,
                })
                .collect(),
            Node::Attribute { value, .. } => vec![*value],
            Node::Subscript { value, slice } => vec![*value, *slice],
            Node::Slice { lower, upper, step } => lower.iter().copied().chain(upper.iter().copied()).chain(step.iter().copied()).collect(),
            Node::Starred { value } => vec![*value],
            Node::NamedExpr { target, value } => vec![*target, *value],
            Node::PatternCapture { .. } => vec![],
            Node::PatternValue { value } => vec![*value],
            Node::PatternSequence { elements } => elements.clone(),
            Node::PatternMapping { keys, values, .. } => {
                let mut out = keys.clone();
                out.extend(values.iter().copied());
                out
            }
            Node::PatternClass { cls, positional, keyword } => {
                let mut out = vec![*cls];
                out.extend(positional.iter().copied());
                out.extend(keyword.iter().map(|(_, v)| *v));
                out
            }
            Node::PatternOr { alternatives } => alternatives.clone(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Node::Error)
    }
}
