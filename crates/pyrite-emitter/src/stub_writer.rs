//! Writes a `.pyi`-shaped stub for a fully evaluated module: class and
//! function signatures with annotations, module-level variable
//! declarations with their declared or inferred types, every body
//! dropped. Drives `--createstub`; [`crate::completeness`] walks the
//! same declarations to score `--verifytypes`.
//!
//! Grounded on the teacher's `declaration_emitter` (`tsz-emitter`): a
//! dedicated emitter that walks declarations rather than reusing the
//! source-to-source printer, because a declaration file drops exactly
//! the parts (bodies, control flow) that printer exists to emit.

use crate::type_printer::format_type;
use pyrite_solver::Evaluator;
use pyrite_parser::node::ParamKind;
use pyrite_parser::{Node, NodeArena, NodeIndex};
use pyrite_solver::TypeInterner;

const INDENT: &str = "    ";

/// A small allowlist of decorators worth re-emitting in a stub; anything
/// else changes runtime behavior only and carries no type information,
/// so it's dropped along with the body it decorated.
const PRESERVED_DECORATORS: &[&str] = &["staticmethod", "classmethod", "property", "abstractmethod", "overload", "setter", "getter", "deleter"];

pub struct StubWriter<'a> {
    arena: &'a NodeArena,
    evaluator: &'a Evaluator<'a>,
    interner: &'a TypeInterner,
}

impl<'a> StubWriter<'a> {
    #[must_use]
    pub fn new(arena: &'a NodeArena, evaluator: &'a Evaluator<'a>, interner: &'a TypeInterner) -> Self {
        Self { arena, evaluator, interner }
    }

    /// Emit the stub text for the module rooted at `root`.
    #[must_use]
    pub fn write_module(&self, root: NodeIndex) -> String {
        let Node::Module { body } = self.arena.get(root) else {
            return String::new();
        };
        let mut out = String::new();
        self.write_block(&mut out, body, 0);
        out
    }

    fn write_block(&self, out: &mut String, statements: &[NodeIndex], depth: usize) {
        for &stmt in statements {
            self.write_statement(out, stmt, depth);
        }
    }

    fn write_statement(&self, out: &mut String, stmt: NodeIndex, depth: usize) {
        match self.arena.get(stmt) {
            Node::FunctionDef { .. } => self.write_function(out, stmt, depth),
            Node::ClassDef { .. } => self.write_class(out, stmt, depth),
            Node::AnnAssign { target, annotation, .. } => self.write_ann_assign(out, *target, *annotation, depth),
            Node::Assign { targets, value, .. } => self.write_assign(out, targets, *value, depth),
            // Typeshed commonly guards platform/version-specific declarations
            // behind `if sys.version_info >= ...:` / `if TYPE_CHECKING:`.
            // Re-emitting the guard expression needs a general expression
            // printer this crate doesn't have; both branches are flattened
            // into the stub unconditionally instead.
            Node::If { body, or_else, .. } => {
                self.write_block(out, body, depth);
                self.write_block(out, or_else, depth);
            }
            _ => {}
        }
    }

    fn write_function(&self, out: &mut String, node: NodeIndex, depth: usize) {
        let Node::FunctionDef { name, is_async, decorators, params, returns, .. } = self.arena.get(node) else {
            return;
        };

        for &decorator in decorators {
            if let Some(decorator_name) = preserved_decorator_name(self.arena, decorator) {
                push_indent(out, depth);
                out.push('@');
                out.push_str(decorator_name);
                out.push('\n');
            }
        }

        push_indent(out, depth);
        if *is_async {
            out.push_str("async ");
        }
        out.push_str("def ");
        out.push_str(name);
        out.push('(');
        out.push_str(&self.format_params(params));
        out.push(')');

        if let Some(return_node) = returns {
            let return_type = self.evaluator.eval_annotation(*return_node);
            if let Some(rendered) = format_type(self.interner, return_type) {
                out.push_str(" -> ");
                out.push_str(&rendered);
            }
        }
        out.push_str(": ...\n");
    }

    fn format_params(&self, params: &[pyrite_parser::node::Param]) -> String {
        let mut rendered = Vec::with_capacity(params.len());
        for param in params {
            match param.kind {
                ParamKind::PositionalOnlyMarker => {
                    rendered.push("/".to_string());
                    continue;
                }
                ParamKind::KeywordOnlyMarker => {
                    rendered.push("*".to_string());
                    continue;
                }
                ParamKind::VarArgs => {
                    rendered.push(format!("*{}{}", param.name, self.annotation_suffix(param.annotation)));
                    continue;
                }
                ParamKind::KwArgs => {
                    rendered.push(format!("**{}{}", param.name, self.annotation_suffix(param.annotation)));
                    continue;
                }
                ParamKind::Normal => {}
            }
            let mut piece = format!("{}{}", param.name, self.annotation_suffix(param.annotation));
            if param.default.is_some() {
                piece.push_str(" = ...");
            }
            rendered.push(piece);
        }
        rendered.join(", ")
    }

    fn annotation_suffix(&self, annotation: Option<NodeIndex>) -> String {
        match annotation {
            Some(node) => {
                let ty = self.evaluator.eval_annotation(node);
                match format_type(self.interner, ty) {
                    Some(rendered) => format!(": {rendered}"),
                    None => String::new(),
                }
            }
            None => String::new(),
        }
    }

    fn write_class(&self, out: &mut String, node: NodeIndex, depth: usize) {
        let Node::ClassDef { name, bases, body, .. } = self.arena.get(node) else {
            return;
        };

        push_indent(out, depth);
        out.push_str("class ");
        out.push_str(name);
        if !bases.is_empty() {
            out.push('(');
            let names: Vec<&str> = bases.iter().filter_map(|&b| base_name(self.arena, b)).collect();
            out.push_str(&names.join(", "));
            out.push(')');
        }
        out.push_str(":\n");

        let member_start = out.len();
        self.write_block(out, body, depth + 1);
        if out.len() == member_start {
            push_indent(out, depth + 1);
            out.push_str("...\n");
        }
    }

    fn write_ann_assign(&self, out: &mut String, target: NodeIndex, annotation: NodeIndex, depth: usize) {
        let Node::Name { id: name } = self.arena.get(target) else {
            return;
        };
        let ty = self.evaluator.eval_annotation(annotation);
        push_indent(out, depth);
        out.push_str(name);
        match format_type(self.interner, ty) {
            Some(rendered) => {
                out.push_str(": ");
                out.push_str(&rendered);
            }
            None => out.push_str(": Any"),
        }
        out.push('\n');
    }

    /// `x = 1` with no annotation: the target's inferred type stands in
    /// for a declared one. Tuple/list unpacking targets are skipped —
    /// a stub has no use for the right-hand side's unpacked shape.
    fn write_assign(&self, out: &mut String, targets: &[NodeIndex], value: NodeIndex, depth: usize) {
        let [target] = targets else { return };
        let Node::Name { id: name } = self.arena.get(*target) else {
            return;
        };
        let ty = self.evaluator.get_type(value);
        push_indent(out, depth);
        out.push_str(name);
        out.push_str(": ");
        out.push_str(&format_type(self.interner, ty).unwrap_or_else(|| "Any".to_string()));
        out.push('\n');
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn preserved_decorator_name(arena: &NodeArena, node: NodeIndex) -> Option<&'static str> {
    let name = match arena.get(node) {
        Node::Name { id } => id.as_str(),
        Node::Attribute { attr, .. } => attr.as_str(),
        Node::Call { func, .. } => return preserved_decorator_name(arena, *func),
        _ => return None,
    };
    PRESERVED_DECORATORS.iter().find(|&&known| known == name).copied()
}

fn base_name(arena: &NodeArena, node: NodeIndex) -> Option<&str> {
    match arena.get(node) {
        Node::Name { id } => Some(id.as_str()),
        Node::Attribute { attr, .. } => Some(attr.as_str()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/stub_writer_tests.rs"]
mod tests;
