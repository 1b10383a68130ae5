//! Walks the same declarations [`crate::stub_writer`] would emit and
//! scores how many of them carry a known type, for `--verifytypes`.
//!
//! The spec only names this as powered by "the same symbol-walk" as the
//! stub writer; there's no dedicated teacher module for a completeness
//! score, so this is grounded on the stub writer's own walk rather than
//! a separate teacher file — reusing `write_statement`'s dispatch shape
//! (function / class / annotated or inferred variable) instead of
//! duplicating it.

use pyrite_common::span::Span;
use pyrite_solver::{Evaluator, TypeId};
use pyrite_parser::{Node, NodeArena, NodeIndex};

/// One declaration's completeness verdict: a symbol's full dotted name,
/// its source location, and whether every type that makes up its
/// signature (or its own type, for a variable) resolved to something
/// other than `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCompleteness {
    pub qualified_name: String,
    pub span: Span,
    pub is_known: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletenessReport {
    pub symbols: Vec<SymbolCompleteness>,
}

impl CompletenessReport {
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.symbols.iter().filter(|s| s.is_known).count()
    }

    #[must_use]
    pub fn unknown(&self) -> impl Iterator<Item = &SymbolCompleteness> {
        self.symbols.iter().filter(|s| !s.is_known)
    }

    /// Ratio of symbols with a known type, in `[0.0, 1.0]`. A module with
    /// no typeable declarations at all (an empty `__init__.py`) is
    /// vacuously complete.
    #[must_use]
    pub fn score(&self) -> f64 {
        if self.symbols.is_empty() {
            return 1.0;
        }
        self.known_count() as f64 / self.symbols.len() as f64
    }
}

pub struct CompletenessWalker<'a> {
    arena: &'a NodeArena,
    evaluator: &'a Evaluator<'a>,
}

impl<'a> CompletenessWalker<'a> {
    #[must_use]
    pub fn new(arena: &'a NodeArena, evaluator: &'a Evaluator<'a>) -> Self {
        Self { arena, evaluator }
    }

    #[must_use]
    pub fn walk_module(&self, root: NodeIndex) -> CompletenessReport {
        let Node::Module { body } = self.arena.get(root) else {
            return CompletenessReport::default();
        };
        let mut report = CompletenessReport::default();
        self.walk_block(body, "", &mut report);
        report
    }

    fn walk_block(&self, statements: &[NodeIndex], prefix: &str, report: &mut CompletenessReport) {
        for &stmt in statements {
            self.walk_statement(stmt, prefix, report);
        }
    }

    fn walk_statement(&self, stmt: NodeIndex, prefix: &str, report: &mut CompletenessReport) {
        match self.arena.get(stmt) {
            Node::FunctionDef { name, params, returns, .. } => {
                // `self`/`cls` is never annotated in idiomatic code; a
                // method that's otherwise fully annotated shouldn't be
                // marked incomplete just because of its implicit first
                // parameter. Only skip it for methods (non-empty
                // prefix), not for a module-level function named the
                // same way.
                let skip_first = !prefix.is_empty() && params.first().is_some_and(|p| p.name == "self" || p.name == "cls");
                let checked_params = &params[if skip_first { 1 } else { 0 }..];
                let is_known = returns.is_some_and(|r| self.evaluator.eval_annotation(r) != TypeId::UNKNOWN)
                    && checked_params.iter().all(|p| p.annotation.is_some_and(|a| self.evaluator.eval_annotation(a) != TypeId::UNKNOWN));
                report.symbols.push(SymbolCompleteness { qualified_name: qualify(prefix, name), span: self.arena.span(stmt), is_known });
            }
            Node::ClassDef { name, body, .. } => {
                let qualified = qualify(prefix, name);
                report.symbols.push(SymbolCompleteness { qualified_name: qualified.clone(), span: self.arena.span(stmt), is_known: true });
                self.walk_block(body, &qualified, report);
            }
            Node::AnnAssign { target, annotation, .. } => {
                if let Node::Name { id: name } = self.arena.get(*target) {
                    let is_known = self.evaluator.eval_annotation(*annotation) != TypeId::UNKNOWN;
                    report.symbols.push(SymbolCompleteness { qualified_name: qualify(prefix, name), span: self.arena.span(stmt), is_known });
                }
            }
            Node::Assign { targets, value, .. } => {
                if let [target] = targets.as_slice() {
                    if let Node::Name { id: name } = self.arena.get(*target) {
                        let is_known = self.evaluator.get_type(*value) != TypeId::UNKNOWN;
                        report.symbols.push(SymbolCompleteness { qualified_name: qualify(prefix, name), span: self.arena.span(stmt), is_known });
                    }
                }
            }
            Node::If { body, or_else, .. } => {
                self.walk_block(body, prefix, report);
                self.walk_block(or_else, prefix, report);
            }
            _ => {}
        }
    }
}

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

#[cfg(test)]
#[path = "../tests/completeness_tests.rs"]
mod tests;
