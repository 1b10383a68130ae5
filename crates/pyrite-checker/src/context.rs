//! Shared state handed to every rule.

use pyrite_binder::BindResult;
use pyrite_common::checker_options::CheckerOptions;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule, Severity};
use pyrite_common::span::Span;
use pyrite_parser::NodeArena;
use pyrite_solver::{Evaluator, TypeInterner};

/// Everything a rule needs to inspect one file: its AST, its bind result,
/// its type evaluator, and the options that decide which rules fire and
/// at what severity.
pub struct CheckerContext<'a> {
    pub file: &'a str,
    pub arena: &'a NodeArena,
    pub root: pyrite_parser::NodeIndex,
    pub bind: &'a BindResult,
    pub evaluator: &'a Evaluator<'a>,
    pub interner: &'a TypeInterner,
    pub options: &'a CheckerOptions,
}

impl<'a> CheckerContext<'a> {
    /// Builds a diagnostic for `rule` at `span`, or returns `None` if the
    /// rule is disabled under the current options. Every rule module
    /// should report through here rather than constructing a
    /// [`Diagnostic`] directly, so severity overrides and disabled rules
    /// are honored uniformly.
    pub fn report(&self, span: Span, rule: DiagnosticRule, message: impl Into<String>) -> Option<Diagnostic> {
        let severity = self.options.severity_for(rule);
        if severity == Severity::None {
            return None;
        }
        Some(Diagnostic::new(self.file.to_string(), span, severity, rule, message.into()))
    }
}
