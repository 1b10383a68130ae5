//! Drives every rule over one file and collects their diagnostics.

use crate::context::CheckerContext;
use crate::rules;
use pyrite_binder::BindResult;
use pyrite_common::checker_options::CheckerOptions;
use pyrite_common::diagnostics::Diagnostic;
use pyrite_common::span::Span;
use pyrite_parser::{NodeArena, NodeIndex};
use pyrite_solver::{Evaluator, TypeInterner};

pub struct Checker<'a> {
    pub options: &'a CheckerOptions,
}

impl<'a> Checker<'a> {
    pub fn new(options: &'a CheckerOptions) -> Self {
        Self { options }
    }

    /// Runs every rule against one file and returns its diagnostics.
    /// `comments` is the raw `(text, span)` comment list the scanner
    /// collected for the file — the `# type: ignore` bookkeeping rule
    /// needs the full pragma text, not just the line numbers the parser
    /// keeps for its own blanket-ignore suppression.
    #[allow(clippy::too_many_arguments)]
    pub fn check(&self, file: &str, arena: &NodeArena, root: NodeIndex, bind: &BindResult, evaluator: &Evaluator, interner: &TypeInterner, source: &str, comments: &[(String, Span)]) -> Vec<Diagnostic> {
        let ctx = CheckerContext { file, arena, root, bind, evaluator, interner, options: self.options };

        let mut diagnostics = Vec::new();
        rules::unused::check(&ctx, &mut diagnostics);
        rules::unreachable::check(&ctx, &mut diagnostics);
        rules::optional_default::check(&ctx, &mut diagnostics);
        rules::overrides::check(&ctx, &mut diagnostics);
        rules::returns::check(&ctx, &mut diagnostics);
        rules::metaclass::check(&ctx, &mut diagnostics);
        rules::mro::check(&ctx, &mut diagnostics);
        rules::operators::check(&ctx, &mut diagnostics);
        rules::reveal::check(&ctx, &mut diagnostics);

        let borrowed_comments: Vec<(&str, Span)> = comments.iter().map(|(text, span)| (text.as_str(), *span)).collect();
        let (ignores, _type_comments) = pyrite_common::pragmas::scan_pragmas(borrowed_comments);
        rules::type_ignore::suppress_and_report(&ctx, source, &ignores, &mut diagnostics);

        diagnostics
    }
}

#[cfg(test)]
#[path = "../tests/checker_tests.rs"]
mod tests;
