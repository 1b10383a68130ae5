//! Flags `# type: ignore` / `# pyright: ignore` comments that didn't
//! actually suppress anything, and performs the suppression itself.
//!
//! Runs last in [`crate::checker::Checker::check`], since it needs to see
//! every other rule's diagnostics before it can tell which ignore
//! comments did useful work.

use crate::context::CheckerContext;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule};
use pyrite_common::position::LineMap;
use pyrite_common::pragmas::IgnoreComment;

pub(crate) fn suppress_and_report(ctx: &CheckerContext, source: &str, ignores: &[IgnoreComment], diagnostics: &mut Vec<Diagnostic>) {
    if ignores.is_empty() {
        return;
    }
    let line_map = LineMap::build(source);
    let mut used = vec![false; ignores.len()];

    diagnostics.retain(|diag| {
        let diag_line = line_map.offset_to_position(diag.span.start, source).line;
        let suppressed_by = ignores.iter().enumerate().find(|(_, ignore)| {
            let ignore_line = line_map.offset_to_position(ignore.span.start, source).line;
            if ignore_line != diag_line {
                return false;
            }
            match &ignore.rule_codes {
                None => true,
                Some(codes) => codes.iter().any(|code| code == diag.rule.name()),
            }
        });
        match suppressed_by {
            Some((index, _)) => {
                used[index] = true;
                false
            }
            None => true,
        }
    });

    for (ignore, &was_used) in ignores.iter().zip(used.iter()) {
        if was_used {
            continue;
        }
        if let Some(diag) = ctx.report(ignore.span, DiagnosticRule::UnnecessaryTypeIgnoreComment, "unnecessary \"# type: ignore\" comment") {
            diagnostics.push(diag);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/type_ignore_tests.rs"]
mod tests;
