//! Converts [`pyrite_common::diagnostics::Diagnostic`] into the LSP shape
//! ([`LspDiagnostic`]) pushed on every state transition (file opened,
//! edited, or a dependency of it re-checked).
//!
//! Grounded on the teacher's `tsz-lsp` diagnostics-conversion tests
//! (`convert_diagnostic`, `category_to_severity`): severity numbering
//! (Error=1, Warning=2, Information=3, Hint=4) follows the same convention,
//! adapted to this checker's four-variant [`Severity`] rather than
//! tsserver's category/suggestion split.

use crate::types::{DiagnosticSeverity, LspDiagnostic, PublishDiagnosticsParams, RelatedLocation};
use pyrite_common::diagnostics::{Diagnostic, Severity};
use pyrite_common::position::{LineMap, Location};

fn convert_severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::Error,
        Severity::Warning => DiagnosticSeverity::Warning,
        Severity::Information => DiagnosticSeverity::Information,
        Severity::None => DiagnosticSeverity::Hint,
    }
}

/// Convert one diagnostic, resolving its span against `source`'s own line
/// map and each related-information span against the line map of whatever
/// file it points into (usually the same file, but an import-cycle or
/// redefinition diagnostic can point elsewhere).
#[must_use]
pub fn convert_diagnostic(diagnostic: &Diagnostic, source: &str, line_map: &LineMap) -> LspDiagnostic {
    let range = line_map.span_to_range(diagnostic.span, source);
    let related_information = diagnostic
        .related_information
        .iter()
        .map(|related| RelatedLocation {
            location: Location { file_path: related.file.clone(), range: line_map.span_to_range(related.span, source) },
            message: related.message.clone(),
        })
        .collect();
    LspDiagnostic {
        range,
        severity: convert_severity(diagnostic.severity),
        code: diagnostic.rule.name().to_string(),
        message: diagnostic.message.clone(),
        related_information,
    }
}

#[must_use]
pub fn publish_diagnostics(uri: String, diagnostics: &[Diagnostic], source: &str) -> PublishDiagnosticsParams {
    let line_map = LineMap::build(source);
    let converted = diagnostics.iter().map(|d| convert_diagnostic(d, source, &line_map)).collect();
    PublishDiagnosticsParams { uri, diagnostics: converted }
}

/// Re-check `path` (and whatever dependents that dirties) and build the
/// notification an embedder pushes for it — the "diagnostics push on
/// every state transition" behavior, driven from whichever edit or
/// dependency change last called [`pyrite_program::Program::mark_dirty`].
#[must_use]
pub fn publish_diagnostics_for(program: &mut pyrite_program::Program, path: &std::path::Path, uri: String) -> PublishDiagnosticsParams {
    let diagnostics = program.get_diagnostics(path);
    let source = program.file_snapshot(path).map(|s| s.source).unwrap_or_default();
    publish_diagnostics(uri, &diagnostics, &source)
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
