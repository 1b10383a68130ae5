//! Renders a diagnostic list as text or JSON.
//!
//! Reconstructed from the teacher's `tsz-cli::reporter` contract (the
//! implementation file didn't survive retrieval; `tests/reporter_tests.rs`
//! did) and adapted to this checker's diagnostic shape: a `rule` slug
//! instead of a numeric code, `file(line,col)` plain-mode locations, and a
//! `file:line:col` pretty-mode location with a source snippet and `~`
//! underline under the offending span.

use colored::Colorize;
use pyrite_common::diagnostics::{Diagnostic, Severity};
use pyrite_common::position::{LineMap, Position};
use serde_json::json;
use std::collections::HashMap;
use std::fmt::Write as _;

pub struct Reporter {
    pretty: bool,
    json: bool,
}

impl Reporter {
    #[must_use]
    pub fn new(json: bool) -> Self {
        Self { pretty: false, json }
    }

    pub fn set_pretty(&mut self, pretty: bool) -> &mut Self {
        self.pretty = pretty;
        self
    }

    /// Render `diagnostics`. `sources` supplies each file's text, used to
    /// turn a byte span into a 1-based line/column and, in pretty mode, a
    /// source snippet. A file missing from `sources` falls back to
    /// position `(1,1)` and no snippet rather than failing the whole
    /// render.
    #[must_use]
    pub fn render(&self, diagnostics: &[Diagnostic], sources: &HashMap<String, String>) -> String {
        if self.json {
            return self.render_json(diagnostics, sources);
        }
        if self.pretty {
            self.render_pretty(diagnostics, sources)
        } else {
            self.render_plain(diagnostics, sources)
        }
    }

    fn render_json(&self, diagnostics: &[Diagnostic], sources: &HashMap<String, String>) -> String {
        let items: Vec<_> = diagnostics
            .iter()
            .map(|d| {
                let start = resolve_position(d.file.as_str(), d.span.start, sources);
                let end = resolve_position(d.file.as_str(), d.span.end, sources);
                json!({
                    "file": d.file,
                    "range": {
                        "start": {"line": start.line, "character": start.character},
                        "end": {"line": end.line, "character": end.character},
                    },
                    "severity": severity_word(d.severity),
                    "rule": d.rule.name(),
                    "message": d.message,
                })
            })
            .collect();
        serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
    }

    fn render_plain(&self, diagnostics: &[Diagnostic], sources: &HashMap<String, String>) -> String {
        let mut out = String::new();
        for d in diagnostics {
            let pos = resolve_position(d.file.as_str(), d.span.start, sources);
            let (line, col) = (pos.line + 1, pos.character + 1);
            let _ = writeln!(out, "{}({line},{col}): {} {}: {}", d.file, severity_word(d.severity), d.rule.name(), d.message);
        }
        out
    }

    fn render_pretty(&self, diagnostics: &[Diagnostic], sources: &HashMap<String, String>) -> String {
        let mut out = String::new();
        let mut errors = 0;
        let mut warnings = 0;
        for d in diagnostics {
            match d.severity {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
                _ => {}
            }
            let pos = resolve_position(d.file.as_str(), d.span.start, sources);
            let (line, col) = (pos.line + 1, pos.character + 1);
            let severity = colored_severity(d.severity);
            let _ = writeln!(out, "{}:{line}:{col} - {severity} {}: {}", d.file, d.rule.name(), d.message);

            if let Some(source) = sources.get(&d.file) {
                if let Some(snippet) = source.lines().nth(pos.line as usize) {
                    let _ = writeln!(out, "{line} {snippet}");
                    let underline_len = (d.span.end.saturating_sub(d.span.start)).max(1) as usize;
                    let pad = " ".repeat(line.to_string().len() + 1 + (col - 1) as usize);
                    let _ = writeln!(out, "{pad}{}", "~".repeat(underline_len));
                }
            }
            out.push('\n');
        }

        let total = errors + warnings;
        if total > 0 {
            let files: std::collections::HashSet<&str> = diagnostics.iter().map(|d| d.file.as_str()).collect();
            if files.len() == 1 {
                let _ = writeln!(out, "Found {total} {} in {}", pluralize(total, "error", "errors"), diagnostics[0].file);
            } else {
                let _ = writeln!(out, "Found {total} {} in {} files", pluralize(total, "error", "errors"), files.len());
            }
        }
        out
    }
}

fn resolve_position(file: &str, offset: u32, sources: &HashMap<String, String>) -> Position {
    match sources.get(file) {
        Some(source) => LineMap::build(source).offset_to_position(offset, source),
        None => Position::new(0, 0),
    }
}

fn severity_word(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Information => "information",
        Severity::None => "none",
    }
}

fn colored_severity(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
        Severity::Information => "information".blue(),
        Severity::None => "none".normal(),
    }
}

fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        singular.to_string()
    } else {
        plural.to_string()
    }
}

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod tests;
