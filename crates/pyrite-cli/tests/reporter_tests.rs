use super::*;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule};
use pyrite_common::span::Span;
use std::collections::HashMap;

fn sample_diagnostic(file: &str, start: u32, end: u32, severity: Severity, rule: DiagnosticRule, message: &str) -> Diagnostic {
    Diagnostic::new(file.to_string(), Span::new(start, end), severity, rule, message.to_string())
}

#[test]
fn plain_mode_has_no_snippet_or_color() {
    let source = "let a10: int = \"x\"\n";
    let mut sources = HashMap::new();
    sources.insert("a.py".to_string(), source.to_string());

    let diagnostic = sample_diagnostic("a.py", 15, 18, Severity::Error, DiagnosticRule::AssignmentType, "cannot assign str to int");
    let reporter = Reporter::new(false);
    let out = reporter.render(&[diagnostic], &sources);

    assert!(out.starts_with("a.py(1,16): error reportAssignmentType: cannot assign str to int"));
    assert!(!out.contains('~'));
}

#[test]
fn pretty_mode_includes_snippet_and_summary() {
    let source = "let a10: int = \"x\"\n";
    let mut sources = HashMap::new();
    sources.insert("a.py".to_string(), source.to_string());

    let diagnostic = sample_diagnostic("a.py", 15, 18, Severity::Error, DiagnosticRule::AssignmentType, "cannot assign str to int");
    let mut reporter = Reporter::new(false);
    reporter.set_pretty(true);
    let out = reporter.render(&[diagnostic], &sources);

    assert!(out.contains("a.py:1:16 - "));
    assert!(out.contains("let a10: int = \"x\""));
    assert!(out.contains("~~~"));
    assert!(out.contains("Found 1 error in a.py"));
}

#[test]
fn pretty_mode_summarizes_multiple_files() {
    let diagnostics = vec![
        sample_diagnostic("a.py", 0, 1, Severity::Error, DiagnosticRule::SyntaxError, "bad syntax"),
        sample_diagnostic("b.py", 0, 1, Severity::Error, DiagnosticRule::UnboundVariable, "unbound"),
    ];
    let mut reporter = Reporter::new(false);
    reporter.set_pretty(true);
    let out = reporter.render(&diagnostics, &HashMap::new());

    assert!(out.contains("Found 2 errors in 2 files"));
}

#[test]
fn json_mode_emits_structured_diagnostics() {
    let source = "x = 1\ny = x + \"s\"\n";
    let mut sources = HashMap::new();
    sources.insert("a.py".to_string(), source.to_string());

    let diagnostic = sample_diagnostic("a.py", 10, 11, Severity::Warning, DiagnosticRule::OperatorIssue, "unsupported operand types");
    let reporter = Reporter::new(true);
    let out = reporter.render(&[diagnostic], &sources);
    let parsed: serde_json::Value = serde_json::from_str(&out).expect("json output should parse");

    assert_eq!(parsed[0]["file"], "a.py");
    assert_eq!(parsed[0]["severity"], "warning");
    assert_eq!(parsed[0]["rule"], "reportOperatorIssue");
    assert_eq!(parsed[0]["range"]["start"]["line"], 1);
}

#[test]
fn missing_source_falls_back_to_origin() {
    let diagnostic = sample_diagnostic("missing.py", 42, 50, Severity::Error, DiagnosticRule::SyntaxError, "parse error");
    let reporter = Reporter::new(false);
    let out = reporter.render(&[diagnostic], &HashMap::new());
    assert!(out.starts_with("missing.py(1,1): error reportSyntaxError: parse error"));
}
