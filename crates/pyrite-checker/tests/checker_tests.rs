use super::*;
use pyrite_binder::bind_module;
use pyrite_common::checker_options::CheckerOptions;
use pyrite_common::diagnostics::DiagnosticRule;
use pyrite_parser::{parse, Dialect};

fn run(source: &str) -> Vec<pyrite_common::diagnostics::Diagnostic> {
    let parsed = parse(source, "test.py", Dialect::default());
    let bind = bind_module(&parsed.arena, parsed.root, "test.py", Dialect::default());
    let interner = TypeInterner::new();
    let evaluator = Evaluator::new(&parsed.arena, &bind, &interner, "test".to_string());
    let options = CheckerOptions::default();
    let checker = Checker::new(&options);
    checker.check("test.py", &parsed.arena, parsed.root, &bind, &evaluator, &interner, source, &parsed.comments)
}

#[test]
fn every_rule_runs_and_reports_into_one_list() {
    let diagnostics = run("def f():\n    x = 1\n    return 2\n");
    assert!(diagnostics.iter().any(|d| d.rule == DiagnosticRule::UnusedVariable));
}

#[test]
fn a_blanket_type_ignore_suppresses_the_rule_it_covers() {
    let diagnostics = run("def f():\n    x = 1  # type: ignore\n    return 2\n");
    assert!(diagnostics.iter().all(|d| d.rule != DiagnosticRule::UnusedVariable));
}

#[test]
fn an_unused_type_ignore_comment_is_itself_reported() {
    let diagnostics = run("x = 1  # type: ignore\n");
    assert!(diagnostics.iter().any(|d| d.rule == DiagnosticRule::UnnecessaryTypeIgnoreComment));
}
