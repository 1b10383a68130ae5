use super::*;
use crate::context::CheckerContext;
use pyrite_binder::bind_module;
use pyrite_common::checker_options::CheckerOptions;
use pyrite_parser::{parse, Dialect};
use pyrite_solver::{Evaluator, TypeInterner};

fn check_source(source: &str) -> Vec<Diagnostic> {
    let parsed = parse(source, "test.py", Dialect::default());
    let bind = bind_module(&parsed.arena, parsed.root, "test.py", Dialect::default());
    let interner = TypeInterner::new();
    let evaluator = Evaluator::new(&parsed.arena, &bind, &interner, "test".to_string());
    let options = CheckerOptions::default();
    let ctx = CheckerContext { file: "test.py", arena: &parsed.arena, root: parsed.root, bind: &bind, evaluator: &evaluator, interner: &interner, options: &options };

    let mut diagnostics = Vec::new();
    check(&ctx, &mut diagnostics);
    diagnostics
}

#[test]
fn a_function_that_can_fall_off_the_end_is_reported() {
    let diagnostics = check_source("def f(x: int) -> int:\n    if x:\n        return 1\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, DiagnosticRule::ReturnType);
}

#[test]
fn a_function_that_always_returns_is_not_reported() {
    let diagnostics = check_source("def f(x: int) -> int:\n    if x:\n        return 1\n    else:\n        return 2\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn a_stub_with_no_return_at_all_is_not_reported() {
    let diagnostics = check_source("def f() -> int:\n    ...\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn a_none_returning_function_is_not_reported() {
    let diagnostics = check_source("def f(x: int) -> None:\n    if x:\n        return\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn a_generator_is_not_reported() {
    let diagnostics = check_source("def f(x: int) -> int:\n    if x:\n        yield 1\n");
    assert!(diagnostics.is_empty());
}
