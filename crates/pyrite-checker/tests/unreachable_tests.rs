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
fn a_statement_after_an_unconditional_return_is_reported() {
    let diagnostics = check_source("def f():\n    return 1\n    x = 2\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, DiagnosticRule::Unreachable);
}

#[test]
fn only_the_first_unreachable_statement_in_a_block_is_reported() {
    let diagnostics = check_source("def f():\n    return 1\n    x = 2\n    y = 3\n");
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn a_statement_after_a_fully_covering_if_else_is_reported() {
    let diagnostics = check_source("def f():\n    if True:\n        return 1\n    else:\n        return 2\n    x = 3\n");
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn ordinary_sequential_code_has_no_findings() {
    let diagnostics = check_source("def f():\n    x = 1\n    y = 2\n    return x + y\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn unreachable_code_inside_a_nested_function_is_still_found() {
    let diagnostics = check_source("def outer():\n    def inner():\n        return 1\n        return 2\n    return inner\n");
    assert_eq!(diagnostics.len(), 1);
}
