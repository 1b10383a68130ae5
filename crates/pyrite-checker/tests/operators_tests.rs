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
fn adding_an_int_and_a_str_is_reported() {
    let diagnostics = check_source("def f(x: int) -> str:\n    return x + \"\"\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, DiagnosticRule::OperatorIssue);
    assert!(diagnostics[0].message.contains("'int'"));
    assert!(diagnostics[0].message.contains("'str'"));
    assert!(diagnostics[0].message.contains('+'));
}

#[test]
fn adding_two_ints_is_not_reported() {
    let diagnostics = check_source("def f(x: int, y: int) -> int:\n    return x + y\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn an_operator_on_an_unannotated_name_is_not_reported() {
    let diagnostics = check_source("def f(x):\n    return x + 1\n");
    assert!(diagnostics.is_empty());
}
