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
fn a_none_default_on_a_non_optional_annotation_is_reported() {
    let diagnostics = check_source("def f(x: int = None):\n    return x\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, DiagnosticRule::AssignmentType);
}

#[test]
fn a_none_default_on_an_optional_annotation_is_fine() {
    let diagnostics = check_source("def f(x: Optional[int] = None):\n    return x\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn a_parameter_with_no_default_is_ignored() {
    let diagnostics = check_source("def f(x: int):\n    return x\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn a_parameter_with_no_annotation_is_ignored() {
    let diagnostics = check_source("def f(x=None):\n    return x\n");
    assert!(diagnostics.is_empty());
}
