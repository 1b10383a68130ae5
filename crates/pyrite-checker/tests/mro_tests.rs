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
fn a_consistent_diamond_hierarchy_is_not_reported() {
    let diagnostics = check_source("class A:\n    pass\n\nclass B(A):\n    pass\n\nclass D(B, A):\n    pass\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn bases_that_disagree_on_ancestor_order_are_reported() {
    let diagnostics = check_source("class A:\n    pass\n\nclass B(A):\n    pass\n\nclass C(A, B):\n    pass\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, DiagnosticRule::GeneralTypeIssues);
    assert!(diagnostics[0].message.contains('C'));
}

#[test]
fn a_class_with_no_bases_is_not_reported() {
    let diagnostics = check_source("class A:\n    pass\n");
    assert!(diagnostics.is_empty());
}
