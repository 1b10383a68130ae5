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
fn a_method_with_a_different_parameter_count_than_its_base_is_reported() {
    let diagnostics = check_source("class Base:\n    def f(self, x: int) -> int:\n        return x\n\nclass Derived(Base):\n    def f(self, x: int, y: int) -> int:\n        return x\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, DiagnosticRule::IncompatibleMethodOverride);
}

#[test]
fn a_method_with_a_matching_signature_is_not_reported() {
    let diagnostics = check_source("class Base:\n    def f(self, x: int) -> int:\n        return x\n\nclass Derived(Base):\n    def f(self, x: int) -> int:\n        return x\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn a_method_only_present_on_the_derived_class_is_not_reported() {
    let diagnostics = check_source("class Base:\n    def f(self) -> int:\n        return 1\n\nclass Derived(Base):\n    def g(self) -> int:\n        return 2\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn a_property_decorated_method_is_exempt() {
    let diagnostics = check_source("class Base:\n    @property\n    def f(self) -> int:\n        return 1\n\nclass Derived(Base):\n    @property\n    def f(self, extra: int) -> int:\n        return extra\n");
    assert!(diagnostics.is_empty());
}
