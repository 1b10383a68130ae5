use super::*;
use pyrite_common::diagnostics::DiagnosticRule;
use pyrite_common::settings::PythonVersion;
use pyrite_parser::{parse, Dialect};

fn bind_source(source: &str) -> BindResult {
    let parsed = parse(source, "test.py", Dialect::default());
    bind_module(&parsed.arena, parsed.root, "test.py", Dialect::default())
}

#[test]
fn simple_assignment_declares_a_variable() {
    let result = bind_source("x = 1\n");
    assert!(result.diagnostics.is_empty());
    let module = result.scopes.get(result.module_scope_id).unwrap();
    let id = module.table.get("x").expect("x should be declared in module scope");
    let symbol = result.symbols.get(id).unwrap();
    assert!(symbol.flags.contains(SymbolFlags::VARIABLE));
    assert_eq!(symbol.declarations.len(), 1);
}

#[test]
fn name_use_resolves_to_its_declaration() {
    let result = bind_source("x = 1\ny = x\n");
    assert!(result.unresolved_names.is_empty());
}

#[test]
fn undefined_name_is_recorded_as_unresolved() {
    let result = bind_source("y = undefined_name\n");
    assert_eq!(result.unresolved_names.len(), 1);
}

#[test]
fn function_parameters_get_their_own_scope() {
    let result = bind_source("def f(a, b):\n    return a + b\n");
    assert!(result.diagnostics.is_empty());
    assert!(result.unresolved_names.is_empty());
    let module = result.scopes.get(result.module_scope_id).unwrap();
    assert!(module.table.has("f"));
}

#[test]
fn duplicate_parameter_names_are_diagnosed() {
    let result = bind_source("def f(a, a):\n    pass\n");
    assert!(result.diagnostics.iter().any(|d| d.rule == DiagnosticRule::SyntaxError));
}

#[test]
fn return_outside_function_is_diagnosed() {
    let result = bind_source("return 1\n");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].rule, DiagnosticRule::SyntaxError);
}

#[test]
fn nested_function_sees_enclosing_names_but_not_vice_versa() {
    let result = bind_source("def outer():\n    value = 1\n    def inner():\n        return value\n    return inner\n");
    assert!(result.diagnostics.is_empty());
    assert!(result.unresolved_names.is_empty());
}

#[test]
fn class_body_name_is_not_visible_to_nested_method() {
    let result = bind_source("class C:\n    attr = 1\n    def method(self):\n        return attr\n");
    assert_eq!(result.unresolved_names.len(), 1);
}

#[test]
fn global_statement_redirects_declaration_to_module_scope() {
    let result = bind_source("x = 1\ndef f():\n    global x\n    x = 2\n");
    let module = result.scopes.get(result.module_scope_id).unwrap();
    let id = module.table.get("x").unwrap();
    let symbol = result.symbols.get(id).unwrap();
    assert_eq!(symbol.declarations.len(), 2);
}

#[test]
fn nonlocal_without_enclosing_binding_is_diagnosed() {
    let result = bind_source("def f():\n    def g():\n        nonlocal missing\n        missing = 1\n    g()\n");
    assert!(result.diagnostics.iter().any(|d| d.rule == DiagnosticRule::SyntaxError));
}

#[test]
fn walrus_target_binds_to_enclosing_function_scope_not_the_comprehension() {
    let result = bind_source("def f(items):\n    result = [y for x in items if (y := x) > 0]\n    return y\n");
    assert!(result.file_features.contains(FileFeatures::WALRUS_TARGETS));
    assert!(result.unresolved_names.is_empty());
}

#[test]
fn list_comprehension_target_does_not_leak_to_enclosing_scope() {
    let result = bind_source("items = [1, 2, 3]\nsquares = [x * x for x in items]\nx\n");
    assert_eq!(result.unresolved_names.len(), 1);
}

#[test]
fn generator_function_sets_the_generator_feature_flag() {
    let result = bind_source("def gen():\n    yield 1\n");
    assert!(result.file_features.contains(FileFeatures::GENERATOR_FUNCTIONS));
    assert!(!result.file_features.contains(FileFeatures::ASYNC_GENERATOR_FUNCTIONS));
}

#[test]
fn async_generator_under_old_dialect_is_diagnosed() {
    let parsed = parse("async def gen():\n    yield 1\n", "test.py", Dialect::new(PythonVersion::Py35));
    let result = bind_module(&parsed.arena, parsed.root, "test.py", Dialect::new(PythonVersion::Py35));
    assert!(result.diagnostics.iter().any(|d| d.rule == DiagnosticRule::SyntaxError));
}

#[test]
fn dunder_all_assignment_is_captured() {
    let result = bind_source("__all__ = ['a', 'b']\n");
    assert_eq!(result.dunder_all, Some(vec!["a".to_string(), "b".to_string()]));
    let module = result.scopes.get(result.module_scope_id).unwrap();
    assert!(module.flags.contains(ScopeFlags::EXPORTS_ALL_VIA_DUNDER_ALL));
}

#[test]
fn wildcard_import_sets_scope_flag() {
    let result = bind_source("from os import *\n");
    let module = result.scopes.get(result.module_scope_id).unwrap();
    assert!(module.flags.contains(ScopeFlags::HAS_WILDCARD_IMPORT));
}

#[test]
fn import_alias_binds_the_asname() {
    let result = bind_source("import os.path as p\n");
    let module = result.scopes.get(result.module_scope_id).unwrap();
    assert!(module.table.has("p"));
    assert!(!module.table.has("os"));
}

#[test]
fn plain_import_binds_the_top_level_package() {
    let result = bind_source("import os.path\nos.path.join('a', 'b')\n");
    let module = result.scopes.get(result.module_scope_id).unwrap();
    assert!(module.table.has("os"));
    assert!(result.unresolved_names.is_empty());
}

#[test]
fn except_handler_name_is_declared_and_scoped_to_the_try_statement() {
    let result = bind_source("class LocalError:\n    pass\n\ndef f():\n    try:\n        pass\n    except LocalError as e:\n        return e\n");
    assert!(result.unresolved_names.is_empty());
}

#[test]
fn match_capture_pattern_declares_a_variable() {
    let result = bind_source("def f(value):\n    match value:\n        case [first, *rest]:\n            return first, rest\n        case _:\n            return None\n");
    assert!(result.diagnostics.is_empty());
    assert!(result.unresolved_names.is_empty());
}

#[test]
fn call_expression_advances_the_flow_graph() {
    let with_call = bind_source("def f():\n    print('hi')\n");
    let without_call = bind_source("def f():\n    pass\n");
    assert!(with_call.flow_nodes.len() > without_call.flow_nodes.len());
}

#[test]
fn if_else_merges_both_branches() {
    let result = bind_source("def f(cond):\n    if cond:\n        x = 1\n    else:\n        x = 2\n    return x\n");
    assert!(result.diagnostics.is_empty());
    assert!(result.unresolved_names.is_empty());
}

#[test]
fn try_except_finally_binds_every_clause() {
    let result = bind_source("def risky():\n    pass\n\ndef f():\n    try:\n        risky()\n    except:\n        pass\n    else:\n        pass\n    finally:\n        pass\n");
    assert!(result.unresolved_names.is_empty());
}

#[test]
fn annotation_expression_is_never_walked_for_name_resolution() {
    let result = bind_source("x: UndefinedAnnotationType = 1\n");
    assert!(result.unresolved_names.is_empty());
}
