use super::*;
use pyrite_parser::{parse, Dialect, NodeArena};

fn module_body(source: &str) -> (NodeArena, Vec<NodeIndex>) {
    let parsed = parse(source, "test.py", Dialect::default());
    let body = match parsed.arena.get(parsed.root) {
        Node::Module { body } => body.clone(),
        other => panic!("expected a module root, got {other:?}"),
    };
    (parsed.arena, body)
}

#[test]
fn a_bare_return_does_not_fall_through() {
    let (arena, body) = module_body("def f():\n    return 1\n");
    let Node::FunctionDef { body: fn_body, .. } = arena.get(body[0]) else { panic!("expected a function") };
    assert!(!block_falls_through(&arena, fn_body));
}

#[test]
fn an_if_with_no_else_always_falls_through() {
    let (arena, body) = module_body("def f():\n    if True:\n        return 1\n");
    let Node::FunctionDef { body: fn_body, .. } = arena.get(body[0]) else { panic!("expected a function") };
    assert!(block_falls_through(&arena, fn_body));
}

#[test]
fn an_if_else_where_both_branches_return_does_not_fall_through() {
    let (arena, body) = module_body("def f():\n    if True:\n        return 1\n    else:\n        return 2\n");
    let Node::FunctionDef { body: fn_body, .. } = arena.get(body[0]) else { panic!("expected a function") };
    assert!(!block_falls_through(&arena, fn_body));
}

#[test]
fn a_while_true_with_no_break_never_falls_through() {
    let (arena, body) = module_body("def f():\n    while True:\n        pass\n");
    let Node::FunctionDef { body: fn_body, .. } = arena.get(body[0]) else { panic!("expected a function") };
    assert!(!block_falls_through(&arena, fn_body));
}

#[test]
fn a_while_true_with_a_break_falls_through() {
    let (arena, body) = module_body("def f():\n    while True:\n        break\n");
    let Node::FunctionDef { body: fn_body, .. } = arena.get(body[0]) else { panic!("expected a function") };
    assert!(block_falls_through(&arena, fn_body));
}

#[test]
fn a_break_inside_a_nested_loop_does_not_count_for_the_outer_loop() {
    let (arena, body) = module_body("def f():\n    while True:\n        while True:\n            break\n");
    let Node::FunctionDef { body: fn_body, .. } = arena.get(body[0]) else { panic!("expected a function") };
    assert!(!block_falls_through(&arena, fn_body));
}

#[test]
fn a_for_loop_always_falls_through_even_with_a_return_inside() {
    let (arena, body) = module_body("def f():\n    for x in y:\n        return x\n");
    let Node::FunctionDef { body: fn_body, .. } = arena.get(body[0]) else { panic!("expected a function") };
    assert!(block_falls_through(&arena, fn_body));
}

#[test]
fn a_try_whose_body_and_every_handler_return_does_not_fall_through() {
    let (arena, body) = module_body("def f():\n    try:\n        return 1\n    except Exception:\n        return 2\n");
    let Node::FunctionDef { body: fn_body, .. } = arena.get(body[0]) else { panic!("expected a function") };
    assert!(!block_falls_through(&arena, fn_body));
}

#[test]
fn a_non_falling_finally_overrides_a_falling_try_body() {
    let (arena, body) = module_body("def f():\n    try:\n        pass\n    finally:\n        return 1\n");
    let Node::FunctionDef { body: fn_body, .. } = arena.get(body[0]) else { panic!("expected a function") };
    assert!(!block_falls_through(&arena, fn_body));
}

#[test]
fn a_match_where_every_case_returns_and_has_a_catchall_does_not_fall_through() {
    let (arena, body) = module_body("def f():\n    match x:\n        case 1:\n            return 1\n        case _:\n            return 2\n");
    let Node::FunctionDef { body: fn_body, .. } = arena.get(body[0]) else { panic!("expected a function") };
    assert!(!block_falls_through(&arena, fn_body));
}

#[test]
fn a_match_with_no_catchall_case_always_falls_through() {
    let (arena, body) = module_body("def f():\n    match x:\n        case 1:\n            return 1\n");
    let Node::FunctionDef { body: fn_body, .. } = arena.get(body[0]) else { panic!("expected a function") };
    assert!(block_falls_through(&arena, fn_body));
}
