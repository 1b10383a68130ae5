use super::*;
use pyrite_common::span::Span;
use pyrite_parser::{Node, NodeArena};

fn dummy_node(arena: &mut NodeArena) -> NodeIndex {
    arena.alloc(Node::Pass, Span::new(0, 1))
}

#[test]
fn ancestors_walks_from_child_to_root() {
    let mut arena = NodeArena::new();
    let node = dummy_node(&mut arena);
    let mut scopes = ScopeArena::new();
    let module = scopes.alloc(Scope::new(ScopeId::NONE, ScopeKind::Module, node));
    let function = scopes.alloc(Scope::new(module, ScopeKind::Function, node));
    let comprehension = scopes.alloc(Scope::new(function, ScopeKind::ListComprehension, node));

    let chain: Vec<ScopeId> = scopes.ancestors(comprehension).collect();
    assert_eq!(chain, vec![comprehension, function, module]);
}

#[test]
fn ancestors_of_none_yields_nothing() {
    let scopes = ScopeArena::new();
    assert_eq!(scopes.ancestors(ScopeId::NONE).count(), 0);
}

#[test]
fn redirects_are_per_scope() {
    let mut arena = NodeArena::new();
    let node = dummy_node(&mut arena);
    let mut scopes = ScopeArena::new();
    let module = scopes.alloc(Scope::new(ScopeId::NONE, ScopeKind::Module, node));
    let function = scopes.alloc(Scope::new(module, ScopeKind::Function, node));
    scopes.get_mut(function).unwrap().redirects.insert("x".to_string(), NameRedirect::Global);
    assert!(scopes.get(module).unwrap().redirects.is_empty());
    assert_eq!(scopes.get(function).unwrap().redirects.get("x"), Some(&NameRedirect::Global));
}

#[test]
fn flags_default_empty() {
    let mut arena = NodeArena::new();
    let node = dummy_node(&mut arena);
    let scope = Scope::new(ScopeId::NONE, ScopeKind::Module, node);
    assert!(scope.flags.is_empty());
}
