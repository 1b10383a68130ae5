use super::*;
use crate::node::BinaryOp;
use pyrite_common::span::Span;

#[test]
fn alloc_returns_increasing_indices() {
    let mut arena = NodeArena::new();
    let a = arena.alloc(Node::Pass, Span::new(0, 4));
    let b = arena.alloc(Node::Break, Span::new(5, 10));
    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(arena.len(), 2);
    assert!(!arena.is_empty());
}

#[test]
fn get_and_span_round_trip() {
    let mut arena = NodeArena::new();
    let idx = arena.alloc(Node::Name { id: "x".to_string() }, Span::new(3, 4));
    assert!(matches!(arena.get(idx), Node::Name { id } if id == "x"));
    assert_eq!(arena.span(idx), Span::new(3, 4));
}

#[test]
fn build_parent_table_links_direct_children() {
    let mut arena = NodeArena::new();
    let left = arena.alloc(Node::Name { id: "a".to_string() }, Span::new(0, 1));
    let right = arena.alloc(Node::Name { id: "b".to_string() }, Span::new(4, 5));
    let bin = arena.alloc(Node::BinOpExpr { left, op: BinaryOp::Add, right }, Span::new(0, 5));
    let stmt = arena.alloc(Node::ExprStatement { value: bin }, Span::new(0, 5));
    let root = arena.alloc(Node::Module { body: vec![stmt] }, Span::new(0, 5));

    arena.build_parent_table(root);

    assert_eq!(arena.parent(stmt), Some(root));
    assert_eq!(arena.parent(bin), Some(stmt));
    assert_eq!(arena.parent(left), Some(bin));
    assert_eq!(arena.parent(right), Some(bin));
    assert_eq!(arena.parent(root), None);
}

#[test]
fn ancestors_walks_up_to_the_root() {
    let mut arena = NodeArena::new();
    let name = arena.alloc(Node::Name { id: "x".to_string() }, Span::new(0, 1));
    let stmt = arena.alloc(Node::ExprStatement { value: name }, Span::new(0, 1));
    let root = arena.alloc(Node::Module { body: vec![stmt] }, Span::new(0, 1));
    arena.build_parent_table(root);

    let chain: Vec<NodeIndex> = arena.ancestors(name).collect();
    assert_eq!(chain, vec![name, stmt, root]);
}
