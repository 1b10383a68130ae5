//! Tree walks shared by more than one rule.
//!
//! The binder's scope tree only links upward (`Scope::parent`), and
//! `SymbolArena`/`ScopeArena` expose no enumeration, so a rule that needs
//! "every function" or "every class" in a file has nowhere to ask but the
//! AST itself.

use pyrite_parser::{Node, NodeArena, NodeIndex};

/// Calls `on_function`/`on_class` for every `FunctionDef`/`ClassDef` in the
/// module, at any nesting depth, then recurses into their bodies too.
pub(crate) fn for_each_def(arena: &NodeArena, root: NodeIndex, on_function: &mut dyn FnMut(NodeIndex), on_class: &mut dyn FnMut(NodeIndex)) {
    if let Node::Module { body } = arena.get(root) {
        walk_statements(arena, body, on_function, on_class);
    }
}

fn walk_statements(arena: &NodeArena, statements: &[NodeIndex], on_function: &mut dyn FnMut(NodeIndex), on_class: &mut dyn FnMut(NodeIndex)) {
    for &stmt in statements {
        walk_statement(arena, stmt, on_function, on_class);
    }
}

fn walk_statement(arena: &NodeArena, stmt: NodeIndex, on_function: &mut dyn FnMut(NodeIndex), on_class: &mut dyn FnMut(NodeIndex)) {
    match arena.get(stmt) {
        Node::FunctionDef { body, .. } => {
            on_function(stmt);
            walk_statements(arena, body, on_function, on_class);
        }
        Node::ClassDef { body, .. } => {
            on_class(stmt);
            walk_statements(arena, body, on_function, on_class);
        }
        Node::If { body, or_else, .. } | Node::While { body, or_else, .. } | Node::For { body, or_else, .. } => {
            walk_statements(arena, body, on_function, on_class);
            walk_statements(arena, or_else, on_function, on_class);
        }
        Node::With { body, .. } => walk_statements(arena, body, on_function, on_class),
        Node::Try { body, handlers, or_else, finally, .. } => {
            walk_statements(arena, body, on_function, on_class);
            for handler in handlers {
                walk_statements(arena, &handler.body, on_function, on_class);
            }
            walk_statements(arena, or_else, on_function, on_class);
            walk_statements(arena, finally, on_function, on_class);
        }
        Node::Match { cases, .. } => {
            for case in cases {
                walk_statements(arena, &case.body, on_function, on_class);
            }
        }
        _ => {}
    }
}

/// True if `pred` matches `stmt` itself or any statement nested in its
/// compound bodies, without crossing into a nested function or class body.
/// Shared by rules that need "does this function's own body, not some
/// inner def's, do X anywhere" (inconsistent-return and generator
/// detection both need exactly this shape).
pub(crate) fn any_nested_statement(arena: &NodeArena, statements: &[NodeIndex], pred: &dyn Fn(&NodeArena, NodeIndex) -> bool) -> bool {
    statements.iter().any(|&stmt| {
        if pred(arena, stmt) {
            return true;
        }
        match arena.get(stmt) {
            Node::FunctionDef { .. } | Node::ClassDef { .. } => false,
            Node::If { body, or_else, .. } | Node::While { body, or_else, .. } | Node::For { body, or_else, .. } => {
                any_nested_statement(arena, body, pred) || any_nested_statement(arena, or_else, pred)
            }
            Node::With { body, .. } => any_nested_statement(arena, body, pred),
            Node::Try { body, handlers, or_else, finally, .. } => {
                any_nested_statement(arena, body, pred)
                    || handlers.iter().any(|h| any_nested_statement(arena, &h.body, pred))
                    || any_nested_statement(arena, or_else, pred)
                    || any_nested_statement(arena, finally, pred)
            }
            Node::Match { cases, .. } => cases.iter().any(|c| any_nested_statement(arena, &c.body, pred)),
            _ => false,
        }
    })
}
