//! Outline view: walks a module's top-level and nested class/function
//! bodies into the [`DocumentSymbol`] tree LSP uses for "Go to Symbol" and
//! breadcrumbs.
//!
//! Grounded on the shape the teacher's `tsz-lsp` `DocumentSymbolProvider`
//! tests assert (`name`, `kind`, `children`, `range`, `selection_range`);
//! narrowed to the declarations Python's grammar actually has — no
//! `Interface`/`Struct`/`EnumMember` counterpart exists here, so
//! [`SymbolKind`] only names `Module`, `Class`, `Function`, `Method`,
//! `Property`, `Variable`, `Constant`, `Parameter`.

use crate::types::{DocumentSymbol, SymbolKind};
use pyrite_common::position::LineMap;
use pyrite_parser::{Node, NodeArena, NodeIndex};

fn name_range(arena: &NodeArena, node: NodeIndex, source: &str, line_map: &LineMap) -> pyrite_common::position::Range {
    line_map.span_to_range(arena.span(node), source)
}

fn is_property_decorator(arena: &NodeArena, decorators: &[NodeIndex]) -> bool {
    decorators.iter().any(|&d| matches!(arena.get(d), Node::Name { id } if id == "property"))
}

fn walk_statement(arena: &NodeArena, stmt: NodeIndex, source: &str, line_map: &LineMap, in_class: bool, out: &mut Vec<DocumentSymbol>) {
    match arena.get(stmt) {
        Node::FunctionDef { name, decorators, body, .. } => {
            let kind = if in_class {
                if is_property_decorator(arena, decorators) {
                    SymbolKind::Property
                } else {
                    SymbolKind::Method
                }
            } else {
                SymbolKind::Function
            };
            let mut children = Vec::new();
            for &child in body {
                walk_statement(arena, child, source, line_map, false, &mut children);
            }
            out.push(DocumentSymbol {
                name: name.clone(),
                kind,
                range: name_range(arena, stmt, source, line_map),
                selection_range: name_range(arena, stmt, source, line_map),
                children,
            });
        }
        Node::ClassDef { name, body, .. } => {
            let mut children = Vec::new();
            for &child in body {
                walk_statement(arena, child, source, line_map, true, &mut children);
            }
            out.push(DocumentSymbol {
                name: name.clone(),
                kind: SymbolKind::Class,
                range: name_range(arena, stmt, source, line_map),
                selection_range: name_range(arena, stmt, source, line_map),
                children,
            });
        }
        Node::AnnAssign { target, .. } => {
            let Node::Name { id } = arena.get(*target) else { return };
            let kind = if in_class { SymbolKind::Property } else if id.chars().all(|c| c.is_uppercase() || c == '_' || c.is_numeric()) { SymbolKind::Constant } else { SymbolKind::Variable };
            out.push(DocumentSymbol {
                name: id.clone(),
                kind,
                range: name_range(arena, *target, source, line_map),
                selection_range: name_range(arena, *target, source, line_map),
                children: Vec::new(),
            });
        }
        Node::Assign { targets, .. } if targets.len() == 1 => {
            let target = targets[0];
            let Node::Name { id } = arena.get(target) else { return };
            let kind = if in_class { SymbolKind::Property } else if id.chars().all(|c| c.is_uppercase() || c == '_' || c.is_numeric()) { SymbolKind::Constant } else { SymbolKind::Variable };
            out.push(DocumentSymbol {
                name: id.clone(),
                kind,
                range: name_range(arena, target, source, line_map),
                selection_range: name_range(arena, target, source, line_map),
                children: Vec::new(),
            });
        }
        Node::If { body, or_else, .. } | Node::While { body, or_else, .. } => {
            for &child in body.iter().chain(or_else.iter()) {
                walk_statement(arena, child, source, line_map, in_class, out);
            }
        }
        _ => {}
    }
}

#[must_use]
pub fn document_symbols(arena: &NodeArena, root: NodeIndex, source: &str) -> Vec<DocumentSymbol> {
    let line_map = LineMap::build(source);
    let Node::Module { body } = arena.get(root) else { return Vec::new() };
    let mut out = Vec::new();
    for &stmt in body {
        walk_statement(arena, stmt, source, &line_map, false, &mut out);
    }
    out
}

#[must_use]
pub fn document_symbols_for(program: &mut pyrite_program::Program, path: &std::path::Path) -> Vec<DocumentSymbol> {
    let Some(snapshot) = program.file_snapshot(path) else { return Vec::new() };
    document_symbols(&snapshot.parse.arena, snapshot.parse.root, &snapshot.source)
}

#[cfg(test)]
#[path = "../tests/document_symbols_tests.rs"]
mod tests;
