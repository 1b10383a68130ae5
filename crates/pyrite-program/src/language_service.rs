//! Pure lookups over one already-checked file: "what's at this position,"
//! "where was that name declared," "what's visible for completion here."
//!
//! Kept as free functions over borrowed data rather than `Program` methods
//! so they have no opinion on scheduling — `Program` decides when a file is
//! ready to query, this module only answers the query once it is.

use pyrite_binder::scope::ScopeId;
use pyrite_binder::symbol::SymbolId;
use pyrite_binder::BindResult;
use pyrite_common::position::{Location, Range};
use pyrite_common::span::Span;
use pyrite_emitter::format_type;
use pyrite_parser::{Node, NodeArena, NodeIndex};
use pyrite_solver::{Evaluator, TypeInterner};

fn contains(span: Span, offset: u32) -> bool {
    span.start <= offset && offset < span.end
}

/// The innermost node whose span contains `offset`, descending from
/// `root`. Falls back to the last node reached if no child's span contains
/// the offset (trailing whitespace past the last statement, a position
/// inside a token the parser didn't attach to any child).
#[must_use]
pub fn node_at(arena: &NodeArena, root: NodeIndex, offset: u32) -> NodeIndex {
    let mut current = root;
    loop {
        let next = arena.get(current).children().into_iter().find(|&child| contains(arena.span(child), offset));
        match next {
            Some(child) => current = child,
            None => return current,
        }
    }
}

/// The nearest scope governing `node`: the scope recorded directly against
/// it if the binder attached one (function/class/comprehension headers,
/// the module root), otherwise the nearest ancestor's.
#[must_use]
pub fn enclosing_scope(arena: &NodeArena, bind: &BindResult, node: NodeIndex) -> ScopeId {
    arena.ancestors(node).find_map(|ancestor| bind.node_scopes.get(&ancestor).copied()).unwrap_or(bind.module_scope_id)
}

pub struct HoverInfo {
    pub text: String,
    pub range: Range,
}

/// Render the evaluated type of the name at `offset`, if the node there is
/// a `Name` reference the evaluator can assign a type to.
#[must_use]
pub fn hover(arena: &NodeArena, root: NodeIndex, interner: &TypeInterner, evaluator: &Evaluator, source: &str, offset: u32) -> Option<HoverInfo> {
    let node = node_at(arena, root, offset);
    let Node::Name { id: name } = arena.get(node) else { return None };
    let ty = evaluator.get_type(node);
    let rendered = format_type(interner, ty).unwrap_or_else(|| "Any".to_string());
    let line_map = pyrite_common::position::LineMap::build(source);
    let range = line_map.span_to_range(arena.span(node), source);
    Some(HoverInfo { text: format!("{name}: {rendered}"), range })
}

/// Where the name at `offset` was declared, if it resolved to a symbol
/// with at least one declaration.
#[must_use]
pub fn goto_definition(arena: &NodeArena, root: NodeIndex, bind: &BindResult, file_path: &str, source: &str, offset: u32) -> Option<Location> {
    let node = node_at(arena, root, offset);
    let symbol_id = bind.node_symbols.get(&node).copied()?;
    definition_location(bind, symbol_id, file_path, source)
}

fn definition_location(bind: &BindResult, symbol_id: SymbolId, file_path: &str, source: &str) -> Option<Location> {
    let symbol = bind.symbols.get(symbol_id)?;
    let declaration = symbol.declarations.first()?;
    let line_map = pyrite_common::position::LineMap::build(source);
    let range = line_map.span_to_range(declaration.span(), source);
    Some(Location::new(file_path.to_string(), range))
}

/// Every name visible for completion at `offset`: every symbol declared in
/// the enclosing scope chain, innermost first, deduplicated by name so a
/// shadowed outer binding doesn't show up twice.
#[must_use]
pub fn completion(arena: &NodeArena, root: NodeIndex, bind: &BindResult, offset: u32) -> Vec<String> {
    let node = node_at(arena, root, offset);
    let scope_id = enclosing_scope(arena, bind, node);
    let mut seen = rustc_hash::FxHashSet::default();
    let mut names = Vec::new();
    for ancestor_scope in bind.scopes.ancestors(scope_id) {
        let Some(scope) = bind.scopes.get(ancestor_scope) else { continue };
        for (name, _) in scope.table.iter() {
            if seen.insert(name.clone()) {
                names.push(name.clone());
            }
        }
    }
    names
}

#[cfg(test)]
#[path = "../tests/language_service_tests.rs"]
mod tests;
