//! Find-references: every node the binder resolved to the same symbol as
//! the one under the cursor, plus (optionally) its declaration sites.
//!
//! [`pyrite_binder::BindResult`] only keeps the forward map (node ->
//! symbol); there's no reverse index to look up, so this scans
//! `node_symbols` once per query. Fine for a single already-bound file —
//! a project-wide "find all references" would need an index this crate
//! doesn't build, which is why the facade only answers within one file.

use pyrite_binder::symbol::SymbolId;
use pyrite_binder::BindResult;
use pyrite_common::position::{LineMap, Range};
use pyrite_parser::{NodeArena, NodeIndex};

#[must_use]
pub fn symbol_at(arena: &NodeArena, root: NodeIndex, bind: &BindResult, offset: u32) -> Option<SymbolId> {
    let node = pyrite_program::language_service::node_at(arena, root, offset);
    bind.node_symbols.get(&node).copied()
}

/// Every reference to `symbol_id` in this file, declarations included,
/// sorted by position.
#[must_use]
pub fn references(arena: &NodeArena, bind: &BindResult, source: &str, symbol_id: SymbolId, include_declaration: bool) -> Vec<Range> {
    let line_map = LineMap::build(source);
    let mut ranges: Vec<Range> = bind
        .node_symbols
        .iter()
        .filter(|(_, id)| **id == symbol_id)
        .map(|(node, _)| line_map.span_to_range(arena.span(*node), source))
        .collect();
    if include_declaration {
        if let Some(symbol) = bind.symbols.get(symbol_id) {
            for declaration in &symbol.declarations {
                ranges.push(line_map.span_to_range(declaration.span(), source));
            }
        }
    }
    ranges.sort_by_key(|r| (r.start.line, r.start.character));
    ranges.dedup_by_key(|r| (r.start.line, r.start.character));
    ranges
}

#[must_use]
pub fn references_at(arena: &NodeArena, root: NodeIndex, bind: &BindResult, source: &str, offset: u32, include_declaration: bool) -> Vec<Range> {
    let Some(symbol_id) = symbol_at(arena, root, bind, offset) else { return Vec::new() };
    references(arena, bind, source, symbol_id, include_declaration)
}

#[must_use]
pub fn references_for(program: &mut pyrite_program::Program, path: &std::path::Path, position: pyrite_common::position::Position, include_declaration: bool) -> Vec<Range> {
    let Some(snapshot) = program.file_snapshot(path) else { return Vec::new() };
    let Some(offset) = line_map_offset(&snapshot.source, position) else { return Vec::new() };
    references_at(&snapshot.parse.arena, snapshot.parse.root, &snapshot.bind, &snapshot.source, offset, include_declaration)
}

fn line_map_offset(source: &str, position: pyrite_common::position::Position) -> Option<u32> {
    LineMap::build(source).position_to_offset(position, source)
}

#[cfg(test)]
#[path = "../tests/references_tests.rs"]
mod tests;
