//! Completion items for a position, built on top of
//! [`pyrite_program::language_service::completion`]'s plain name list by
//! re-walking the same scope chain to classify each name from its symbol's
//! [`SymbolFlags`].
//!
//! The teacher's `tsz-lsp` completions carry auto-import bookkeeping, sort
//! priorities, and snippet insert-text for call signatures; none of that
//! survives into this crate's scope (no cross-file symbol index is built,
//! and a completion item here never needs more than a label and a kind).

use crate::types::{CompletionItem, CompletionItemKind};
use pyrite_binder::symbol::SymbolFlags;
use pyrite_binder::BindResult;
use pyrite_common::position::Position;
use pyrite_parser::{NodeArena, NodeIndex};
use pyrite_program::{language_service, Program};
use std::path::Path;

fn kind_for(flags: SymbolFlags) -> CompletionItemKind {
    if flags.contains(SymbolFlags::FUNCTION) {
        CompletionItemKind::Function
    } else if flags.contains(SymbolFlags::CLASS) {
        CompletionItemKind::Class
    } else if flags.contains(SymbolFlags::PARAMETER) {
        CompletionItemKind::Parameter
    } else if flags.contains(SymbolFlags::IMPORT) {
        CompletionItemKind::Module
    } else if flags.contains(SymbolFlags::CLASS_MEMBER) || flags.contains(SymbolFlags::INSTANCE_MEMBER) {
        CompletionItemKind::Property
    } else {
        CompletionItemKind::Variable
    }
}

/// Every name visible at `offset`, deduplicated innermost-scope-first, each
/// tagged with the kind of its nearest-visible declaration.
#[must_use]
pub fn completions_at(arena: &NodeArena, root: NodeIndex, bind: &BindResult, offset: u32) -> Vec<CompletionItem> {
    let node = language_service::node_at(arena, root, offset);
    let scope_id = language_service::enclosing_scope(arena, bind, node);
    let mut seen = rustc_hash::FxHashSet::default();
    let mut items = Vec::new();
    for ancestor_scope in bind.scopes.ancestors(scope_id) {
        let Some(scope) = bind.scopes.get(ancestor_scope) else { continue };
        for (name, symbol_id) in scope.table.iter() {
            if !seen.insert(name.clone()) {
                continue;
            }
            let flags = bind.symbols.get(*symbol_id).map_or(SymbolFlags::empty(), |s| s.flags);
            items.push(CompletionItem { label: name.clone(), kind: kind_for(flags), detail: None });
        }
    }
    items
}

#[must_use]
pub fn completion(program: &mut Program, path: &Path, position: Position) -> Vec<CompletionItem> {
    let Some(snapshot) = program.file_snapshot(path) else { return Vec::new() };
    let line_map = pyrite_common::position::LineMap::build(&snapshot.source);
    let Some(offset) = line_map.position_to_offset(position, &snapshot.source) else { return Vec::new() };
    completions_at(&snapshot.parse.arena, snapshot.parse.root, &snapshot.bind, offset)
}

#[cfg(test)]
#[path = "../tests/completions_tests.rs"]
mod tests;
