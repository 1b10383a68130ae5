//! Symbols and their declaration lists.
//!
//! A `Symbol` is a name plus every syntactic place that introduces it. This
//! mirrors the teacher binder's split between "the thing resolution finds"
//! (`Symbol`) and "the places that gave it a value" (its declaration list) —
//! Python just has a narrower declaration vocabulary than TypeScript's, with
//! no merge-compatibility matrix to maintain between them.

use pyrite_common::span::Span;
use pyrite_parser::NodeIndex;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct SymbolId(u32);

impl SymbolId {
    pub const NONE: Self = Self(u32::MAX);

    #[must_use]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }

    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct SymbolFlags: u16 {
        const VARIABLE = 1 << 0;
        const FUNCTION = 1 << 1;
        const CLASS = 1 << 2;
        const PARAMETER = 1 << 3;
        const IMPORT = 1 << 4;
        const CLASS_MEMBER = 1 << 5;
        const INSTANCE_MEMBER = 1 << 6;
        const PRIVATE = 1 << 7;
        const EXPORTED = 1 << 8;
    }
}

/// One syntactic place that introduces a name.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Declaration {
    Variable { node: NodeIndex, span: Span, annotation: Option<NodeIndex> },
    Function { node: NodeIndex, span: Span },
    Class { node: NodeIndex, span: Span },
    Parameter { node: NodeIndex, span: Span, annotation: Option<NodeIndex> },
    ImportAlias { node: NodeIndex, span: Span, module_path: String },
    ImportFromAs { node: NodeIndex, span: Span, module_path: Option<String>, original_name: String },
}

impl Declaration {
    #[must_use]
    pub fn node(&self) -> NodeIndex {
        match self {
            Declaration::Variable { node, .. }
            | Declaration::Function { node, .. }
            | Declaration::Class { node, .. }
            | Declaration::Parameter { node, .. }
            | Declaration::ImportAlias { node, .. }
            | Declaration::ImportFromAs { node, .. } => *node,
        }
    }

    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Declaration::Variable { span, .. }
            | Declaration::Function { span, .. }
            | Declaration::Class { span, .. }
            | Declaration::Parameter { span, .. }
            | Declaration::ImportAlias { span, .. }
            | Declaration::ImportFromAs { span, .. } => *span,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Symbol {
    pub name: String,
    pub flags: SymbolFlags,
    pub declarations: Vec<Declaration>,
}

impl Symbol {
    fn new(name: String) -> Self {
        Self { name, flags: SymbolFlags::empty(), declarations: Vec::new() }
    }
}

/// Owns every symbol bound across one file.
#[derive(Default, Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, name: String) -> SymbolId {
        let id = SymbolId(u32::try_from(self.symbols.len()).expect("symbol table exceeds u32 capacity"));
        self.symbols.push(Symbol::new(name));
        id
    }

    #[must_use]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0 as usize)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Name -> `SymbolId` map for one scope. A thin wrapper rather than a bare
/// `FxHashMap` so scope/export code reads in terms of symbols, not hash-map
/// internals.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SymbolTable(FxHashMap<String, SymbolId>);

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.0.get(name).copied()
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn set(&mut self, name: String, id: SymbolId) {
        self.0.insert(name, id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SymbolId)> {
        self.0.iter()
    }
}

#[cfg(test)]
#[path = "../tests/symbol_tests.rs"]
mod tests;
