//! Lexical scope tree.
//!
//! Built as a persistent side structure during binding (one `Scope` per
//! scope-introducing node) so later passes can walk it by `ScopeId` without
//! re-running the binder — the same separation the teacher binder keeps
//! between its transient scope-chain walk and its persistent scope arena.

use crate::symbol::SymbolTable;
use pyrite_parser::NodeIndex;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const NONE: Self = Self(u32::MAX);

    #[must_use]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }

    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScopeKind {
    Builtin,
    Module,
    Class,
    Function,
    /// Comprehension or generator-expression scope; dict/set/generator
    /// comprehensions all get their own scope the same way a list
    /// comprehension does in Python 3.
    ListComprehension,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct ScopeFlags: u8 {
        const IN_ASYNC = 1 << 0;
        const IN_GENERATOR = 1 << 1;
        /// Module scope declares `__all__`; `from x import *` elsewhere
        /// resolves against that list instead of every public name.
        const EXPORTS_ALL_VIA_DUNDER_ALL = 1 << 2;
        /// A `from x import *` occurred somewhere in this scope, so an
        /// unresolved name here isn't necessarily an undefined one.
        const HAS_WILDCARD_IMPORT = 1 << 3;
    }
}

/// What a `global`/`nonlocal` statement redirects a name's declarations to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NameRedirect {
    Global,
    Nonlocal,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Scope {
    pub parent: ScopeId,
    pub kind: ScopeKind,
    pub owning_node: NodeIndex,
    pub flags: ScopeFlags,
    pub table: SymbolTable,
    pub redirects: FxHashMap<String, NameRedirect>,
}

impl Scope {
    #[must_use]
    pub fn new(parent: ScopeId, kind: ScopeKind, owning_node: NodeIndex) -> Self {
        Self {
            parent,
            kind,
            owning_node,
            flags: ScopeFlags::empty(),
            table: SymbolTable::new(),
            redirects: FxHashMap::default(),
        }
    }
}

/// Owns every scope created while binding one module.
#[derive(Default, Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, scope: Scope) -> ScopeId {
        let id = ScopeId(u32::try_from(self.scopes.len()).expect("scope count exceeds u32 capacity"));
        self.scopes.push(scope);
        id
    }

    #[must_use]
    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    pub fn get_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.scopes.get_mut(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Walk from `id` up through `parent` links toward the module scope,
    /// capped the same way the binder's own name-resolution walk is capped,
    /// so a malformed parent cycle can't loop forever.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        let mut current = id;
        let mut steps = 0usize;
        std::iter::from_fn(move || {
            if current.is_none() || steps >= pyrite_common::limits::MAX_SCOPE_WALK_ITERATIONS {
                return None;
            }
            steps += 1;
            let next = current;
            current = self.get(current).map_or(ScopeId::NONE, |s| s.parent);
            Some(next)
        })
    }
}

#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod tests;
