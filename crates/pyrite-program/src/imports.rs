//! Translating a bound file's import statements into resolvable module
//! references.
//!
//! `pyrite-binder` only tracks imports as symbol declarations; nothing
//! upstream of this crate walks the parse tree to build the
//! `pyrite_resolver::ModuleReference` list a file's `import`/`from`
//! statements imply, so the driver owns that walk itself, alongside where
//! it already owns calling the resolver.

use pyrite_parser::{Node, NodeArena, NodeIndex};
use pyrite_resolver::ModuleReference;

/// One `import`/`from ... import` statement's resolvable target, plus the
/// statement node it came from, for diagnostics that need a span.
#[derive(Debug, Clone)]
pub struct ImportReference {
    pub node: NodeIndex,
    pub reference: ModuleReference,
}

/// Walk every statement reachable from `root`, collecting one
/// [`ImportReference`] per module an `import`/`from` statement names.
/// `from x import a, b` yields a single reference to `x` — `pyrite-binder`
/// already tracks which names came from it, this only cares about the
/// module itself.
#[must_use]
pub fn collect_import_references(arena: &NodeArena, root: NodeIndex) -> Vec<ImportReference> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        let node = arena.get(index);
        match node {
            Node::Import { names } => {
                for alias in names {
                    let parts = alias.name.split('.').map(str::to_owned).collect();
                    out.push(ImportReference { node: index, reference: ModuleReference::absolute(parts) });
                }
            }
            Node::ImportFrom { module, level, .. } => {
                let parts = module.as_deref().unwrap_or("").split('.').filter(|s| !s.is_empty()).map(str::to_owned).collect();
                let reference = if *level == 0 { ModuleReference::absolute(parts) } else { ModuleReference::relative(*level, parts) };
                out.push(ImportReference { node: index, reference });
            }
            _ => {}
        }
        stack.extend(node.children());
    }
    out
}

#[cfg(test)]
#[path = "../tests/imports_tests.rs"]
mod tests;
