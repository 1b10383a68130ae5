//! Search-path configuration the resolver consults, in precedence order.
//!
//! Kept as one small struct rather than scattering roots across call sites
//! so that changing it has one obvious effect: every memoized resolution
//! becomes stale, mirroring the teacher's own narrow invalidation story for
//! its (smaller) module-resolution maps.

use std::path::{Path, PathBuf};

/// Every root the resolver searches, grouped by the precedence tier it
/// belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPaths {
    /// Project source roots: plain in-tree `.py` files, also where a
    /// sibling `.pyi` is looked for first.
    pub source_roots: Vec<PathBuf>,
    /// Typeshed root plus any user-configured typing stub package roots,
    /// in precedence order.
    pub stub_roots: Vec<PathBuf>,
    /// Stub corpus bundled with pyrite itself, consulted only once every
    /// configured stub root has missed.
    pub bundled_fallback_root: Option<PathBuf>,
    /// Installed third-party package roots (site-packages-shaped).
    pub third_party_roots: Vec<PathBuf>,
    /// If false, step 5 (third-party installed packages) is skipped
    /// entirely rather than just coming up empty.
    pub consult_third_party: bool,
}

impl SearchPaths {
    #[must_use]
    pub fn new() -> Self {
        Self { consult_third_party: true, ..Self::default() }
    }

    /// All roots the resolver could possibly probe, for cache invalidation
    /// bookkeeping when a root is added or removed wholesale.
    #[must_use]
    pub fn all_roots(&self) -> Vec<&Path> {
        let mut roots: Vec<&Path> = self.source_roots.iter().map(PathBuf::as_path).collect();
        roots.extend(self.stub_roots.iter().map(PathBuf::as_path));
        roots.extend(self.bundled_fallback_root.as_deref());
        if self.consult_third_party {
            roots.extend(self.third_party_roots.iter().map(PathBuf::as_path));
        }
        roots
    }
}

#[cfg(test)]
#[path = "../tests/search_path_tests.rs"]
mod tests;
