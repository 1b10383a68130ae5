//! Import reference resolution: module parts + leading-dots count, plus the
//! file doing the importing, in to a resolved file path or `Unresolved`.
//!
//! Five-step precedence, first match wins: local stub sibling, configured
//! stub packages, in-tree source, the bundled fallback stub corpus,
//! third-party installed packages. Grounded on the teacher's
//! `build_module_resolution_maps`/`relative_specifier` shape — resolve
//! relative references against a directory, try candidate paths in a fixed
//! order — generalized from TypeScript's flat specifier-to-extension list
//! into Python's precedence tiers and package/module/namespace shapes.

use crate::fs_probe::FileSystemProbe;
use crate::search_path::SearchPaths;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// An import's module parts plus its leading-dots count for relative
/// imports (`from . import x` is level 1, `from .. import x` is level 2,
/// `import a.b.c` is level 0).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModuleReference {
    pub parts: Vec<String>,
    pub level: u32,
}

impl ModuleReference {
    #[must_use]
    pub fn absolute(parts: Vec<String>) -> Self {
        Self { parts, level: 0 }
    }

    #[must_use]
    pub fn relative(level: u32, parts: Vec<String>) -> Self {
        Self { parts, level }
    }

    fn cache_key(&self) -> String {
        format!("{}{}", ".".repeat(self.level as usize), self.parts.join("."))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportType {
    Local,
    ThirdParty,
    Builtin,
    Stdlib,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedModule {
    pub resolved_path: PathBuf,
    pub is_stub: bool,
    pub is_namespace_package: bool,
    pub import_type: ImportType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedModule),
    Unresolved,
}

impl Resolution {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

struct CacheEntry {
    resolution: Resolution,
    /// Every path this resolution's outcome depended on existing or not
    /// existing; a flip on any of them invalidates the entry.
    probed_paths: Vec<PathBuf>,
}

/// Resolves import references to files, memoized per `(fromFile,
/// reference)` and invalidated by search-path changes or a probed path's
/// existence flipping.
pub struct Resolver {
    search_paths: SearchPaths,
    fs: Box<dyn FileSystemProbe>,
    cache: FxHashMap<(PathBuf, String), CacheEntry>,
}

impl Resolver {
    #[must_use]
    pub fn new(search_paths: SearchPaths, fs: Box<dyn FileSystemProbe>) -> Self {
        Self { search_paths, fs, cache: FxHashMap::default() }
    }

    /// Replace the search-path configuration, invalidating every memoized
    /// resolution outright.
    pub fn set_search_paths(&mut self, search_paths: SearchPaths) {
        self.search_paths = search_paths;
        self.cache.clear();
    }

    /// Drop every cached resolution that depended on `path`'s existence.
    /// Call this when the caller observes the file/directory at `path`
    /// appear or disappear.
    pub fn invalidate_path(&mut self, path: &Path) {
        self.cache.retain(|_, entry| !entry.probed_paths.iter().any(|p| p == path));
    }

    pub fn resolve(&mut self, from_file: &Path, reference: &ModuleReference) -> Resolution {
        let key = (from_file.to_path_buf(), reference.cache_key());
        if let Some(entry) = self.cache.get(&key) {
            return entry.resolution.clone();
        }

        let mut probed = Vec::new();
        let parts = self.absolute_parts(from_file, reference, &mut probed);
        let resolution = match parts {
            Some(parts) => self.resolve_parts(&parts, &mut probed),
            None => Resolution::Unresolved,
        };

        self.cache.insert(key, CacheEntry { resolution: resolution.clone(), probed_paths: probed });
        resolution
    }

    /// Turn a (possibly relative) reference into absolute module parts,
    /// walking up from `from_file`'s own directory for each leading dot.
    fn absolute_parts(&self, from_file: &Path, reference: &ModuleReference, probed: &mut Vec<PathBuf>) -> Option<Vec<AbsolutePart>> {
        if reference.level == 0 {
            return Some(vec![AbsolutePart::Global(reference.parts.clone())]);
        }

        let mut base = from_file.parent()?.to_path_buf();
        for _ in 1..reference.level {
            base = base.parent()?.to_path_buf();
        }
        probed.push(base.clone());
        Some(vec![AbsolutePart::RelativeTo(base, reference.parts.clone())])
    }

    fn resolve_parts(&self, parts: &[AbsolutePart], probed: &mut Vec<PathBuf>) -> Resolution {
        // A relative import always anchors to exactly one candidate base;
        // an absolute one is tried against every configured root.
        match &parts[0] {
            AbsolutePart::RelativeTo(base, segments) => self.probe_module_shape(base, segments, ImportType::Local, probed).unwrap_or(Resolution::Unresolved),
            AbsolutePart::Global(segments) => self
                .probe_local_stub_sibling(segments, probed)
                .or_else(|| self.probe_roots(&self.search_paths.stub_roots.clone(), segments, ImportType::Stdlib, probed))
                .or_else(|| self.probe_roots(&self.search_paths.source_roots.clone(), segments, ImportType::Local, probed))
                .or_else(|| self.probe_bundled_fallback(segments, probed))
                .or_else(|| self.probe_third_party(segments, probed))
                .unwrap_or(Resolution::Unresolved),
        }
    }

    fn probe_local_stub_sibling(&self, segments: &[String], probed: &mut Vec<PathBuf>) -> Option<Resolution> {
        for root in &self.search_paths.source_roots {
            let module_py = join_module_path(root, segments, "py");
            probed.push(module_py.clone());
            if self.fs.is_file(&module_py) {
                let stub = join_module_path(root, segments, "pyi");
                probed.push(stub.clone());
                if self.fs.is_file(&stub) {
                    return Some(Resolution::Resolved(ResolvedModule { resolved_path: stub, is_stub: true, is_namespace_package: false, import_type: ImportType::Local }));
                }
            }
        }
        None
    }

    fn probe_bundled_fallback(&self, segments: &[String], probed: &mut Vec<PathBuf>) -> Option<Resolution> {
        let root = self.search_paths.bundled_fallback_root.clone()?;
        self.probe_module_shape(&root, segments, ImportType::Stdlib, probed)
    }

    fn probe_third_party(&self, segments: &[String], probed: &mut Vec<PathBuf>) -> Option<Resolution> {
        if !self.search_paths.consult_third_party {
            return None;
        }
        self.probe_roots(&self.search_paths.third_party_roots.clone(), segments, ImportType::ThirdParty, probed)
    }

    fn probe_roots(&self, roots: &[PathBuf], segments: &[String], import_type: ImportType, probed: &mut Vec<PathBuf>) -> Option<Resolution> {
        for root in roots {
            if let Some(resolution) = self.probe_module_shape(root, segments, import_type, probed) {
                return Some(resolution);
            }
        }
        None
    }

    /// Try, under one root, the three shapes a module reference can take:
    /// a package (`dir/__init__.pyi` then `.py`), a plain module
    /// (`dir/name.pyi` then `.py`), or a namespace package (a directory
    /// with no `__init__` at all, unioned across every contributing root).
    fn probe_module_shape(&self, root: &Path, segments: &[String], import_type: ImportType, probed: &mut Vec<PathBuf>) -> Option<Resolution> {
        let package_dir = segments.iter().fold(root.to_path_buf(), |acc, part| acc.join(part));

        let init_stub = package_dir.join("__init__.pyi");
        probed.push(init_stub.clone());
        if self.fs.is_file(&init_stub) {
            return Some(Resolution::Resolved(ResolvedModule { resolved_path: init_stub, is_stub: true, is_namespace_package: false, import_type }));
        }
        let init_source = package_dir.join("__init__.py");
        probed.push(init_source.clone());
        if self.fs.is_file(&init_source) {
            return Some(Resolution::Resolved(ResolvedModule { resolved_path: init_source, is_stub: false, is_namespace_package: false, import_type }));
        }

        let module_stub = package_dir.with_extension("pyi");
        probed.push(module_stub.clone());
        if self.fs.is_file(&module_stub) {
            return Some(Resolution::Resolved(ResolvedModule { resolved_path: module_stub, is_stub: true, is_namespace_package: false, import_type }));
        }
        let module_source = package_dir.with_extension("py");
        probed.push(module_source.clone());
        if self.fs.is_file(&module_source) {
            return Some(Resolution::Resolved(ResolvedModule { resolved_path: module_source, is_stub: false, is_namespace_package: false, import_type }));
        }

        probed.push(package_dir.clone());
        if self.fs.is_dir(&package_dir) {
            return Some(Resolution::Resolved(ResolvedModule { resolved_path: package_dir, is_stub: false, is_namespace_package: true, import_type }));
        }
        None
    }
}

fn join_module_path(root: &Path, segments: &[String], extension: &str) -> PathBuf {
    let mut path = segments.iter().fold(root.to_path_buf(), |acc, part| acc.join(part));
    path.set_extension(extension);
    path
}

enum AbsolutePart {
    Global(Vec<String>),
    RelativeTo(PathBuf, Vec<String>),
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
