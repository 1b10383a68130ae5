//! Filesystem existence checks behind a trait.
//!
//! The resolver's contract is "pure given a filesystem snapshot" — tests
//! exercise it against an in-memory snapshot instead of real files on disk,
//! the same way the teacher's `build_module_resolution_maps` works purely
//! off an in-memory `file_names: &[String]` slice rather than touching disk
//! during resolution itself.

use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

pub trait FileSystemProbe {
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
}

/// Probes the real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct RealFileSystem;

impl FileSystemProbe for RealFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// An in-memory snapshot of which files and directories exist, for tests.
#[derive(Clone, Debug, Default)]
pub struct FakeFileSystem {
    files: FxHashSet<PathBuf>,
    dirs: FxHashSet<PathBuf>,
}

impl FakeFileSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file, implicitly registering every ancestor directory
    /// under the given root as a directory too.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        let path = path.into();
        let mut ancestor = path.parent();
        while let Some(dir) = ancestor {
            self.dirs.insert(dir.to_path_buf());
            ancestor = dir.parent();
        }
        self.files.insert(path);
        self
    }

    pub fn add_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.dirs.insert(path.into());
        self
    }

    pub fn remove_file(&mut self, path: &Path) -> &mut Self {
        self.files.remove(path);
        self
    }
}

impl FileSystemProbe for FakeFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }
}

#[cfg(test)]
#[path = "../tests/fs_probe_tests.rs"]
mod tests;
