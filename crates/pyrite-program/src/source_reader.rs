//! Source text access behind a trait.
//!
//! The driver never touches `std::fs` directly so an embedder can back it
//! with whatever read primitive fits — a plain file read for the CLI, an
//! open-editor-buffer lookup for the language server. Mirrors the
//! resolver's own split between a real and an in-memory
//! [`pyrite_resolver::fs_probe::FileSystemProbe`].

use rustc_hash::FxHashMap;
use std::io;
use std::path::{Path, PathBuf};

pub trait SourceReader {
    fn read(&self, path: &Path) -> io::Result<String>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RealSourceReader;

impl SourceReader for RealSourceReader {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// An in-memory source map, for tests and for the language server's
/// open-document overlay.
#[derive(Clone, Debug, Default)]
pub struct FakeSourceReader {
    files: FxHashMap<PathBuf, String>,
}

impl FakeSourceReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> &mut Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    pub fn remove(&mut self, path: &Path) -> &mut Self {
        self.files.remove(path);
        self
    }
}

impl SourceReader for FakeSourceReader {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no such file: {}", path.display())))
    }
}

#[cfg(test)]
#[path = "../tests/source_reader_tests.rs"]
mod tests;
