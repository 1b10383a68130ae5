//! The persistent, content-addressed cache.
//!
//! One file on disk per cached entry, named after its key's hex digest, so
//! concurrent writers from separate processes never contend for the same
//! inode — the filename *is* the consistency token, the same story the
//! teacher's `incremental.rs` (absent from this pack; reconstructed from
//! its surviving `incremental_tests.rs`) tells with a single
//! `tsconfig.tsbuildinfo` file keyed by a `compiler_version` field checked
//! on load. This cache is keyed per source file instead of per build, so a
//! change to one file never invalidates any other file's entry.
//!
//! An entry never stores evaluated types — only a parsed tree and a bind
//! result, which is everything the driver needs to skip straight to type
//! evaluation on a cache hit.

use pyrite_binder::BindResult;
use pyrite_common::content_hash::ContentHash;
use pyrite_parser::ParseResult;
use rustc_hash::FxHashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(serde::Serialize, serde::Deserialize)]
struct CacheEntry {
    tool_version: String,
    config_hash: ContentHash,
    content_hash: ContentHash,
    parse: ParseResult,
    bind: BindResult,
    dependencies: Vec<(PathBuf, ContentHash)>,
}

/// Result of a parse+bind pair loaded from (or about to be written to) the
/// cache, plus the dependency list that was observed while binding it.
pub struct CachedArtifacts {
    pub parse: ParseResult,
    pub bind: BindResult,
    pub dependencies: Vec<(PathBuf, ContentHash)>,
}

#[derive(Default, Debug)]
pub struct CacheReport {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub corrupt_entries: usize,
}

pub struct PersistentCache {
    dir: PathBuf,
    tool_version: String,
}

impl PersistentCache {
    #[must_use]
    pub fn new(dir: PathBuf, tool_version: impl Into<String>) -> Self {
        Self { dir, tool_version: tool_version.into() }
    }

    /// `hash(toolVersion || configHash || contentHash)`, the cache key for
    /// one file at one content version under one configuration.
    #[must_use]
    pub fn key(&self, config_hash: ContentHash, content_hash: ContentHash) -> ContentHash {
        ContentHash::of_str(&self.tool_version).combine(&config_hash).combine(&content_hash)
    }

    fn entry_path(&self, key: ContentHash) -> PathBuf {
        self.dir.join(format!("{}.json", key.to_hex()))
    }

    /// Load the entry for `key`, verifying the tool version, config hash,
    /// and content hash recorded inside it, then recursively verifying
    /// every dependency's content hash via `dependency_hash`. A mismatch
    /// at any level invalidates the whole entry.
    pub fn load(&self, key: ContentHash, config_hash: ContentHash, content_hash: ContentHash, mut dependency_hash: impl FnMut(&Path) -> Option<ContentHash>) -> Option<CachedArtifacts> {
        let bytes = fs::read(self.entry_path(key)).ok()?;
        let entry: CacheEntry = serde_json::from_slice(&bytes).ok()?;
        if entry.tool_version != self.tool_version || entry.config_hash != config_hash || entry.content_hash != content_hash {
            return None;
        }
        for (dep_path, expected) in &entry.dependencies {
            if dependency_hash(dep_path) != Some(*expected) {
                return None;
            }
        }
        Some(CachedArtifacts { parse: entry.parse, bind: entry.bind, dependencies: entry.dependencies })
    }

    /// Write an entry, atomically: serialize to a temp file in the same
    /// directory, then rename over the final name. No lock is taken —
    /// two writers racing to produce the same key are writing the same
    /// bytes, and a reader either sees the old file or the new one, never
    /// a half-written one.
    pub fn store(&self, key: ContentHash, config_hash: ContentHash, content_hash: ContentHash, parse: &ParseResult, bind: &BindResult, dependencies: Vec<(PathBuf, ContentHash)>) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let entry = CacheEntry { tool_version: self.tool_version.clone(), config_hash, content_hash, parse: parse.clone(), bind: bind.clone(), dependencies };
        let bytes = serde_json::to_vec(&entry).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(self.entry_path(key)).map_err(|e| e.error)?;
        Ok(())
    }

    /// Drop the whole cache directory.
    pub fn clear(&self) -> io::Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)?;
        }
        Ok(())
    }

    /// Scan every entry on disk, reporting how many parse as well-formed
    /// entries written by this tool version versus how many are corrupt or
    /// belong to a different tool version. Used by `--stats`; doesn't
    /// check any entry's dependency hashes, since that needs the current
    /// content of files this cache doesn't necessarily have open.
    pub fn validate(&self) -> io::Result<CacheReport> {
        let mut report = CacheReport::default();
        if !self.dir.exists() {
            return Ok(report);
        }
        for item in fs::read_dir(&self.dir)? {
            let item = item?;
            if !item.path().extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            report.total_entries += 1;
            match fs::read(item.path()).ok().and_then(|bytes| serde_json::from_slice::<CacheEntry>(&bytes).ok()) {
                Some(entry) if entry.tool_version == self.tool_version => report.valid_entries += 1,
                _ => report.corrupt_entries += 1,
            }
        }
        Ok(report)
    }

    /// Remove every entry on disk whose key isn't in `keep`. Used by the
    /// CLI's `--dependencies`-driven cleanup to drop entries for files no
    /// longer in the tracked set.
    pub fn prune(&self, keep: &FxHashSet<ContentHash>) -> io::Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }
        let keep_names: FxHashSet<String> = keep.iter().map(ContentHash::to_hex).collect();
        let mut removed = 0;
        for item in fs::read_dir(&self.dir)? {
            let item = item?;
            let stem = item.path().file_stem().and_then(|s| s.to_str()).map(str::to_owned);
            if stem.is_some_and(|s| !keep_names.contains(&s)) {
                fs::remove_file(item.path())?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "../tests/cache_tests.rs"]
mod tests;
