//! The multi-file driver: ties the per-file pipeline (scan, parse, bind,
//! evaluate, check) into a module graph that tracks dependencies, reuses a
//! persistent on-disk cache across runs, and answers language-service
//! queries against whatever has already been checked without forcing a
//! full-program pass.
//!
//! [`program::Program`] is the crate's single entry point; the other
//! modules are its building blocks and aren't meant to be driven directly
//! by a caller outside this crate except where a CLI or LSP frontend needs
//! the lower-level pieces ([`source_reader::SourceReader`] for a fake
//! filesystem in tests, [`cache::PersistentCache`] for `--stats`/cache
//! admin commands).

pub mod cache;
pub mod imports;
pub mod language_service;
pub mod program;
pub mod source_file;
pub mod source_reader;

pub use cache::{CacheReport, CachedArtifacts, PersistentCache};
pub use imports::{collect_import_references, ImportReference};
pub use language_service::HoverInfo;
pub use program::{module_name_for, FileSnapshot, Program};
pub use source_file::{DirtyReason, SourceFile, SourceFileState};
pub use source_reader::{FakeSourceReader, RealSourceReader, SourceReader};
