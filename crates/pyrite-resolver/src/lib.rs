//! Resolves import references to files across source roots, stub
//! packages, typeshed, a bundled fallback corpus, and third-party
//! installed packages.
//!
//! Resolution is pure given a filesystem snapshot: the [`Resolver`] owns a
//! [`fs_probe::FileSystemProbe`] instead of reaching for `std::fs` directly,
//! so callers can swap in [`fs_probe::FakeFileSystem`] for tests and the
//! program driver can invalidate memoized results precisely when a watched
//! path's existence flips.

pub mod fs_probe;
pub mod resolver;
pub mod search_path;

pub use fs_probe::{FakeFileSystem, FileSystemProbe, RealFileSystem};
pub use resolver::{ImportType, ModuleReference, Resolution, Resolver, ResolvedModule};
pub use search_path::SearchPaths;
