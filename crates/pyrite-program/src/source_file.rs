//! Per-file pipeline state.
//!
//! Each file the driver knows about advances independently through
//! `Unparsed -> Parsed -> Bound -> Checked`, mirroring the teacher driver's
//! `CompilationCache` (one `BindCacheEntry` per path, keyed by a content
//! hash) generalized into an explicit state machine so the scheduler can
//! ask "what does this file need next" without re-deriving it from which
//! fields happen to be populated.

use pyrite_binder::BindResult;
use pyrite_common::content_hash::ContentHash;
use pyrite_common::diagnostics::Diagnostic;
use pyrite_parser::ParseResult;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFileState {
    /// Tracked, but its text has never been read and tokenized.
    Unparsed,
    /// Parsed; not yet bound (symbols/scopes/flow graph not built).
    Parsed,
    /// Bound; type evaluation and checking have not run (or are stale).
    Bound,
    /// Previously `Checked`, but a dependency changed underneath it.
    /// Parse and bind artifacts are still valid — only evaluation and
    /// checking need to re-run.
    CheckDeferred,
    /// Fully evaluated and checked; `diagnostics` is authoritative.
    Checked,
}

/// Why a file was marked dirty, matching the three `markDirty` reasons a
/// caller can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirtyReason {
    /// The file's own text changed. Forces a full re-parse and re-bind.
    ContentChanged,
    /// A file it depends on changed. Parse/bind survive; evaluation and
    /// checking must re-run.
    DepChanged,
    /// A checker option or the tool version changed. Treated the same as
    /// `ContentChanged` since a changed Python version target can affect
    /// which syntax the parser accepts, not just which diagnostics the
    /// checker reports.
    ConfigChanged,
}

#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    /// The dotted module name this file binds as, used to label classes it
    /// defines and passed to `Evaluator::new`.
    pub module_name: String,
    pub state: SourceFileState,
    pub content_hash: Option<ContentHash>,
    pub source: Option<String>,
    pub parse: Option<ParseResult>,
    pub bind: Option<BindResult>,
    /// Resolved paths of every module this file imports, populated while
    /// binding. Empty until the file has reached `Bound` at least once.
    pub dependencies: Vec<PathBuf>,
    /// `reportMissingImports` for every import statement the resolver
    /// couldn't resolve, populated alongside `dependencies` while
    /// binding and folded into `diagnostics` at `Checked`.
    pub import_diagnostics: Vec<Diagnostic>,
    /// Merged parse + bind + check diagnostics, valid once `state` is
    /// `Checked`. Stale (but left in place, harmless to read) otherwise.
    pub diagnostics: Vec<Diagnostic>,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: PathBuf, module_name: String) -> Self {
        Self {
            path,
            module_name,
            state: SourceFileState::Unparsed,
            content_hash: None,
            source: None,
            parse: None,
            bind: None,
            dependencies: Vec::new(),
            import_diagnostics: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Apply a dirty reason, advancing (really: regressing) `state` the
    /// way `markDirty` requires. Never makes a file dirtier than its
    /// current pipeline position already implies — marking an `Unparsed`
    /// file `DepChanged` is a no-op, for instance, since it has no bind
    /// artifacts for a dependency change to invalidate.
    pub fn mark_dirty(&mut self, reason: DirtyReason) {
        match reason {
            DirtyReason::ContentChanged | DirtyReason::ConfigChanged => {
                self.state = SourceFileState::Unparsed;
                self.content_hash = None;
                self.source = None;
                self.parse = None;
                self.bind = None;
                self.dependencies.clear();
                self.import_diagnostics.clear();
                self.diagnostics.clear();
            }
            DirtyReason::DepChanged => {
                if matches!(self.state, SourceFileState::Bound | SourceFileState::CheckDeferred | SourceFileState::Checked) {
                    self.state = SourceFileState::CheckDeferred;
                }
            }
        }
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.state == SourceFileState::Checked
    }
}

#[cfg(test)]
#[path = "../tests/source_file_tests.rs"]
mod tests;
