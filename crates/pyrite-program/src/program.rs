//! The multi-file driver: owns the module graph, schedules pipeline work
//! one file at a time, and answers language-service queries against
//! whatever is already checked (triggering just enough on-demand work to
//! answer a query about one file without ever running a full-program
//! check).
//!
//! Grounded on the teacher's `tsz-cli::driver::CompilationCache` for the
//! per-file `dependencies`/`reverse_dependencies` bookkeeping shape, and on
//! the API reconstructed from `tsz-cli::incremental_tests.rs` (the
//! teacher's own `incremental.rs` didn't survive retrieval) for the
//! save/load-with-version-check idiom the persistent cache in [`crate::cache`]
//! follows.

use crate::cache::PersistentCache;
use crate::imports::collect_import_references;
use crate::language_service::{self, HoverInfo};
use crate::source_file::{DirtyReason, SourceFile, SourceFileState};
use crate::source_reader::SourceReader;
#[cfg(test)]
use crate::source_reader::FakeSourceReader;
use indexmap::IndexMap;
use pyrite_checker::Checker;
use pyrite_common::checker_options::CheckerOptions;
use pyrite_common::content_hash::ContentHash;
use pyrite_common::diagnostics::{Diagnostic, DiagnosticRule};
use pyrite_common::position::{Location, Position};
use pyrite_parser::Dialect;
use pyrite_resolver::{Resolution, Resolver};
use pyrite_solver::{Evaluator, TypeInterner};
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[must_use]
pub fn module_name_for(path: &Path) -> String {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("module").to_string()
}

/// Fingerprint the parts of [`CheckerOptions`] that change which
/// diagnostics get reported, for the cache key. `CheckerOptions` itself
/// isn't serde-enabled (only the parse/bind artifacts the cache actually
/// stores are); hashing a sorted, `Debug`-rendered summary is enough to
/// detect a configuration change without retrofitting serde onto a type
/// the cache never round-trips.
fn config_fingerprint(options: &CheckerOptions) -> ContentHash {
    let mut overrides: Vec<String> = options.rule_overrides.iter().map(|(rule, severity)| format!("{rule:?}={severity:?}")).collect();
    overrides.sort();
    let summary = format!(
        "{:?}|{}|{}|{}",
        options.type_checking_mode,
        options.use_library_code_for_types,
        options.strict_for_file,
        overrides.join(",")
    );
    ContentHash::of_str(&summary)
}

pub struct Program {
    dialect: Dialect,
    options: CheckerOptions,
    config_hash: ContentHash,
    resolver: Resolver,
    reader: Box<dyn SourceReader>,
    cache: Option<PersistentCache>,
    interner: TypeInterner,
    files: IndexMap<PathBuf, SourceFile>,
    root_files: FxHashSet<PathBuf>,
    reverse_dependencies: FxHashMap<PathBuf, FxHashSet<PathBuf>>,
}

impl Program {
    #[must_use]
    pub fn new(dialect: Dialect, options: CheckerOptions, resolver: Resolver, reader: Box<dyn SourceReader>) -> Self {
        Self {
            config_hash: config_fingerprint(&options),
            dialect,
            options,
            resolver,
            reader,
            cache: None,
            interner: TypeInterner::new(),
            files: IndexMap::new(),
            root_files: FxHashSet::default(),
            reverse_dependencies: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: PersistentCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the checker configuration, invalidating every tracked
    /// file's evaluation and checking (not its parse/bind, unless the new
    /// Python version target changes what the parser accepts — callers
    /// that change `python_version` should also re-set `dialect` and
    /// expect a full re-parse).
    pub fn set_options(&mut self, options: CheckerOptions) {
        self.options = options;
        self.config_hash = config_fingerprint(&self.options);
        let paths: Vec<PathBuf> = self.files.keys().cloned().collect();
        for path in paths {
            self.mark_dirty(&path, DirtyReason::ConfigChanged);
        }
    }

    /// Set which files are tracked roots. Files no longer tracked are
    /// dropped unless something else still depends on them, in which case
    /// they're kept around as dependency-only entries.
    pub fn set_tracked_files(&mut self, paths: Vec<PathBuf>) {
        let new_set: FxHashSet<PathBuf> = paths.iter().cloned().collect();
        let stale: Vec<PathBuf> = self.root_files.iter().filter(|p| !new_set.contains(*p)).cloned().collect();
        for path in stale {
            self.root_files.remove(&path);
            let still_needed = self.reverse_dependencies.get(&path).is_some_and(|deps| !deps.is_empty());
            if !still_needed {
                self.files.remove(&path);
            }
        }
        for path in paths {
            self.root_files.insert(path.clone());
            self.files.entry(path.clone()).or_insert_with(|| SourceFile::new(path.clone(), module_name_for(&path)));
        }
    }

    pub fn mark_dirty(&mut self, path: &Path, reason: DirtyReason) {
        if let Some(file) = self.files.get_mut(path) {
            file.mark_dirty(reason);
        }
        if matches!(reason, DirtyReason::ContentChanged) {
            if let Some(dependents) = self.reverse_dependencies.get(path).cloned() {
                for dependent in dependents {
                    if let Some(file) = self.files.get_mut(&dependent) {
                        file.mark_dirty(DirtyReason::DepChanged);
                    }
                }
            }
        }
    }

    /// Perform pipeline work until `deadline` passes (or forever, if
    /// `None`, for batch mode), returning whether any tracked file still
    /// has work left to do. One call never yields mid-step: each parse,
    /// bind, or evaluate-and-check pass for one file always finishes
    /// before the deadline is checked again.
    pub fn analyze(&mut self, deadline: Option<Instant>) -> bool {
        let _span = tracing::info_span!("analyze", tracked = self.root_files.len()).entered();
        loop {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    return self.has_pending_work();
                }
            }
            if let Some(path) = self.next_in_state(SourceFileState::Unparsed) {
                self.parse_file(&path);
                continue;
            }
            if let Some(path) = self.next_in_state(SourceFileState::Parsed) {
                self.bind_file(&path);
                continue;
            }
            if let Some(path) = self.next_checkable() {
                self.check_file(&path);
                continue;
            }
            return false;
        }
    }

    fn has_pending_work(&self) -> bool {
        self.files.values().any(|f| !f.is_checked())
    }

    fn next_in_state(&self, state: SourceFileState) -> Option<PathBuf> {
        for (path, file) in self.files.iter() {
            if file.state == state {
                return Some(path.clone());
            }
        }
        None
    }

    fn next_checkable(&self) -> Option<PathBuf> {
        for (path, file) in self.files.iter() {
            if matches!(file.state, SourceFileState::Bound | SourceFileState::CheckDeferred) && self.dependencies_ready(file) {
                return Some(path.clone());
            }
        }
        None
    }

    /// A file is checkable once every direct dependency has at least
    /// finished binding — evaluating `path` only ever reads a dependency's
    /// declared top-level signatures, never a type the dependency's own
    /// checker pass computed, so this is enough to break import cycles
    /// without forcing the whole cycle through checking in some order.
    fn dependencies_ready(&self, file: &SourceFile) -> bool {
        for dep in &file.dependencies {
            if let Some(dep_file) = self.files.get(dep) {
                if matches!(dep_file.state, SourceFileState::Unparsed | SourceFileState::Parsed) {
                    return false;
                }
            }
        }
        true
    }

    fn content_hash_for(&self, path: &Path) -> Option<ContentHash> {
        if let Some(hash) = self.files.get(path).and_then(|f| f.content_hash) {
            return Some(hash);
        }
        self.reader.read(path).ok().map(|text| ContentHash::of_str(&text))
    }

    fn record_dependencies(&mut self, path: &Path, deps: &[PathBuf]) {
        for dep in deps {
            self.files.entry(dep.clone()).or_insert_with(|| SourceFile::new(dep.clone(), module_name_for(dep)));
            self.reverse_dependencies.entry(dep.clone()).or_default().insert(path.to_path_buf());
        }
    }

    fn parse_file(&mut self, path: &Path) {
        let source = match self.reader.read(path) {
            Ok(source) => source,
            Err(error) => {
                if let Some(file) = self.files.get_mut(path) {
                    file.diagnostics = vec![unreadable_file_diagnostic(path, &error)];
                    file.state = SourceFileState::Checked;
                }
                return;
            }
        };
        let content_hash = ContentHash::of_str(&source);

        if let Some(cache) = &self.cache {
            let key = cache.key(self.config_hash, content_hash);
            let hit = cache.load(key, self.config_hash, content_hash, |dep| self.files.get(dep).and_then(|f| f.content_hash));
            if let Some(artifacts) = hit {
                tracing::debug!(file = %path.display(), "cache hit");
                let deps: Vec<PathBuf> = artifacts.dependencies.iter().map(|(p, _)| p.clone()).collect();
                self.record_dependencies(path, &deps);
                if let Some(file) = self.files.get_mut(path) {
                    file.source = Some(source);
                    file.content_hash = Some(content_hash);
                    file.dependencies = deps;
                    file.parse = Some(artifacts.parse);
                    file.bind = Some(artifacts.bind);
                    file.state = SourceFileState::Bound;
                }
                return;
            }
        }

        let label = path.display().to_string();
        let parse = pyrite_parser::parse(&source, &label, self.dialect);
        if let Some(file) = self.files.get_mut(path) {
            file.source = Some(source);
            file.content_hash = Some(content_hash);
            file.parse = Some(parse);
            file.state = SourceFileState::Parsed;
        }
    }

    fn bind_file(&mut self, path: &Path) {
        let label = path.display().to_string();
        let parse = match self.files.get(path).and_then(|f| f.parse.clone()) {
            Some(parse) => parse,
            None => return,
        };
        let content_hash = self.files.get(path).and_then(|f| f.content_hash);

        let bind = pyrite_binder::bind_module(&parse.arena, parse.root, &label, self.dialect);
        let references = collect_import_references(&parse.arena, parse.root);
        let mut deps = Vec::new();
        let mut import_diagnostics = Vec::new();
        for reference in &references {
            match self.resolver.resolve(path, &reference.reference) {
                Resolution::Resolved(resolved) => deps.push(resolved.resolved_path),
                Resolution::Unresolved => {
                    let severity = self.options.severity_for(DiagnosticRule::MissingImports);
                    if severity != pyrite_common::diagnostics::Severity::None {
                        let span = parse.arena.span(reference.node);
                        let name = module_reference_name(&reference.reference);
                        import_diagnostics.push(Diagnostic::new(label.clone(), span, severity, DiagnosticRule::MissingImports, format!("Import \"{name}\" could not be resolved")));
                    }
                }
            }
        }
        deps.sort();
        deps.dedup();
        self.record_dependencies(path, &deps);

        if let (Some(cache), Some(content_hash)) = (&self.cache, content_hash) {
            let dep_hashes: Vec<(PathBuf, ContentHash)> = deps.iter().filter_map(|dep| self.content_hash_for(dep).map(|hash| (dep.clone(), hash))).collect();
            let key = cache.key(self.config_hash, content_hash);
            let _ = cache.store(key, self.config_hash, content_hash, &parse, &bind, dep_hashes);
        }

        if let Some(file) = self.files.get_mut(path) {
            file.dependencies = deps;
            file.import_diagnostics = import_diagnostics;
            file.bind = Some(bind);
            file.state = SourceFileState::Bound;
        }
    }

    fn check_file(&mut self, path: &Path) {
        let label = path.display().to_string();
        let Some(file) = self.files.get(path) else { return };
        let (Some(parse), Some(bind), Some(source)) = (file.parse.clone(), file.bind.clone(), file.source.clone()) else { return };
        let module_name = file.module_name.clone();
        let import_diagnostics = file.import_diagnostics.clone();

        let evaluator = Evaluator::new(&parse.arena, &bind, &self.interner, module_name);
        let checker = Checker::new(&self.options);
        let mut diagnostics = parse.diagnostics.clone();
        diagnostics.extend(bind.diagnostics.clone());
        diagnostics.extend(import_diagnostics);
        diagnostics.extend(checker.check(&label, &parse.arena, parse.root, &bind, &evaluator, &self.interner, &source, &parse.comments));

        if let Some(file) = self.files.get_mut(path) {
            file.diagnostics = diagnostics;
            file.state = SourceFileState::Checked;
        }
    }

    /// Advance exactly `path` and, as needed, its direct dependencies to
    /// `Checked`/`Bound` respectively — never any file beyond that set.
    /// This is what lets a language-service query answer about one edited
    /// file without forcing a full-program re-check.
    fn ensure_checked(&mut self, path: &Path) {
        if !self.files.contains_key(path) {
            self.files.insert(path.to_path_buf(), SourceFile::new(path.to_path_buf(), module_name_for(path)));
        }
        for _ in 0..pyrite_common::limits::MAX_ON_DEMAND_ANALYSIS_STEPS {
            match self.files.get(path).map(|f| f.state) {
                Some(SourceFileState::Checked) | None => return,
                Some(SourceFileState::Unparsed) => {
                    self.parse_file(path);
                }
                Some(SourceFileState::Parsed) => {
                    self.bind_file(path);
                }
                Some(SourceFileState::Bound | SourceFileState::CheckDeferred) => {
                    let deps: Vec<PathBuf> = self.files.get(path).map(|f| f.dependencies.clone()).unwrap_or_default();
                    let blocking: Option<(PathBuf, SourceFileState)> = deps.into_iter().find_map(|dep| match self.files.get(&dep).map(|f| f.state) {
                        Some(state @ (SourceFileState::Unparsed | SourceFileState::Parsed)) => Some((dep, state)),
                        _ => None,
                    });
                    match blocking {
                        Some((dep, SourceFileState::Unparsed)) => self.parse_file(&dep),
                        Some((dep, _)) => self.bind_file(&dep),
                        None => self.check_file(path),
                    }
                }
            }
        }
    }

    #[must_use]
    pub fn get_diagnostics(&mut self, path: &Path) -> Vec<Diagnostic> {
        self.ensure_checked(path);
        self.files.get(path).map(|f| f.diagnostics.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn hover(&mut self, path: &Path, position: Position) -> Option<HoverInfo> {
        self.ensure_checked(path);
        let file = self.files.get(path)?;
        let parse = file.parse.as_ref()?;
        let bind = file.bind.as_ref()?;
        let source = file.source.as_ref()?;
        let line_map = pyrite_common::position::LineMap::build(source);
        let offset = line_map.position_to_offset(position, source)?;
        let evaluator = Evaluator::new(&parse.arena, bind, &self.interner, file.module_name.clone());
        language_service::hover(&parse.arena, parse.root, &self.interner, &evaluator, source, offset)
    }

    #[must_use]
    pub fn goto_definition(&mut self, path: &Path, position: Position) -> Option<Location> {
        self.ensure_checked(path);
        let file = self.files.get(path)?;
        let parse = file.parse.as_ref()?;
        let bind = file.bind.as_ref()?;
        let source = file.source.as_ref()?;
        let line_map = pyrite_common::position::LineMap::build(source);
        let offset = line_map.position_to_offset(position, source)?;
        language_service::goto_definition(&parse.arena, parse.root, bind, &path.display().to_string(), source, offset)
    }

    #[must_use]
    pub fn completion(&mut self, path: &Path, position: Position) -> Vec<String> {
        self.ensure_checked(path);
        let Some(file) = self.files.get(path) else { return Vec::new() };
        let (Some(parse), Some(bind), Some(source)) = (file.parse.as_ref(), file.bind.as_ref(), file.source.as_ref()) else { return Vec::new() };
        let line_map = pyrite_common::position::LineMap::build(source);
        let Some(offset) = line_map.position_to_offset(position, source) else { return Vec::new() };
        language_service::completion(&parse.arena, parse.root, bind, offset)
    }

    #[must_use]
    pub fn tracked_files(&self) -> Vec<PathBuf> {
        self.root_files.iter().cloned().collect()
    }

    #[must_use]
    pub fn dependencies_of(&self, path: &Path) -> Vec<PathBuf> {
        self.files.get(path).map(|f| f.dependencies.clone()).unwrap_or_default()
    }

    /// Scan the persistent cache on disk and report entry counts, for
    /// `--stats`. Returns `None` when no cache is attached.
    pub fn cache_report(&self) -> Option<std::io::Result<crate::cache::CacheReport>> {
        self.cache.as_ref().map(PersistentCache::validate)
    }

    /// Evaluate and bind-check a single file and hand back everything an
    /// embedder needs to print a declaration stub or a completeness
    /// report for it, without otherwise touching the module graph's
    /// `Checked`/`Bound` bookkeeping for any other tracked file.
    #[must_use]
    pub fn evaluate_for_emit(&mut self, path: &Path) -> Option<(pyrite_parser::ParseResult, pyrite_binder::BindResult)> {
        self.ensure_checked(path);
        let file = self.files.get(path)?;
        Some((file.parse.clone()?, file.bind.clone()?))
    }

    #[must_use]
    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    /// Everything a language-service query over one file needs at once:
    /// its parse tree, bind result, and source text. Bundled so
    /// `pyrite-lsp` doesn't re-derive `ensure_checked` plumbing for every
    /// new query it adds on top of the three already on `Program`
    /// ([`Program::hover`], [`Program::goto_definition`],
    /// [`Program::completion`]).
    #[must_use]
    pub fn file_snapshot(&mut self, path: &Path) -> Option<FileSnapshot> {
        self.ensure_checked(path);
        let file = self.files.get(path)?;
        Some(FileSnapshot {
            parse: file.parse.clone()?,
            bind: file.bind.clone()?,
            source: file.source.clone()?,
            module_name: file.module_name.clone(),
        })
    }
}

/// Owned snapshot of one file's pipeline artifacts, handed to a caller
/// that needs to build its own [`Evaluator`] against them (an LSP
/// facade answering a query `Program` itself has no opinion on).
pub struct FileSnapshot {
    pub parse: pyrite_parser::ParseResult,
    pub bind: pyrite_binder::BindResult,
    pub source: String,
    pub module_name: String,
}

/// Render a `ModuleReference` back into the dotted (or dotted-with-leading-
/// dots, for a relative import) form it reads as in source, for the
/// `reportMissingImports` message.
fn module_reference_name(reference: &pyrite_resolver::ModuleReference) -> String {
    format!("{}{}", ".".repeat(reference.level as usize), reference.parts.join("."))
}

fn unreadable_file_diagnostic(path: &Path, error: &std::io::Error) -> Diagnostic {
    use pyrite_common::diagnostics::{DiagnosticRule, Severity};
    use pyrite_common::span::Span;
    Diagnostic::new(path.display().to_string(), Span::new(0, 0), Severity::Error, DiagnosticRule::MissingModuleSource, format!("could not read {}: {error}", path.display()))
}

#[cfg(test)]
#[path = "../tests/program_tests.rs"]
mod tests;
