//! Loads a JSON config file or a `[tool.pyrite]` TOML table, resolving it
//! into the concrete pieces [`crate::driver`] needs: a [`CheckerOptions`],
//! glob sets for file discovery, and the search paths the resolver
//! consults.
//!
//! Grounded on the teacher's `config.rs` validate-then-resolve shape
//! (`load_tsconfig` → `resolve_compiler_options`), adapted for a config
//! surface that's a flat option bag rather than a project-reference graph.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use pyrite_common::checker_options::{CheckerOptions, TypeCheckingMode};
use pyrite_common::diagnostics::{DiagnosticRule, Severity};
use pyrite_common::settings::{ExecutionEnvironment, PythonPlatform, PythonVersion};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    ignore: Vec<String>,
    #[serde(default)]
    execution_environments: Vec<RawExecutionEnvironment>,
    #[serde(default)]
    strict: Vec<String>,
    type_checking_mode: Option<String>,
    python_version: Option<String>,
    python_platform: Option<String>,
    stub_path: Option<String>,
    venv_path: Option<String>,
    typeshed_path: Option<String>,
    #[serde(default)]
    use_library_code_for_types: bool,
    /// Every unrecognized top-level key, which is where `reportX` rule
    /// entries land: there's no practical way to list ~40 rule names as
    /// named fields without the list drifting out of sync with
    /// `pyrite_common::diagnostics::DIAGNOSTIC_RULES`.
    #[serde(flatten)]
    rest: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExecutionEnvironment {
    root: String,
    python_version: Option<String>,
    python_platform: Option<String>,
    #[serde(default)]
    extra_paths: Vec<String>,
}

/// A fully resolved config: glob sets ready to match against a discovered
/// file path, and the pieces [`pyrite_program::Program`] and the resolver
/// need.
#[derive(Debug, Clone)]
pub struct Config {
    pub include: GlobSet,
    pub has_include: bool,
    pub exclude: GlobSet,
    pub ignore: GlobSet,
    pub strict: GlobSet,
    pub options: CheckerOptions,
    pub python_version: PythonVersion,
    pub python_platform: PythonPlatform,
    pub execution_environments: Vec<ExecutionEnvironment>,
    pub stub_path: Option<PathBuf>,
    pub venv_path: Option<PathBuf>,
    pub typeshed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include: GlobSet::empty(),
            has_include: false,
            exclude: GlobSet::empty(),
            ignore: GlobSet::empty(),
            strict: GlobSet::empty(),
            options: CheckerOptions::default(),
            python_version: PythonVersion::default(),
            python_platform: PythonPlatform::default(),
            execution_environments: Vec::new(),
            stub_path: None,
            venv_path: None,
            typeshed_path: None,
        }
    }
}

impl Config {
    /// Whether `path` is in scope at all: matches `include` (or there was
    /// no `include` list, meaning everything is included) and matches
    /// neither `exclude` nor `ignore`.
    #[must_use]
    pub fn in_scope(&self, path: &Path) -> bool {
        if self.has_include && !self.include.is_match(path) {
            return false;
        }
        if self.exclude.is_match(path) || self.ignore.is_match(path) {
            return false;
        }
        true
    }

    #[must_use]
    pub fn is_strict(&self, path: &Path) -> bool {
        self.strict.is_match(path)
    }
}

/// Locate a config file: `project` if given (used directly if it's a
/// file, searched for a known filename if it's a directory), otherwise
/// the current directory.
#[must_use]
pub fn locate(project: Option<&Path>) -> Option<PathBuf> {
    let dir = match project {
        Some(p) if p.is_file() => return Some(p.to_path_buf()),
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().unwrap_or_default(),
    };
    let json = dir.join("pyriteconfig.json");
    if json.is_file() {
        return Some(json);
    }
    let manifest = dir.join("pyproject.toml");
    if manifest.is_file() {
        return Some(manifest);
    }
    None
}

/// Load and resolve the config at `path`, or the defaults if `path` is
/// `None`. A TOML manifest with no `[tool.pyrite]` table resolves to the
/// defaults rather than an error, since `pyproject.toml` is also used by
/// every other tool in the project.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else { return Ok(Config::default()) };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading config file {}", path.display()))?;

    let raw = if path.extension().is_some_and(|e| e == "toml") {
        let manifest: toml::Value = toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        match manifest.get("tool").and_then(|t| t.get("pyrite")) {
            Some(table) => {
                let table_text = toml::to_string(table).with_context(|| format!("re-serializing [tool.pyrite] in {}", path.display()))?;
                toml::from_str(&table_text).with_context(|| format!("parsing [tool.pyrite] in {}", path.display()))?
            }
            None => RawConfig::default(),
        }
    } else {
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
    };

    resolve(raw)
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("invalid glob pattern {pattern:?}"))?);
    }
    builder.build().context("building glob set")
}

fn parse_severity(s: &str) -> Option<Severity> {
    match s {
        "error" => Some(Severity::Error),
        "warning" => Some(Severity::Warning),
        "information" => Some(Severity::Information),
        "none" => Some(Severity::None),
        _ => None,
    }
}

fn resolve(raw: RawConfig) -> Result<Config> {
    let mut options = CheckerOptions::default();
    if let Some(mode) = &raw.type_checking_mode {
        options.type_checking_mode =
            TypeCheckingMode::parse(mode).with_context(|| format!("unrecognized typeCheckingMode {mode:?}"))?;
    }
    options.use_library_code_for_types = raw.use_library_code_for_types;

    for (key, value) in &raw.rest {
        let Some(rule) = DiagnosticRule::parse(key) else {
            bail!("unrecognized config option {key:?}");
        };
        let severity_str = value.as_str().with_context(|| format!("{key} must be a string severity"))?;
        let severity = parse_severity(severity_str).with_context(|| format!("unrecognized severity {severity_str:?} for {key}"))?;
        options.rule_overrides.insert(rule, severity);
    }

    let python_version = match &raw.python_version {
        Some(v) => PythonVersion::parse(v).with_context(|| format!("unrecognized pythonVersion {v:?}"))?,
        None => PythonVersion::default(),
    };
    let python_platform = match &raw.python_platform {
        Some(v) => PythonPlatform::parse(v).with_context(|| format!("unrecognized pythonPlatform {v:?}"))?,
        None => PythonPlatform::default(),
    };

    let mut execution_environments = Vec::new();
    for env in &raw.execution_environments {
        let env_version = match &env.python_version {
            Some(v) => PythonVersion::parse(v).with_context(|| format!("unrecognized pythonVersion {v:?} in executionEnvironments"))?,
            None => python_version,
        };
        let env_platform = match &env.python_platform {
            Some(v) => PythonPlatform::parse(v).with_context(|| format!("unrecognized pythonPlatform {v:?} in executionEnvironments"))?,
            None => python_platform,
        };
        execution_environments.push(ExecutionEnvironment {
            root: env.root.clone(),
            python_version: env_version,
            python_platform: env_platform,
            extra_paths: env.extra_paths.clone(),
        });
    }

    Ok(Config {
        include: build_glob_set(&raw.include)?,
        has_include: !raw.include.is_empty(),
        exclude: build_glob_set(&raw.exclude)?,
        ignore: build_glob_set(&raw.ignore)?,
        strict: build_glob_set(&raw.strict)?,
        options,
        python_version,
        python_platform,
        execution_environments,
        stub_path: raw.stub_path.map(PathBuf::from),
        venv_path: raw.venv_path.map(PathBuf::from),
        typeshed_path: raw.typeshed_path.map(PathBuf::from),
    })
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
