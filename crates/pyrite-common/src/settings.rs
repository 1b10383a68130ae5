//! Target language version/platform and execution environments.
//!
//! This module lives in `pyrite-common` (rather than in the solver or the
//! checker) so that the scanner, parser, solver, and checker can all gate
//! version-specific behavior off the same enum without creating circular
//! crate dependencies.

use serde::{Deserialize, Serialize};

/// Target Python version. Gates which syntax the parser accepts and which
/// standard-library stub symbols the resolver considers available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum PythonVersion {
    Py35 = 35,
    Py36 = 36,
    Py37 = 37,
    Py38 = 38,
    Py39 = 39,
    Py310 = 310,
    Py311 = 311,
    Py312 = 312,
    #[default]
    Py313 = 313,
}

impl PythonVersion {
    /// Walrus operator (`:=`), positional-only `/` marker.
    #[must_use]
    pub const fn supports_walrus(self) -> bool {
        (self as u16) >= (Self::Py38 as u16)
    }

    /// Structural pattern matching (`match`/`case`).
    #[must_use]
    pub const fn supports_match_statement(self) -> bool {
        (self as u16) >= (Self::Py310 as u16)
    }

    /// `X | Y` union syntax in annotation position without `from __future__`.
    #[must_use]
    pub const fn supports_pep604_union(self) -> bool {
        (self as u16) >= (Self::Py310 as u16)
    }

    /// `type X = ...` alias statements and PEP 695 generic syntax
    /// (`def f[T](x: T) -> T`, `class C[T]: ...`).
    #[must_use]
    pub const fn supports_pep695_generics(self) -> bool {
        (self as u16) >= (Self::Py312 as u16)
    }

    /// Underscore-grouped numeric literals (`1_000_000`).
    #[must_use]
    pub const fn supports_numeric_underscores(self) -> bool {
        (self as u16) >= (Self::Py36 as u16)
    }

    /// `async def` generator functions (PEP 525): `yield` inside an
    /// `async def` body.
    #[must_use]
    pub const fn supports_async_generators(self) -> bool {
        (self as u16) >= (Self::Py36 as u16)
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "3.5" => Some(Self::Py35),
            "3.6" => Some(Self::Py36),
            "3.7" => Some(Self::Py37),
            "3.8" => Some(Self::Py38),
            "3.9" => Some(Self::Py39),
            "3.10" => Some(Self::Py310),
            "3.11" => Some(Self::Py311),
            "3.12" => Some(Self::Py312),
            "3.13" => Some(Self::Py313),
            _ => None,
        }
    }
}

impl std::fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = *self as u16;
        write!(f, "3.{}", v % 100)
    }
}

/// Target platform, used to gate `sys.platform`-conditioned stub overloads
/// (e.g. `os.path` differs between `posixpath` and `ntpath` stubs).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PythonPlatform {
    #[default]
    All,
    Linux,
    Darwin,
    Windows,
}

impl PythonPlatform {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "All" | "all" => Some(Self::All),
            "Linux" | "linux" => Some(Self::Linux),
            "Darwin" | "darwin" => Some(Self::Darwin),
            "Windows" | "windows" => Some(Self::Windows),
            _ => None,
        }
    }
}

/// One entry of the config's `executionEnvironments` list.
///
/// The first entry whose `root` is a prefix of a given file's path applies
/// to that file; entries should be ordered most-specific-root first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionEnvironment {
    pub root: String,
    pub python_version: PythonVersion,
    pub python_platform: PythonPlatform,
    #[serde(default)]
    pub extra_paths: Vec<String>,
}

impl ExecutionEnvironment {
    #[must_use]
    pub fn matches(&self, file_path: &str) -> bool {
        file_path.starts_with(&self.root)
    }
}

/// Resolve the execution environment that applies to `file_path`, falling
/// back to `default_env` if no configured environment's root matches.
#[must_use]
pub fn resolve_execution_environment<'a>(
    environments: &'a [ExecutionEnvironment],
    default_env: &'a ExecutionEnvironment,
    file_path: &str,
) -> &'a ExecutionEnvironment {
    environments
        .iter()
        .find(|env| env.matches(file_path))
        .unwrap_or(default_env)
}

#[cfg(test)]
#[path = "../tests/settings_tests.rs"]
mod tests;
