//! Checker options for type checking.
//!
//! This module lives in `pyrite-common` so that the solver and the checker
//! can both reference `CheckerOptions`/`TypeCheckingMode` without creating a
//! circular crate dependency between them.

use crate::diagnostics::{DiagnosticRule, Severity};
use std::collections::HashMap;

/// Overall strictness preset (`typeCheckingMode`).
///
/// Determines the *default* severity table; individual `reportX` entries in
/// config still override whatever the preset assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeCheckingMode {
    Off,
    #[default]
    Basic,
    Standard,
    Strict,
    All,
}

impl TypeCheckingMode {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "off" => Some(Self::Off),
            "basic" => Some(Self::Basic),
            "standard" => Some(Self::Standard),
            "strict" => Some(Self::Strict),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// The default severity this mode assigns to a rule that has no
    /// per-rule override in config.
    #[must_use]
    pub fn default_severity(self, rule: DiagnosticRule) -> Severity {
        let tier = rule.default_tier();
        match (self, tier) {
            (Self::Off, _) => Severity::None,
            (_, DiagnosticTier::Always) => Severity::Error,
            (Self::Basic, DiagnosticTier::Basic) => Severity::Error,
            (Self::Basic, _) => Severity::None,
            (Self::Standard, DiagnosticTier::Basic | DiagnosticTier::Standard) => Severity::Error,
            (Self::Standard, _) => Severity::None,
            (Self::Strict | Self::All, _) => Severity::Error,
        }
    }
}

/// Which strictness tier a rule first turns on at. Used only to compute
/// [`TypeCheckingMode::default_severity`]; config overrides always win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticTier {
    /// Reported regardless of mode (syntax errors, unresolved imports).
    Always,
    Basic,
    Standard,
    Strict,
}

/// Compiler (checker) options resolved from CLI flags + config file.
#[derive(Debug, Clone)]
pub struct CheckerOptions {
    pub type_checking_mode: TypeCheckingMode,
    /// Per-rule severity overrides (`reportX` entries from config).
    pub rule_overrides: HashMap<DiagnosticRule, Severity>,
    /// `useLibraryCodeForTypes`: fall back to inferring types from a
    /// third-party package's source when no stub is available.
    pub use_library_code_for_types: bool,
    /// `strict` glob list elevates all report rules to at least `Warning`
    /// for matching files; stored here as already-resolved per-file flag by
    /// the config loader.
    pub strict_for_file: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            type_checking_mode: TypeCheckingMode::default(),
            rule_overrides: HashMap::new(),
            use_library_code_for_types: false,
            strict_for_file: false,
        }
    }
}

impl CheckerOptions {
    /// Resolve the effective severity for a rule: explicit config override,
    /// else the mode's default, bumped to at least `Warning` if this file
    /// matched a `strict` glob.
    #[must_use]
    pub fn severity_for(&self, rule: DiagnosticRule) -> Severity {
        let base = self
            .rule_overrides
            .get(&rule)
            .copied()
            .unwrap_or_else(|| self.type_checking_mode.default_severity(rule));
        if self.strict_for_file && base == Severity::None {
            Severity::Warning
        } else {
            base
        }
    }
}

#[cfg(test)]
#[path = "../tests/checker_options_tests.rs"]
mod tests;
