//! Diagnostic types and the report-rule catalog.
//!
//! Unlike a compiler with one numeric code per message (`TS2322`, ...), this
//! checker's diagnostics are identified by a stable *rule name*
//! (`reportGeneralTypeIssues`, `reportMissingImports`, ...). `rules` holds
//! the catalog (name, strictness tier, one-line description); `format_message`
//! still exists for the handful of messages that carry `{0}`/`{1}` slots.

mod rules;
pub use rules::{DIAGNOSTIC_RULES, RuleInfo};

use crate::checker_options::DiagnosticTier;
use crate::span::Span;
use serde::Serialize;

/// Severity assigned to a diagnostic, resolved from `CheckerOptions`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Information,
    None,
}

/// Legacy/LSP-facing category; `Severity::None` diagnostics are never
/// constructed, so this has no `None` counterpart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, serde::Deserialize)]
pub enum DiagnosticCategory {
    Error,
    Warning,
    Information,
}

impl From<Severity> for Option<DiagnosticCategory> {
    fn from(sev: Severity) -> Self {
        match sev {
            Severity::Error => Some(DiagnosticCategory::Error),
            Severity::Warning => Some(DiagnosticCategory::Warning),
            Severity::Information => Some(DiagnosticCategory::Information),
            Severity::None => None,
        }
    }
}

/// Stable rule identifier. The variant name lowercased-and-prefixed with
/// `report` is the wire-format string used in the diagnostics JSON `rule`
/// field; `DiagnosticRule::name` returns that string directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, serde::Deserialize)]
pub enum DiagnosticRule {
    // Always-on: these are never gated by typeCheckingMode.
    GeneralTypeIssues,
    MissingImports,
    MissingModuleSource,
    UnboundVariable,
    SyntaxError,
    SelfClsParameterName,
    // Basic tier
    OptionalSubscript,
    OptionalMemberAccess,
    OptionalCall,
    OptionalIterable,
    OptionalContextManager,
    OptionalOperand,
    Redeclaration,
    InvalidStringEscapeSequence,
    InvalidTypeVarUse,
    AbstractUsage,
    ArgumentType,
    AssignmentType,
    AttributeAccessIssue,
    CallIssue,
    IndexIssue,
    InvalidTypeArguments,
    NoOverloadImplementation,
    OperatorIssue,
    ReturnType,
    NoMatchingOverload,
    InvalidTypeForm,
    TypedDictNotRequiredAccess,
    PossiblyUnboundVariable,
    /// `reveal_type(...)`/`reveal_locals()` pseudo-builtin output. Always
    /// `Severity::Information` and never gated by `typeCheckingMode` or a
    /// rule override — constructed directly rather than through
    /// `CheckerContext::report`.
    RevealType,
    // Standard tier
    UnusedImport,
    UnusedClass,
    UnusedFunction,
    UnusedVariable,
    DuplicateImport,
    UnnecessaryIsInstance,
    UnnecessaryCast,
    UnnecessaryComparison,
    UnnecessaryContains,
    AssertAlwaysTrue,
    UnusedExpression,
    UnusedCoroutine,
    UnnecessaryTypeIgnoreComment,
    IncompatibleMethodOverride,
    IncompatibleVariableOverride,
    OverlappingOverload,
    InvalidOverload,
    ConstantRedefinition,
    InconsistentConstructor,
    UninitializedInstanceVariable,
    ImportCycles,
    Unreachable,
    // Strict tier
    PrivateUsage,
    PrivateImportUsage,
    UnsupportedDunderAll,
    MissingTypeStubs,
    CallInDefaultInitializer,
    InvalidStubStatement,
    IncompleteStub,
}

impl DiagnosticRule {
    #[must_use]
    pub fn info(self) -> &'static RuleInfo {
        DIAGNOSTIC_RULES
            .iter()
            .find(|r| r.rule == self)
            .expect("every DiagnosticRule variant has a RuleInfo entry")
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    #[must_use]
    pub fn default_tier(self) -> DiagnosticTier {
        self.info().tier
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        DIAGNOSTIC_RULES.iter().find(|r| r.name == name).map(|r| r.rule)
    }
}

/// Related location attached to a diagnostic (e.g. "base class declared
/// here" for an override mismatch).
#[derive(Clone, Debug, Serialize, serde::Deserialize)]
pub struct RelatedInformation {
    pub file: String,
    pub span: Span,
    pub message: String,
}

/// One diagnostic, matching the wire format `{file, range, severity, rule,
/// message}`.
#[derive(Clone, Debug, Serialize, serde::Deserialize)]
pub struct Diagnostic {
    pub file: String,
    pub span: Span,
    pub severity: Severity,
    pub rule: DiagnosticRule,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<RelatedInformation>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(file: impl Into<String>, span: Span, severity: Severity, rule: DiagnosticRule, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            span,
            severity,
            rule,
            message: message.into(),
            related_information: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_related(mut self, file: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        self.related_information.push(RelatedInformation {
            file: file.into(),
            span,
            message: message.into(),
        });
        self
    }
}

/// Fill `{0}`, `{1}`, ... slots in a message template.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
#[path = "../../tests/diagnostics_tests.rs"]
mod tests;
