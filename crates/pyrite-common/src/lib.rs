//! Common types and utilities for the pyrite type checker.
//!
//! This crate provides foundational types used across all pyrite crates:
//! - Source spans (`Span`, `Spanned`, `SpanBuilder`)
//! - Position/Range types for line/column source locations
//! - Content hashing for the persistent cache
//! - Python version/platform and execution-environment settings
//! - Compiler (checker) options and the report-rule severity table
//! - Centralized limits and thresholds
//! - Numeric literal parsing
//! - Pragma-comment parsing (`# type: ignore[...]`, `# type: T`, `# pyright: ignore[...]`)
//! - The diagnostic catalog

pub mod span;
pub use span::{Span, SpanBuilder, Spanned};

pub mod position;
pub use position::{LineMap, Location, Position, Range};

pub mod content_hash;
pub use content_hash::ContentHash;

pub mod settings;
pub use settings::{ExecutionEnvironment, PythonPlatform, PythonVersion};

pub mod checker_options;
pub use checker_options::{CheckerOptions, TypeCheckingMode};

pub mod limits;

pub mod numeric;
pub use numeric::{NumericKind, parse_numeric};

pub mod pragmas;
pub use pragmas::{IgnoreComment, TypeComment, scan_pragmas};

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticRule, Severity};
