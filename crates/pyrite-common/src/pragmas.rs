//! Recognizing suppression and type-declaration pragmas inside comments.
//!
//! The scanner hands every comment's text and span to [`scan_pragmas`]
//! rather than this module re-deriving comment boundaries itself, so string
//! literals and f-string interiors never get misread as comments. Three
//! forms are recognized, all anchored at the start of the (trimmed) comment
//! body:
//!
//! - `# type: ignore` / `# type: ignore[reportX, reportY]` — suppress
//!   diagnostics on the line the comment trails.
//! - `# pyright: ignore` / `# pyright: ignore[reportX]` — same effect, kept
//!   as a distinct spelling so configs written for other checkers still
//!   suppress here.
//! - `# type: T` — a pre-PEP-526 type declaration comment; `T` is parsed as
//!   an annotation expression by the binder.

use crate::span::Span;

/// A `# type: ignore[...]` or `# pyright: ignore[...]` suppression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoreComment {
    pub span: Span,
    /// `None` for a blanket ignore (no `[...]` suffix); suppresses every
    /// diagnostic on the line. `Some(codes)` suppresses only the named
    /// rules.
    pub rule_codes: Option<Vec<String>>,
}

/// A `# type: T` declaration comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeComment {
    pub span: Span,
    pub type_text: String,
}

/// Classify a batch of comments (as produced by the scanner: trimmed text
/// without the leading `#`, and the comment's own span) into ignore
/// pragmas and type-declaration pragmas. Comments matching neither form are
/// silently skipped — ordinary prose comments are the common case.
#[must_use]
pub fn scan_pragmas<'a, I>(comments: I) -> (Vec<IgnoreComment>, Vec<TypeComment>)
where
    I: IntoIterator<Item = (&'a str, Span)>,
{
    let mut ignores = Vec::new();
    let mut type_comments = Vec::new();

    for (text, span) in comments {
        let body = text.trim_start();
        if let Some(rest) = body.strip_prefix("type:").or_else(|| body.strip_prefix("pyright:")) {
            let rest = rest.trim_start();
            if let Some(after_ignore) = rest.strip_prefix("ignore") {
                ignores.push(IgnoreComment {
                    span,
                    rule_codes: parse_rule_codes(after_ignore),
                });
            } else if !rest.is_empty() && body.starts_with("type:") {
                type_comments.push(TypeComment {
                    span,
                    type_text: rest.trim().to_string(),
                });
            }
        }
    }

    (ignores, type_comments)
}

/// Parse an optional `[reportA, reportB]` suffix following `ignore`.
/// Returns `None` (blanket ignore) if there is no bracketed list, or the
/// list is present but empty after whitespace trimming.
fn parse_rule_codes(rest: &str) -> Option<Vec<String>> {
    let rest = rest.trim_start();
    let inner = rest.strip_prefix('[')?.strip_suffix(']')?;
    let codes: Vec<String> = inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if codes.is_empty() {
        None
    } else {
        Some(codes)
    }
}

#[cfg(test)]
#[path = "../tests/pragmas_tests.rs"]
mod tests;
