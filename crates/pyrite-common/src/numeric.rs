//! Parsing for numeric literal text, shared by the scanner (to classify a
//! literal's `NumericKind` for narrowing to `Literal[123]`-style types) and
//! by tests that assert on inferred literal values.

/// Which numeric literal form the text represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NumericKind {
    Int,
    Float,
    Imaginary,
}

/// Parse a numeric literal's text into a kind and its `f64` value
/// (imaginary literals report the magnitude of their imaginary part).
///
/// Handles `0x`/`0o`/`0b` radix prefixes, arbitrary `_` digit-group
/// separators (e.g. `1_000_000`), decimal/exponent float forms
/// (`1.5`, `1e10`, `.5`, `1.`), and a trailing `j`/`J` imaginary suffix.
#[must_use]
pub fn parse_numeric(text: &str) -> Option<(NumericKind, f64)> {
    if text.is_empty() {
        return None;
    }

    if let Some(mantissa) = text.strip_suffix('j').or_else(|| text.strip_suffix('J')) {
        let value = parse_decimal_or_float(mantissa)?;
        return Some((NumericKind::Imaginary, value));
    }

    if text.len() > 2 {
        let prefix = &text[0..2];
        let radix = if prefix.eq_ignore_ascii_case("0x") {
            Some(16)
        } else if prefix.eq_ignore_ascii_case("0o") {
            Some(8)
        } else if prefix.eq_ignore_ascii_case("0b") {
            Some(2)
        } else {
            None
        };
        if let Some(base) = radix {
            return parse_radix_digits(&text[2..], base).map(|v| (NumericKind::Int, v));
        }
    }

    let is_float = text.contains('.') || text.contains('e') || text.contains('E');
    let value = parse_decimal_or_float(text)?;
    Some((if is_float { NumericKind::Float } else { NumericKind::Int }, value))
}

fn parse_decimal_or_float(text: &str) -> Option<f64> {
    if text.contains('_') {
        let cleaned: String = text.chars().filter(|&c| c != '_').collect();
        cleaned.parse::<f64>().ok()
    } else {
        text.parse::<f64>().ok()
    }
}

fn parse_radix_digits(text: &str, base: u32) -> Option<f64> {
    if text.is_empty() {
        return None;
    }

    let mut value = 0.0_f64;
    let base_float = f64::from(base);

    for byte in text.bytes() {
        if byte == b'_' {
            continue;
        }
        let digit = match byte {
            b'0'..=b'9' => u32::from(byte - b'0'),
            b'a'..=b'f' => u32::from(byte - b'a' + 10),
            b'A'..=b'F' => u32::from(byte - b'A' + 10),
            _ => return None,
        };
        if digit >= base {
            return None;
        }
        value = value * base_float + f64::from(digit);
    }

    Some(value)
}

#[cfg(test)]
#[path = "../tests/numeric_tests.rs"]
mod tests;
