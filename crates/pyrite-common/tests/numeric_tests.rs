use super::*;

#[test]
fn parses_plain_int() {
    assert_eq!(parse_numeric("123"), Some((NumericKind::Int, 123.0)));
}

#[test]
fn parses_underscored_int() {
    assert_eq!(parse_numeric("1_000_000"), Some((NumericKind::Int, 1_000_000.0)));
}

#[test]
fn parses_float_forms() {
    assert_eq!(parse_numeric("1.5"), Some((NumericKind::Float, 1.5)));
    assert_eq!(parse_numeric("1."), Some((NumericKind::Float, 1.0)));
    assert_eq!(parse_numeric("1e10"), Some((NumericKind::Float, 1e10)));
    assert_eq!(parse_numeric("1_0.5"), Some((NumericKind::Float, 10.5)));
}

#[test]
fn parses_radix_prefixes() {
    assert_eq!(parse_numeric("0x1F"), Some((NumericKind::Int, 31.0)));
    assert_eq!(parse_numeric("0o17"), Some((NumericKind::Int, 15.0)));
    assert_eq!(parse_numeric("0b101"), Some((NumericKind::Int, 5.0)));
    assert_eq!(parse_numeric("0b1_0"), Some((NumericKind::Int, 2.0)));
}

#[test]
fn rejects_out_of_range_digits() {
    assert_eq!(parse_numeric("0b2"), None);
    assert_eq!(parse_numeric("0o8"), None);
    assert_eq!(parse_numeric("0xg"), None);
}

#[test]
fn parses_imaginary_literals() {
    assert_eq!(parse_numeric("3j"), Some((NumericKind::Imaginary, 3.0)));
    assert_eq!(parse_numeric("2.5J"), Some((NumericKind::Imaginary, 2.5)));
    assert_eq!(parse_numeric("1_0j"), Some((NumericKind::Imaginary, 10.0)));
}

#[test]
fn rejects_empty_text() {
    assert_eq!(parse_numeric(""), None);
}
