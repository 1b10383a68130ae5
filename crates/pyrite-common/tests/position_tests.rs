use super::*;
use crate::span::Span;

#[test]
fn builds_line_starts_for_lf_source() {
    let source = "a\nbb\nccc";
    let map = LineMap::build(source);
    assert_eq!(map.line_count(), 3);
    assert_eq!(map.line_start(0), Some(0));
    assert_eq!(map.line_start(1), Some(2));
    assert_eq!(map.line_start(2), Some(5));
}

#[test]
fn handles_crlf_without_double_counting_lines() {
    let source = "a\r\nb\r\nc";
    let map = LineMap::build(source);
    assert_eq!(map.line_count(), 3);
}

#[test]
fn offset_to_position_on_ascii() {
    let source = "abc\ndef\n";
    let map = LineMap::build(source);
    assert_eq!(map.offset_to_position(0, source), Position::new(0, 0));
    assert_eq!(map.offset_to_position(5, source), Position::new(1, 1));
}

#[test]
fn offset_to_position_counts_utf16_units() {
    let source = "a\u{1F600}b\ncd";
    let map = LineMap::build(source);
    let emoji_offset = "a".len();
    let after_emoji = "a\u{1F600}".len();
    assert_eq!(map.offset_to_position(emoji_offset as u32, source).character, 1);
    assert_eq!(map.offset_to_position(after_emoji as u32, source).character, 3);
}

#[test]
fn position_to_offset_round_trips_ascii() {
    let source = "abc\ndefgh\n";
    let map = LineMap::build(source);
    let pos = Position::new(1, 3);
    let offset = map.position_to_offset(pos, source).unwrap();
    assert_eq!(map.offset_to_position(offset, source), pos);
}

#[test]
fn span_to_range_bridges_byte_and_lsp_coordinates() {
    let source = "abc\ndef\n";
    let map = LineMap::build(source);
    let range = map.span_to_range(Span::new(4, 7), source);
    assert_eq!(range.start, Position::new(1, 0));
    assert_eq!(range.end, Position::new(1, 3));
}

#[test]
fn location_serializes_with_uri_key() {
    let loc = Location::new("file:///a.py".to_string(), Range::new(Position::new(0, 0), Position::new(0, 1)));
    let json = serde_json::to_string(&loc).unwrap();
    assert!(json.contains("\"uri\""));
}
