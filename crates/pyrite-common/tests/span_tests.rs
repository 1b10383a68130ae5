use super::*;

#[test]
fn new_and_accessors() {
    let s = Span::new(4, 9);
    assert_eq!(s.start(), 4);
    assert_eq!(s.end(), 9);
    assert_eq!(s.len(), 5);
    assert!(!s.is_empty());
}

#[test]
fn at_builds_zero_width_span() {
    let s = Span::at(7);
    assert_eq!(s.start(), 7);
    assert_eq!(s.end(), 7);
    assert!(s.is_empty());
}

#[test]
fn from_len_builds_span_of_given_width() {
    let s = Span::from_len(10, 5);
    assert_eq!(s, Span::new(10, 15));
}

#[test]
fn dummy_span_is_recognized() {
    assert!(Span::dummy().is_dummy());
    assert!(!Span::new(0, 1).is_dummy());
}

#[test]
fn contains_offset_and_span() {
    let outer = Span::new(0, 10);
    assert!(outer.contains(5));
    assert!(!outer.contains(10));
    assert!(outer.contains_span(Span::new(2, 8)));
    assert!(!outer.contains_span(Span::new(2, 11)));
}

#[test]
fn overlaps_detects_partial_ranges() {
    assert!(Span::new(0, 5).overlaps(Span::new(3, 8)));
    assert!(!Span::new(0, 5).overlaps(Span::new(5, 8)));
}

#[test]
fn merge_takes_outer_bounds() {
    let merged = Span::new(2, 4).merge(Span::new(8, 12));
    assert_eq!(merged, Span::new(2, 12));
}

#[test]
fn intersect_returns_overlap_or_none() {
    assert_eq!(Span::new(0, 5).intersect(Span::new(3, 8)), Some(Span::new(3, 5)));
    assert_eq!(Span::new(0, 5).intersect(Span::new(5, 8)), None);
}

#[test]
fn slice_extracts_source_text() {
    let source = "def f(x): return x";
    let s = Span::new(0, 3);
    assert_eq!(s.slice(source), "def");
}

#[test]
fn slice_safe_clamps_out_of_bounds_span() {
    let source = "short";
    let s = Span::new(2, 100);
    assert_eq!(s.slice_safe(source), "ort");
}

#[test]
fn span_builder_tracks_start() {
    let b = SpanBuilder::start(3);
    assert_eq!(b.end(9), Span::new(3, 9));
}

#[test]
fn display_formats_as_range() {
    assert_eq!(Span::new(1, 4).to_string(), "1..4");
}

#[test]
fn from_tuple() {
    assert_eq!(Span::from((2, 6)), Span::new(2, 6));
}
