use super::*;
use pyrite_common::position::{Position, Range};

#[test]
fn hover_round_trips_through_json() {
    let hover = Hover { contents: "x: int".to_string(), range: Range::new(Position::new(0, 0), Position::new(0, 1)) };
    let json = serde_json::to_string(&hover).unwrap();
    let back: Hover = serde_json::from_str(&json).unwrap();
    assert_eq!(back.contents, "x: int");
}

#[test]
fn diagnostic_severity_serializes_to_its_lsp_numbering() {
    assert_eq!(serde_json::to_string(&DiagnosticSeverity::Error).unwrap(), "\"error\"");
    assert_eq!(DiagnosticSeverity::Hint as u8, 4);
}

#[test]
fn completion_item_omits_absent_detail() {
    let item = CompletionItem { label: "x".to_string(), kind: CompletionItemKind::Variable, detail: None };
    let json = serde_json::to_value(&item).unwrap();
    assert!(!json.as_object().unwrap().contains_key("detail"));
}
