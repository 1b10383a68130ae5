use super::*;
use pyrite_parser::Dialect;

fn fixture(source: &str) -> (pyrite_parser::ParseResult, pyrite_binder::BindResult) {
    let parse = pyrite_parser::parse(source, "a.py", Dialect::default());
    let bind = pyrite_binder::bind_module(&parse.arena, parse.root, "a", Dialect::default());
    (parse, bind)
}

#[test]
fn rename_at_produces_an_edit_for_every_occurrence() {
    let source = "x = 1\nprint(x)\n";
    let (parse, bind) = fixture(source);
    let edit = rename_at(&parse.arena, parse.root, &bind, source, "a.py", 0, "renamed");
    let edit = edit.expect("x resolves to a symbol with occurrences");

    assert_eq!(edit.changes.len(), 1);
    let (path, edits) = &edit.changes[0];
    assert_eq!(path, "a.py");
    assert_eq!(edits.len(), 2);
    assert!(edits.iter().all(|e| e.new_text == "renamed"));
}

#[test]
fn rename_at_off_any_symbol_is_none() {
    let source = "1 + 1\n";
    let (parse, bind) = fixture(source);
    let edit = rename_at(&parse.arena, parse.root, &bind, source, "a.py", 0, "renamed");
    assert!(edit.is_none());
}
