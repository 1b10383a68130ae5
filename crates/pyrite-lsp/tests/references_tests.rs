use super::*;
use pyrite_parser::Dialect;

fn fixture(source: &str) -> (pyrite_parser::ParseResult, pyrite_binder::BindResult) {
    let parse = pyrite_parser::parse(source, "a.py", Dialect::default());
    let bind = pyrite_binder::bind_module(&parse.arena, parse.root, "a", Dialect::default());
    (parse, bind)
}

#[test]
fn references_at_finds_every_use_including_the_declaration() {
    let source = "x = 1\nprint(x)\nprint(x)\n";
    let (parse, bind) = fixture(source);
    let ranges = references_at(&parse.arena, parse.root, &bind, source, 0, true);
    // The declaration plus both `print(x)` uses.
    assert_eq!(ranges.len(), 3);
}

#[test]
fn references_at_excludes_the_declaration_when_asked() {
    let source = "x = 1\nprint(x)\n";
    let (parse, bind) = fixture(source);
    let ranges_with = references_at(&parse.arena, parse.root, &bind, source, 0, true);
    let ranges_without = references_at(&parse.arena, parse.root, &bind, source, 0, false);
    assert_eq!(ranges_without.len(), ranges_with.len() - 1);
}

#[test]
fn references_at_off_any_symbol_is_empty() {
    let source = "1 + 1\n";
    let (parse, bind) = fixture(source);
    let ranges = references_at(&parse.arena, parse.root, &bind, source, 0, true);
    assert!(ranges.is_empty());
}
