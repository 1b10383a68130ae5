use super::*;
use pyrite_parser::Dialect;

fn fixture(source: &str) -> (pyrite_parser::ParseResult, pyrite_binder::BindResult) {
    let parse = pyrite_parser::parse(source, "a.py", Dialect::default());
    let bind = pyrite_binder::bind_module(&parse.arena, parse.root, "a", Dialect::default());
    (parse, bind)
}

#[test]
fn completions_at_classifies_a_function_and_a_variable() {
    let source = "def f():\n    pass\ny = 1\nf\n";
    let (parse, bind) = fixture(source);
    // Offset at the trailing bare `f` reference, which sees both module-level names.
    let offset = source.rfind('f').unwrap() as u32;
    let items = completions_at(&parse.arena, parse.root, &bind, offset);

    let f_item = items.iter().find(|i| i.label == "f").expect("f should be visible");
    assert_eq!(f_item.kind, CompletionItemKind::Function);
    let y_item = items.iter().find(|i| i.label == "y").expect("y should be visible");
    assert_eq!(y_item.kind, CompletionItemKind::Variable);
}

#[test]
fn completions_at_dedupes_a_shadowed_outer_name() {
    let source = "x = 1\ndef f(x):\n    x\n";
    let (parse, bind) = fixture(source);
    let offset = source.rfind('x').unwrap() as u32;
    let items = completions_at(&parse.arena, parse.root, &bind, offset);
    assert_eq!(items.iter().filter(|i| i.label == "x").count(), 1);
}
