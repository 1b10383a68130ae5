use super::*;
use pyrite_parser::Dialect;
use pyrite_solver::{Evaluator, TypeInterner};

fn fixture(source: &str) -> (pyrite_parser::ParseResult, pyrite_binder::BindResult) {
    let parse = pyrite_parser::parse(source, "a.py", Dialect::default());
    let bind = pyrite_binder::bind_module(&parse.arena, parse.root, "a", Dialect::default());
    (parse, bind)
}

#[test]
fn signature_help_renders_the_callee_s_parameters() {
    let source = "def greet(name: str, times: int = 1):\n    pass\ngreet()\n";
    let (parse, bind) = fixture(source);
    let interner = TypeInterner::new();
    let evaluator = Evaluator::new(&parse.arena, &bind, &interner, "a".to_string());
    // Just inside the call's parentheses.
    let offset = (source.find("greet()").unwrap() + "greet(".len()) as u32;

    let help = signature_help_at(&parse.arena, parse.root, &bind, &evaluator, &interner, offset);
    let help = help.expect("the cursor sits inside a call to a known function");
    assert_eq!(help.signatures.len(), 1);
    assert!(help.signatures[0].label.starts_with("greet("));
    assert_eq!(help.signatures[0].parameters.len(), 2);
}

#[test]
fn signature_help_is_none_outside_any_call() {
    let source = "x = 1\n";
    let (parse, bind) = fixture(source);
    let interner = TypeInterner::new();
    let evaluator = Evaluator::new(&parse.arena, &bind, &interner, "a".to_string());

    let help = signature_help_at(&parse.arena, parse.root, &bind, &evaluator, &interner, 0);
    assert!(help.is_none());
}
