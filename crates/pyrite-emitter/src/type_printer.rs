//! Turns an evaluated [`TypeId`] back into PEP 484 annotation syntax.
//!
//! The solver only ever needs to compare types; it never needs to print
//! one. This is the one place in the workspace that walks [`TypeData`] to
//! produce source text instead of another [`TypeId`], grounded on the
//! teacher's `declaration_emitter/helpers.rs::emit_type`, which does the
//! same job for TypeScript's richer type-expression grammar: one match
//! arm per type shape, recursing into nested type arguments.

use pyrite_solver::{TypeData, TypeId, TypeInterner, TypeVec, Variadicity};

/// Render `ty` as it would appear in a `.pyi` annotation. Returns `None`
/// for `Unknown`, since the stub writer omits the annotation entirely
/// rather than writing a name that means nothing to a reader of the
/// stub — `Unknown` is this checker's own "couldn't figure it out," not
/// a type a user could write down.
pub fn format_type(interner: &TypeInterner, ty: TypeId) -> Option<String> {
    if ty == TypeId::UNKNOWN {
        return None;
    }
    Some(format_type_data(interner, ty))
}

/// Same as [`format_type`], but renders `Unknown` as `Any` — used inside
/// a composite type (a union member, a tuple element, a callable
/// parameter) where omitting the slot entirely isn't syntactically
/// possible.
fn format_type_or_any(interner: &TypeInterner, ty: TypeId) -> String {
    format_type(interner, ty).unwrap_or_else(|| "Any".to_string())
}

fn format_type_data(interner: &TypeInterner, ty: TypeId) -> String {
    if ty == TypeId::ANY {
        return "Any".to_string();
    }
    if ty == TypeId::NONE {
        return "None".to_string();
    }
    if ty == TypeId::NEVER {
        return "NoReturn".to_string();
    }

    match interner.lookup(ty) {
        None | Some(TypeData::Unknown) => "Any".to_string(),
        Some(TypeData::Any) => "Any".to_string(),
        Some(TypeData::None) => "None".to_string(),
        Some(TypeData::Never) => "NoReturn".to_string(),
        Some(TypeData::LiteralInstance(value, _)) => format!("Literal[{}]", format_literal(&value)),
        Some(TypeData::ClassInstance(class_id, args)) => {
            let name = interner.lookup_class(class_id).name;
            format_generic(&name, &args, interner)
        }
        Some(TypeData::Class(class_id)) => format!("type[{}]", interner.lookup_class(class_id).name),
        Some(TypeData::Function(sig)) => format_callable(interner, &sig),
        Some(TypeData::OverloadedFunction(sigs)) => sigs.iter().map(|sig| format_callable(interner, sig)).collect::<Vec<_>>().join(" | "),
        Some(TypeData::Union(members)) => members.iter().map(|&m| format_type_or_any(interner, m)).collect::<Vec<_>>().join(" | "),
        Some(TypeData::TypeVar(id, ..)) => format!("_T{}", id.0),
        Some(TypeData::Module(_)) => "ModuleType".to_string(),
        Some(TypeData::Tuple(elements, variadicity)) => format_tuple(interner, &elements, variadicity),
    }
}

fn format_literal(value: &pyrite_solver::LiteralValue) -> String {
    use pyrite_solver::LiteralValue;
    match value {
        LiteralValue::Str(s) => format!("{s:?}"),
        LiteralValue::Int(i) => i.to_string(),
        LiteralValue::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        LiteralValue::Bytes(b) => format!("b{:?}", String::from_utf8_lossy(b)),
    }
}

fn format_generic(name: &str, args: &TypeVec, interner: &TypeInterner) -> String {
    if args.is_empty() {
        return name.to_string();
    }
    let rendered: Vec<String> = args.iter().map(|&a| format_type_or_any(interner, a)).collect();
    format!("{name}[{}]", rendered.join(", "))
}

fn format_tuple(interner: &TypeInterner, elements: &TypeVec, variadicity: Variadicity) -> String {
    let rendered: Vec<String> = elements.iter().map(|&e| format_type_or_any(interner, e)).collect();
    match variadicity {
        Variadicity::Fixed if rendered.is_empty() => "tuple[()]".to_string(),
        Variadicity::Fixed => format!("tuple[{}]", rendered.join(", ")),
        Variadicity::Unbounded => format!("tuple[{}, ...]", rendered.join(", ")),
    }
}

fn format_callable(interner: &TypeInterner, sig: &pyrite_solver::FunctionSig) -> String {
    let params: Vec<String> = sig.parameters.iter().map(|p| format_type_or_any(interner, p.annotated_type)).collect();
    let ret = format_type_or_any(interner, sig.return_type);
    format!("Callable[[{}], {}]", params.join(", "), ret)
}

#[cfg(test)]
#[path = "../tests/type_printer_tests.rs"]
mod tests;
