//! Renders a [`TypeId`] as a short human-readable name, for diagnostic text
//! that needs to name a type inline (`reveal_type`'s "Type is 'int'",
//! `reveal_locals`'s per-variable listing) rather than valid annotation
//! syntax — `pyrite-emitter`'s `type_printer` owns that job for `.pyi`
//! output. Kept here, not in `pyrite-checker`, so both crates can call it
//! without depending on each other.

use crate::intern::{TypeId, TypeInterner};
use crate::types::TypeData;

#[must_use]
pub fn render_type_name(interner: &TypeInterner, ty: TypeId) -> String {
    if ty == TypeId::ANY {
        return "Any".to_string();
    }
    if ty == TypeId::NONE {
        return "None".to_string();
    }
    if ty == TypeId::NEVER {
        return "NoReturn".to_string();
    }
    if ty == TypeId::UNKNOWN {
        return "Unknown".to_string();
    }

    match interner.lookup(ty) {
        None | Some(TypeData::Unknown) => "Unknown".to_string(),
        Some(TypeData::Any) => "Any".to_string(),
        Some(TypeData::None) => "None".to_string(),
        Some(TypeData::Never) => "NoReturn".to_string(),
        Some(TypeData::LiteralInstance(value, _)) => format!("Literal[{}]", render_literal(&value)),
        Some(TypeData::ClassInstance(class_id, args)) => render_generic(&interner.lookup_class(class_id).name, &args, interner),
        Some(TypeData::Class(class_id)) => format!("type[{}]", interner.lookup_class(class_id).name),
        Some(TypeData::Function(_) | TypeData::OverloadedFunction(_)) => "function".to_string(),
        Some(TypeData::Union(members)) => members.iter().map(|&m| render_type_name(interner, m)).collect::<Vec<_>>().join(" | "),
        Some(TypeData::TypeVar(id, ..)) => format!("_T{}", id.0),
        Some(TypeData::Module(_)) => "Module".to_string(),
        Some(TypeData::Tuple(elements, _)) => {
            let rendered: Vec<String> = elements.iter().map(|&e| render_type_name(interner, e)).collect();
            format!("tuple[{}]", rendered.join(", "))
        }
    }
}

fn render_literal(value: &crate::types::LiteralValue) -> String {
    use crate::types::LiteralValue;
    match value {
        LiteralValue::Str(s) => format!("{s:?}"),
        LiteralValue::Int(i) => i.to_string(),
        LiteralValue::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        LiteralValue::Bytes(b) => format!("b{:?}", String::from_utf8_lossy(b)),
    }
}

fn render_generic(name: &str, args: &crate::types::TypeVec, interner: &TypeInterner) -> String {
    if args.is_empty() {
        return name.to_string();
    }
    let rendered: Vec<String> = args.iter().map(|&a| render_type_name(interner, a)).collect();
    format!("{name}[{}]", rendered.join(", "))
}

#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod tests;
