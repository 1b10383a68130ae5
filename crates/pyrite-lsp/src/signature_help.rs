//! Signature help for the call enclosing a position: which parameters the
//! callee declares, and which one the cursor currently sits inside.
//!
//! Parameter rendering mirrors [`pyrite_emitter::StubWriter`]'s
//! `annotation_suffix` (evaluate the annotation node, `format_type` it) so
//! a hovered parameter reads the same way it would in an emitted stub.

use crate::types::{ParameterInformation, SignatureHelp, SignatureInformation};
use pyrite_binder::symbol::Declaration;
use pyrite_binder::BindResult;
use pyrite_common::position::Position;
use pyrite_emitter::format_type;
use pyrite_parser::node::{Param, ParamKind};
use pyrite_parser::{Node, NodeArena, NodeIndex};
use pyrite_program::{language_service, Program};
use pyrite_solver::{Evaluator, TypeInterner};
use std::path::Path;

fn enclosing_call(arena: &NodeArena, node: NodeIndex) -> Option<NodeIndex> {
    arena.ancestors(node).find(|&ancestor| matches!(arena.get(ancestor), Node::Call { .. }))
}

fn param_label(param: &Param, evaluator: &Evaluator, interner: &TypeInterner) -> String {
    let prefix = match param.kind {
        ParamKind::VarArgs => "*",
        ParamKind::KwArgs => "**",
        _ => "",
    };
    let annotation = match param.annotation {
        Some(node) => {
            let ty = evaluator.eval_annotation(node);
            format_type(interner, ty).map(|rendered| format!(": {rendered}"))
        }
        None => None,
    };
    format!("{prefix}{}{}", param.name, annotation.unwrap_or_default())
}

/// Active-parameter index by counting commas in the call's argument list
/// that fall before `offset` — good enough without a full call-argument
/// span table, since nested calls are walked to their own innermost `Call`
/// node first by [`enclosing_call`].
fn active_parameter(arena: &NodeArena, args: &[NodeIndex], offset: u32) -> u32 {
    let mut index = 0u32;
    for &arg in args {
        if arena.span(arg).end <= offset {
            index += 1;
        }
    }
    index
}

#[must_use]
pub fn signature_help_at(arena: &NodeArena, root: NodeIndex, bind: &BindResult, evaluator: &Evaluator, interner: &TypeInterner, offset: u32) -> Option<SignatureHelp> {
    let node = language_service::node_at(arena, root, offset);
    let call = enclosing_call(arena, node)?;
    let Node::Call { func, args, .. } = arena.get(call) else { return None };
    let func_node = *func;
    let args = args.clone();
    let symbol_id = bind.node_symbols.get(&func_node).copied()?;
    let symbol = bind.symbols.get(symbol_id)?;
    let function_node = symbol.declarations.iter().find_map(|decl| matches!(decl, Declaration::Function { .. }).then(|| decl.node()))?;
    let Node::FunctionDef { name, params, .. } = arena.get(function_node) else { return None };

    let rendered_params: Vec<String> = params.iter().map(|p| param_label(p, evaluator, interner)).collect();
    let label = format!("{name}({})", rendered_params.join(", "));
    let parameters = rendered_params.into_iter().map(|label| ParameterInformation { label }).collect();
    let signature = SignatureInformation { label, parameters };
    let active = active_parameter(arena, &args, offset);

    Some(SignatureHelp { signatures: vec![signature], active_parameter: Some(active) })
}

#[must_use]
pub fn signature_help(program: &mut Program, path: &Path, position: Position) -> Option<SignatureHelp> {
    let snapshot = program.file_snapshot(path)?;
    let line_map = pyrite_common::position::LineMap::build(&snapshot.source);
    let offset = line_map.position_to_offset(position, &snapshot.source)?;
    let evaluator = Evaluator::new(&snapshot.parse.arena, &snapshot.bind, program.interner(), snapshot.module_name.clone());
    signature_help_at(&snapshot.parse.arena, snapshot.parse.root, &snapshot.bind, &evaluator, program.interner(), offset)
}

#[cfg(test)]
#[path = "../tests/signature_help_tests.rs"]
mod tests;
