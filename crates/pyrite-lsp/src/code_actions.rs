//! Quick actions: organize-imports (sort the module's leading import block)
//! and add-missing-optional (wrap a parameter's annotation in `Optional`
//! when [`pyrite_checker`]'s `optional_default` rule flagged a bare `None`
//! default against it).
//!
//! Grounded on [`pyrite_program::collect_import_references`] for the
//! import-statement walk and on
//! `pyrite_checker::rules::optional_default`'s diagnostic wording (`default
//! value is not assignable to parameter "..."`, rule
//! [`DiagnosticRule::AssignmentType`]) for recognizing which diagnostic
//! this quick action answers.

use crate::types::{CodeAction, CodeActionKind, LspDiagnostic, TextEdit, WorkspaceEdit};
use pyrite_common::position::LineMap;
use pyrite_parser::{Node, NodeArena, NodeIndex};

/// The leading run of `import`/`from ... import` statements at module
/// scope, sorted by their rendered source text. Statements interleaved
/// with other code (a conditional import guarded by `if TYPE_CHECKING:`)
/// break the run; only the contiguous leading block is reordered, since
/// reordering an import that appears after other top-level code could
/// change what name is bound at the point non-import code between them
/// reads it.
#[must_use]
pub fn organize_imports(arena: &NodeArena, root: NodeIndex, source: &str, file_path: &str) -> Option<CodeAction> {
    let Node::Module { body } = arena.get(root) else { return None };
    let leading: Vec<NodeIndex> = body.iter().copied().take_while(|&stmt| matches!(arena.get(stmt), Node::Import { .. } | Node::ImportFrom { .. })).collect();
    if leading.len() < 2 {
        return None;
    }

    let mut lines: Vec<&str> = leading.iter().map(|&stmt| source.get(arena.span(stmt).start as usize..arena.span(stmt).end as usize).unwrap_or("")).collect();
    let mut sorted = lines.clone();
    sorted.sort_unstable();
    if sorted == lines {
        return None;
    }
    lines = sorted;

    let line_map = LineMap::build(source);
    let start = arena.span(leading[0]).start;
    let end = arena.span(*leading.last()?).end;
    let range = line_map.span_to_range(pyrite_common::span::Span::new(start, end), source);
    let edit = TextEdit { range, new_text: lines.join("\n") };
    Some(CodeAction {
        title: "Organize imports".to_string(),
        kind: CodeActionKind::SourceOrganizeImports,
        edit: WorkspaceEdit { changes: vec![(file_path.to_string(), vec![edit])] },
    })
}

/// If `diagnostic` is the `optional_default` rule's complaint about a
/// parameter's `None` default, produce the edit that wraps its annotation
/// text in `Optional[...]`.
#[must_use]
pub fn add_missing_optional(arena: &NodeArena, root: NodeIndex, source: &str, file_path: &str, diagnostic: &LspDiagnostic) -> Option<CodeAction> {
    if diagnostic.code != "reportAssignmentType" || !diagnostic.message.contains("default value is not assignable to parameter") {
        return None;
    }
    let line_map = LineMap::build(source);
    let offset = line_map.position_to_offset(diagnostic.range.start, source)?;
    let node = pyrite_program::language_service::node_at(arena, root, offset);
    let annotation = find_param_annotation(arena, node)?;
    let span = arena.span(annotation);
    let text = source.get(span.start as usize..span.end as usize)?;
    let range = line_map.span_to_range(span, source);
    let edit = TextEdit { range, new_text: format!("Optional[{text}]") };
    Some(CodeAction {
        title: "Wrap annotation in Optional".to_string(),
        kind: CodeActionKind::QuickFix,
        edit: WorkspaceEdit { changes: vec![(file_path.to_string(), vec![edit])] },
    })
}

fn find_param_annotation(arena: &NodeArena, node: NodeIndex) -> Option<NodeIndex> {
    arena.ancestors(node).find_map(|ancestor| {
        let Node::FunctionDef { params, .. } = arena.get(ancestor) else { return None };
        params.iter().find_map(|p| {
            let annotation = p.annotation?;
            let contains = annotation == node || (arena.span(annotation).start <= arena.span(node).start && arena.span(node).end <= arena.span(annotation).end);
            contains.then_some(annotation)
        })
    })
}

#[must_use]
pub fn organize_imports_for(program: &mut pyrite_program::Program, path: &std::path::Path) -> Option<CodeAction> {
    let snapshot = program.file_snapshot(path)?;
    organize_imports(&snapshot.parse.arena, snapshot.parse.root, &snapshot.source, &path.display().to_string())
}

#[must_use]
pub fn add_missing_optional_for(program: &mut pyrite_program::Program, path: &std::path::Path, diagnostic: &LspDiagnostic) -> Option<CodeAction> {
    let snapshot = program.file_snapshot(path)?;
    add_missing_optional(&snapshot.parse.arena, snapshot.parse.root, &snapshot.source, &path.display().to_string(), diagnostic)
}

#[cfg(test)]
#[path = "../tests/code_actions_tests.rs"]
mod tests;
