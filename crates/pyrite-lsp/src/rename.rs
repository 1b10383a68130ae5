//! Rename: reuses [`crate::references::references_at`] to find every
//! occurrence of the symbol under the cursor and turns each into a
//! [`TextEdit`] replacing it with the new name.
//!
//! Single-file only, for the same reason `references` is — no project-wide
//! symbol index exists to chase a rename across module boundaries.

use crate::references::references_at;
use crate::types::{TextEdit, WorkspaceEdit};
use pyrite_binder::BindResult;
use pyrite_common::position::Position;
use pyrite_parser::{NodeArena, NodeIndex};

#[must_use]
pub fn rename_at(arena: &NodeArena, root: NodeIndex, bind: &BindResult, source: &str, file_path: &str, offset: u32, new_name: &str) -> Option<WorkspaceEdit> {
    let ranges = references_at(arena, root, bind, source, offset, true);
    if ranges.is_empty() {
        return None;
    }
    let edits = ranges.into_iter().map(|range| TextEdit { range, new_text: new_name.to_string() }).collect();
    Some(WorkspaceEdit { changes: vec![(file_path.to_string(), edits)] })
}

#[must_use]
pub fn rename_for(program: &mut pyrite_program::Program, path: &std::path::Path, position: Position, new_name: &str) -> Option<WorkspaceEdit> {
    let snapshot = program.file_snapshot(path)?;
    let line_map = pyrite_common::position::LineMap::build(&snapshot.source);
    let offset = line_map.position_to_offset(position, &snapshot.source)?;
    rename_at(&snapshot.parse.arena, snapshot.parse.root, &snapshot.bind, &snapshot.source, &path.display().to_string(), offset, new_name)
}

#[cfg(test)]
#[path = "../tests/rename_tests.rs"]
mod tests;
