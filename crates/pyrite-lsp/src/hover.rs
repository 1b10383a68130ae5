//! Thin wrapper over [`pyrite_program::Program::hover`] that reshapes its
//! [`pyrite_program::HoverInfo`] into this crate's wire type.
//!
//! `pyrite-program`'s hover payload is already a flat `{text, range}` pair
//! (unlike the teacher's tsserver-shaped quickinfo with a separate
//! `display_string`/`kind`/`documentation`); there is nothing left for this
//! layer to do beyond renaming the field for the `contents` name LSP uses.

use crate::types::Hover;
use pyrite_common::position::Position;
use pyrite_program::Program;
use std::path::Path;

#[must_use]
pub fn hover(program: &mut Program, path: &Path, position: Position) -> Option<Hover> {
    let info = program.hover(path, position)?;
    Some(Hover { contents: info.text, range: info.range })
}

#[cfg(test)]
#[path = "../tests/hover_tests.rs"]
mod tests;
