//! The create-stub command, reachable from the LSP surface the same way
//! it's reachable from `pyrite-cli --createstub`: resolve a dotted import
//! path to a file, evaluate it, and emit its `.pyi`-shaped stub.
//!
//! Grounded directly on `pyrite-cli::driver::create_stub` — same
//! resolve-then-`evaluate_for_emit`-then-`StubWriter` sequence, reshaped to
//! return the text to a caller instead of printing it and picking an exit
//! code.

use pyrite_emitter::StubWriter;
use pyrite_program::{module_name_for, Program};
use pyrite_resolver::{ModuleReference, Resolution, Resolver};
use pyrite_solver::Evaluator;
use std::path::Path;

#[derive(Debug)]
pub enum CreateStubError {
    InvalidImportPath,
    Unresolved,
    NotChecked,
}

pub fn create_stub(program: &mut Program, resolver: &mut Resolver, import: &str) -> Result<String, CreateStubError> {
    let parts: Vec<String> = import.split('.').map(str::to_string).collect();
    if parts.is_empty() || parts.iter().any(String::is_empty) {
        return Err(CreateStubError::InvalidImportPath);
    }

    let reference = ModuleReference::absolute(parts);
    let resolution = resolver.resolve(Path::new("."), &reference);
    let Resolution::Resolved(resolved) = resolution else {
        return Err(CreateStubError::Unresolved);
    };

    let Some((parse, bind)) = program.evaluate_for_emit(&resolved.resolved_path) else {
        return Err(CreateStubError::NotChecked);
    };
    let module_name = module_name_for(&resolved.resolved_path);
    let evaluator = Evaluator::new(&parse.arena, &bind, program.interner(), module_name);
    let writer = StubWriter::new(&parse.arena, &evaluator, program.interner());
    Ok(writer.write_module(parse.root))
}

#[cfg(test)]
#[path = "../tests/create_stub_tests.rs"]
mod tests;
