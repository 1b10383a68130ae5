//! Turns a fully evaluated module back into declarations.
//!
//! [`stub_writer`] emits a `.pyi`-shaped stub — signatures and
//! module-level variable types, every body dropped — for
//! `--createstub`. [`completeness`] walks the same declarations to
//! score `--verifytypes`. [`type_printer`] is the shared piece both
//! depend on: rendering an evaluated [`pyrite_solver::TypeId`] as PEP
//! 484 annotation text.
//!
//! This crate never mutates a module or its types; it only reads
//! through `pyrite-solver`'s evaluator and interner to produce text.

pub mod completeness;
pub mod stub_writer;
pub mod type_printer;

pub use completeness::{CompletenessReport, CompletenessWalker, SymbolCompleteness};
pub use stub_writer::StubWriter;
pub use type_printer::format_type;
