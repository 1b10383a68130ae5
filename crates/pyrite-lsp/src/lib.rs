//! Language Server surface over [`pyrite_program::Program`]: plain
//! request/response types ([`types`]) and handler functions for every
//! query an editor integration needs, leaving the JSON-RPC transport to
//! whatever embeds this crate.
//!
//! Grounded on the teacher's `tsz-lsp` crate for the query set it answers
//! (hover, go-to-definition, completion, signature help, document
//! symbols, references, rename, organize-imports/add-missing-optional
//! quick actions, create-stub) — narrowed to what a single already-bound
//! file's parse/bind/evaluate artifacts can answer without the project-
//! wide symbol index or tsserver-compatibility layer the teacher's own
//! feature set carries.

pub mod code_actions;
pub mod completions;
pub mod create_stub;
pub mod diagnostics;
pub mod document_symbols;
pub mod hover;
pub mod references;
pub mod rename;
pub mod signature_help;
pub mod types;

pub use code_actions::{add_missing_optional_for, organize_imports_for};
pub use completions::completion;
pub use create_stub::{create_stub, CreateStubError};
pub use diagnostics::{publish_diagnostics, publish_diagnostics_for};
pub use document_symbols::document_symbols_for;
pub use hover::hover;
pub use references::references_for;
pub use rename::rename_for;
pub use signature_help::signature_help;
