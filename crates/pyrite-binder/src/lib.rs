//! Scope tree, symbol table, and control-flow graph construction.
//!
//! `bind_module` walks one file's parse tree once, producing a [`BindResult`]
//! that the resolver and solver query by id instead of re-walking the tree
//! themselves.

pub mod binder;
mod binder_flow;
mod binder_imports;
pub mod file_features;
pub mod flow;
pub mod scope;
pub mod symbol;

pub use binder::{bind_module, BindResult, Binder};
pub use file_features::FileFeatures;
pub use flow::{FlowFlags, FlowNode, FlowNodeArena, FlowNodeId};
pub use scope::{NameRedirect, Scope, ScopeArena, ScopeFlags, ScopeId, ScopeKind};
pub use symbol::{Declaration, Symbol, SymbolArena, SymbolFlags, SymbolId, SymbolTable};
