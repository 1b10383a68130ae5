//! The diagnostic rules that turn a bound, type-evaluated file into a list
//! of reported problems: unreachable code, unused locals, inconsistent
//! returns, incompatible overrides, invalid metaclasses, and `# type:
//! ignore`/`# pyright: ignore` bookkeeping.
//!
//! Each rule lives in its own module under [`rules`] and is driven by
//! [`Checker::check`], which builds one [`CheckerContext`] per file and
//! runs every rule against it in turn. Rules only read from
//! `pyrite-binder`'s symbol table and flow graph and `pyrite-solver`'s
//! type evaluator — none of them mutate either.

pub mod checker;
pub mod context;
pub mod flow_shape;
pub mod rules;
mod walk;

pub use checker::Checker;
pub use context::CheckerContext;
