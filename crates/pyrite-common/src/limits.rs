//! Centralized limits and thresholds.
//!
//! Recursion and iteration limits for the scanner/parser/binder/checker live
//! here so they aren't duplicated (with potentially inconsistent values)
//! across call sites. Solver-specific recursion limits (subtype checking,
//! generic instantiation, property access) live in
//! `pyrite_solver::recursion::RecursionProfile` instead, which is the single
//! source of truth for solver recursion — this module only documents that
//! split, it does not re-export those constants.

/// Maximum depth for recursive-descent expression parsing.
///
/// Prevents a stack overflow on adversarially (or mechanically generated)
/// nested expressions:
///
/// ```python
/// x = (((((((((((((((((((((((((1 + 2) + 3) + 4)  # ... 500 levels ...
/// ```
pub const MAX_EXPR_PARSE_DEPTH: u32 = 500;

/// Maximum number of rounds of fixed-point iteration for a loop's flow
/// narrowing before the evaluator widens to the declared type: bounded at
/// 3 rounds, with widening on round 4.
pub const MAX_NARROWING_FIXED_POINT_ROUNDS: u32 = 3;

/// Maximum number of predecessor flow nodes walked when narrowing a single
/// expression's type before giving up and returning the declared type.
/// Prevents runaway backward walks in pathological flow graphs (very long
/// straight-line functions, deeply nested try/except chains).
pub const MAX_FLOW_WALK_STEPS: u32 = 20_000;

/// Maximum depth of class bases walked while computing C3 linearization.
/// Real inheritance chains are rarely more than a dozen deep; this guards
/// against an accidental or malicious cycle that the MRO computation's own
/// cycle detection somehow missed.
pub const MAX_MRO_DEPTH: u32 = 256;

/// Maximum number of scope-walk iterations when resolving a name to its
/// innermost enclosing declaration. Bounds pathological lexical nesting.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

/// Maximum number of overload candidates tried during overload resolution
/// before falling back to reporting against the last overload.
pub const MAX_OVERLOAD_CANDIDATES: usize = 64;

/// Default initial capacity for a module's symbol table, sized to avoid
/// reallocation for a typical single-purpose module.
pub const DEFAULT_SYMBOL_TABLE_CAPACITY: usize = 32;

/// Default initial capacity for the per-file diagnostics vector.
pub const DEFAULT_DIAGNOSTICS_CAPACITY: usize = 8;

/// Number of `analyze(deadline)` work units the Program performs per tick
/// by default when no deadline is supplied (used by the CLI's batch mode,
/// which doesn't need cooperative yielding back to an event loop).
pub const DEFAULT_BATCH_WORK_UNITS: usize = usize::MAX;

/// Safety bound on how many pipeline steps a single language-service query
/// (hover, goto-definition, on-demand diagnostics) may run while pulling a
/// touched file and its dependency chain up to `Checked`, so a malformed or
/// cyclic dependency graph can't spin the query forever.
pub const MAX_ON_DEMAND_ANALYSIS_STEPS: usize = 4_096;
