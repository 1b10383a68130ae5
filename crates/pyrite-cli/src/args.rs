use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the `pyrite` binary.
///
/// There is no `check` subcommand: checking the given files is the only
/// thing this binary does, the same way `pyright`/`tsc` take files
/// directly rather than behind a verb. A bare `-` in `files` means "read
/// the file list from stdin, one path per line" instead of taking it as a
/// literal filename.
#[derive(Parser, Debug)]
#[command(name = "pyrite", version, about = "Static type checker for gradually-annotated Python")]
pub struct CliArgs {
    // ==================== Input Files ====================
    /// Files or directories to check. A single `-` reads newline-separated
    /// paths from stdin instead.
    pub files: Vec<PathBuf>,

    /// Path to a config file or a directory containing one.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    // ==================== Environment ====================
    /// Target Python version, e.g. `3.11`.
    #[arg(long = "pythonversion")]
    pub python_version: Option<String>,

    /// Target platform: `All`, `Linux`, `Darwin`, or `Windows`.
    #[arg(long = "pythonplatform")]
    pub python_platform: Option<String>,

    /// Path to a virtual environment, searched for installed packages.
    #[arg(long = "venvpath")]
    pub venv_path: Option<PathBuf>,

    /// Path to a typeshed checkout, overriding the bundled one.
    #[arg(long = "typeshedpath")]
    pub typeshed_path: Option<PathBuf>,

    // ==================== Reporting ====================
    /// Emit diagnostics as a single JSON array instead of text.
    #[arg(long = "outputjson")]
    pub output_json: bool,

    /// Minimum severity to report: `error` or `warning`.
    #[arg(long = "level", value_enum)]
    pub level: Option<Level>,

    /// Count warnings (not just errors) toward a nonzero exit code.
    #[arg(long = "warnings")]
    pub warnings: bool,

    /// Print cache hit/miss and timing counters after checking.
    #[arg(long = "stats")]
    pub stats: bool,

    /// Print each checked file's resolved dependency list instead of
    /// diagnostics.
    #[arg(long = "dependencies")]
    pub dependencies: bool,

    // ==================== Modes ====================
    /// Re-check on every save instead of exiting after one pass.
    #[arg(short = 'w', long = "watch")]
    pub watch: bool,

    /// Emit a `.pyi` stub for the given import and exit.
    #[arg(long = "createstub", value_name = "IMPORT")]
    pub create_stub: Option<String>,

    /// Report the type-completeness score for the given package and exit.
    #[arg(long = "verifytypes", value_name = "PACKAGE")]
    pub verify_types: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
