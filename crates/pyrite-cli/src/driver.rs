//! Wires parsed arguments and a resolved config into a
//! [`pyrite_program::Program`], runs it to completion, and reports the
//! result.
//!
//! Grounded on the teacher's `driver::compile` top-level shape (discover
//! files → build the resolver → run the pipeline → report) from
//! `tsz-cli/src/driver.rs`, stripped of everything project-reference- and
//! emit-specific.

use crate::args::{CliArgs, Level};
use crate::config::{self, Config};
use crate::reporter::Reporter;
use anyhow::{bail, Context, Result};
use pyrite_common::diagnostics::{Diagnostic, Severity};
use pyrite_common::settings::{PythonPlatform, PythonVersion};
use pyrite_emitter::{CompletenessWalker, StubWriter};
use pyrite_parser::Dialect;
use pyrite_program::{module_name_for, PersistentCache, Program, RealSourceReader};
use pyrite_resolver::{ModuleReference, RealFileSystem, Resolution, Resolver, SearchPaths};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Batch run's outcome: the four exit codes named for the CLI, ready to
/// hand to `std::process::exit`.
pub const EXIT_NO_ISSUES: i32 = 0;
pub const EXIT_ISSUES_REPORTED: i32 = 1;
pub const EXIT_CONFIGURATION_OR_IO_ERROR: i32 = 2;
pub const EXIT_COMMAND_MISUSE: i32 = 3;

pub fn run(args: CliArgs) -> Result<i32> {
    let config = match config::load(config::locate(args.project.as_deref()).as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("configuration error: {error:#}");
            return Ok(EXIT_CONFIGURATION_OR_IO_ERROR);
        }
    };
    let config = apply_cli_overrides(config, &args)?;

    let files = match discover_files(&args, &config) {
        Ok(files) if !files.is_empty() => files,
        Ok(_) => {
            eprintln!("no files to check");
            return Ok(EXIT_COMMAND_MISUSE);
        }
        Err(error) => {
            eprintln!("{error:#}");
            return Ok(EXIT_CONFIGURATION_OR_IO_ERROR);
        }
    };
    tracing::info!(count = files.len(), "discovered files to check");

    let dialect = Dialect::new(config.python_version);
    let search_paths = search_paths_for(&config, &files);
    let resolver = Resolver::new(search_paths.clone(), Box::new(RealFileSystem));
    let mut program = Program::new(dialect, config.options.clone(), resolver, Box::new(RealSourceReader));
    if let Some(cache) = attach_cache(&args) {
        program = program.with_cache(cache);
    }

    if let Some(import) = &args.create_stub {
        let mut stub_resolver = Resolver::new(search_paths, Box::new(RealFileSystem));
        return create_stub(&mut program, &mut stub_resolver, import);
    }
    if let Some(package) = &args.verify_types {
        return verify_types(&mut program, package, &files);
    }

    program.set_tracked_files(files.clone());

    if args.watch {
        crate::watch::run(&mut program, files, &args)
    } else {
        program.analyze(None);
        report_and_exit(&mut program, &files, &args)
    }
}

fn apply_cli_overrides(mut config: Config, args: &CliArgs) -> Result<Config> {
    if let Some(version) = &args.python_version {
        config.python_version = PythonVersion::parse(version).with_context(|| format!("unrecognized --pythonversion {version:?}"))?;
    }
    if let Some(platform) = &args.python_platform {
        config.python_platform = PythonPlatform::parse(platform).with_context(|| format!("unrecognized --pythonplatform {platform:?}"))?;
    }
    if let Some(path) = &args.venv_path {
        config.venv_path = Some(path.clone());
    }
    if let Some(path) = &args.typeshed_path {
        config.typeshed_path = Some(path.clone());
    }
    Ok(config)
}

fn search_paths_for(config: &Config, files: &[PathBuf]) -> SearchPaths {
    let mut paths = SearchPaths::new();
    let mut roots: Vec<PathBuf> = files.iter().filter_map(|f| f.parent().map(Path::to_path_buf)).collect();
    roots.sort();
    roots.dedup();
    paths.source_roots = if roots.is_empty() { vec![PathBuf::from(".")] } else { roots };
    if let Some(typeshed) = &config.typeshed_path {
        paths.bundled_fallback_root = Some(typeshed.clone());
        paths.stub_roots.push(typeshed.clone());
    }
    if let Some(venv) = &config.venv_path {
        paths.third_party_roots.push(venv.clone());
    }
    paths
}

/// Find every file `check` should cover: explicit file/directory
/// arguments (recursively expanded, `.py`/`.pyi` only), `-` meaning read
/// newline-separated paths from stdin, or — if nothing was given on the
/// command line — every `.py`/`.pyi` file under the current directory that
/// `include`/`exclude`/`ignore` leave in scope.
fn discover_files(args: &CliArgs, config: &Config) -> Result<Vec<PathBuf>> {
    if args.files.len() == 1 && args.files[0] == Path::new("-") {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input).context("reading file list from stdin")?;
        return Ok(input.lines().map(str::trim).filter(|l| !l.is_empty()).map(PathBuf::from).collect());
    }

    let roots: Vec<PathBuf> = if args.files.is_empty() { vec![PathBuf::from(".")] } else { args.files.clone() };
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root);
            continue;
        }
        for entry in walkdir::WalkDir::new(&root).into_iter().filter_map(Result::ok) {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "py" || e == "pyi") && config.in_scope(path) {
                files.push(path.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn attach_cache(args: &CliArgs) -> Option<PersistentCache> {
    if args.watch {
        // Multi-threaded execution and watch mode both disable the
        // persistent cache; this binary never runs multi-threaded, so
        // watch mode is the only switch that applies here.
        return None;
    }
    if !env_flag("CACHE_ENABLE") {
        return None;
    }
    let dir = std::env::var("CACHE_DIR").map(PathBuf::from).unwrap_or_else(|_| std::env::temp_dir().join("pyrite-cache"));
    let language_version = std::env::var("LANGUAGE_VERSION").unwrap_or_else(|_| "unset".to_string());
    let tool_version = format!("{}-{language_version}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(dir = %dir.display(), tool_version, "persistent cache attached");
    Some(PersistentCache::new(dir, tool_version))
}

pub(crate) fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| parse_flag(&v)).unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

pub(crate) fn report_and_exit(program: &mut Program, files: &[PathBuf], args: &CliArgs) -> Result<i32> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    for file in files {
        diagnostics.extend(program.get_diagnostics(file));
    }

    let threshold = args.level.unwrap_or(Level::Warning);
    diagnostics.retain(|d| match threshold {
        Level::Error => d.severity == Severity::Error,
        Level::Warning => matches!(d.severity, Severity::Error | Severity::Warning),
    });

    if args.dependencies {
        for file in files {
            let deps = program.dependencies_of(file);
            println!("{}: {}", file.display(), deps.iter().map(|d| d.display().to_string()).collect::<Vec<_>>().join(", "));
        }
    } else {
        let sources = load_sources(files);
        let mut reporter = Reporter::new(args.output_json);
        reporter.set_pretty(!args.output_json);
        print!("{}", reporter.render(&diagnostics, &sources));
    }

    if args.stats {
        match program.cache_report() {
            Some(Ok(report)) => println!("cache: {} valid, {} corrupt, {} total", report.valid_entries, report.corrupt_entries, report.total_entries),
            Some(Err(error)) => println!("cache: error reading report: {error}"),
            None => println!("cache: disabled"),
        }
    }

    let has_errors = diagnostics.iter().any(|d| d.severity == Severity::Error);
    let has_warnings = diagnostics.iter().any(|d| d.severity == Severity::Warning);
    if has_errors || (args.warnings && has_warnings) {
        Ok(EXIT_ISSUES_REPORTED)
    } else {
        Ok(EXIT_NO_ISSUES)
    }
}

fn load_sources(files: &[PathBuf]) -> HashMap<String, String> {
    files
        .iter()
        .filter_map(|f| std::fs::read_to_string(f).ok().map(|text| (f.display().to_string(), text)))
        .collect()
}

fn create_stub(program: &mut Program, resolver: &mut Resolver, import: &str) -> Result<i32> {
    let parts: Vec<String> = import.split('.').map(str::to_string).collect();
    if parts.is_empty() || parts.iter().any(String::is_empty) {
        bail!("--createstub requires a dotted import path, got {import:?}");
    }

    let reference = ModuleReference::absolute(parts);
    // Absolute references never consult `from_file`, so any path works
    // as the resolution anchor here.
    let resolution = resolver.resolve(Path::new("."), &reference);
    let Resolution::Resolved(resolved) = resolution else {
        eprintln!("could not resolve {import}");
        return Ok(EXIT_CONFIGURATION_OR_IO_ERROR);
    };

    let Some((parse, bind)) = program.evaluate_for_emit(&resolved.resolved_path) else {
        eprintln!("could not check {}", resolved.resolved_path.display());
        return Ok(EXIT_CONFIGURATION_OR_IO_ERROR);
    };
    let module_name = module_name_for(&resolved.resolved_path);
    let evaluator = pyrite_solver::Evaluator::new(&parse.arena, &bind, program.interner(), module_name);
    let writer = StubWriter::new(&parse.arena, &evaluator, program.interner());
    print!("{}", writer.write_module(parse.root));
    Ok(EXIT_NO_ISSUES)
}

fn verify_types(program: &mut Program, package: &str, files: &[PathBuf]) -> Result<i32> {
    let target = files.iter().find(|f| module_name_for(f) == package).cloned();
    let Some(target) = target else {
        eprintln!("package {package} not found among the checked files");
        return Ok(EXIT_CONFIGURATION_OR_IO_ERROR);
    };

    let Some((parse, bind)) = program.evaluate_for_emit(&target) else {
        eprintln!("could not check {}", target.display());
        return Ok(EXIT_CONFIGURATION_OR_IO_ERROR);
    };
    let module_name = module_name_for(&target);
    let evaluator = pyrite_solver::Evaluator::new(&parse.arena, &bind, program.interner(), module_name);
    let walker = CompletenessWalker::new(&parse.arena, &evaluator);
    let report = walker.walk_module(parse.root);

    println!("{package}: {:.1}% of symbols have a known type ({}/{})", report.score() * 100.0, report.known_count(), report.symbols.len());
    for symbol in report.unknown() {
        println!("  unknown: {} (span {}..{})", symbol.qualified_name, symbol.span.start, symbol.span.end);
    }

    if report.score() >= 1.0 {
        Ok(EXIT_NO_ISSUES)
    } else {
        Ok(EXIT_ISSUES_REPORTED)
    }
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
