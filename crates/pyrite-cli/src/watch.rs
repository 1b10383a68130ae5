//! Watch mode: re-checks the tracked files whenever one of them, or a
//! module they depend on, changes on disk.
//!
//! Grounded on the teacher's workspace-mate `loctree_rs::watch` module for
//! the overall watch-loop shape (channel-fed `notify::Watcher`, a debounce
//! window, re-scan on drain), adapted to plain `notify::RecommendedWatcher`
//! since this workspace doesn't carry `notify-debouncer-full` or `chrono` —
//! debouncing here is a short sleep-and-drain instead of the teacher's
//! dedicated debouncer crate, and timestamps are left out of the status
//! lines entirely rather than faked with a hand-rolled clock.

use crate::args::CliArgs;
use crate::driver::{self, EXIT_CONFIGURATION_OR_IO_ERROR, EXIT_NO_ISSUES};
use anyhow::{Context, Result};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use pyrite_program::Program;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Check `files` once, then keep re-checking on every filesystem change
/// until the watcher itself errors out. Never touches a persistent cache:
/// [`crate::driver::run`] already refuses to attach one when `--watch` is
/// set, and this loop has no cache-admin logic of its own to add back.
pub fn run(program: &mut Program, files: Vec<PathBuf>, args: &CliArgs) -> Result<i32> {
    eprintln!("watching {} file(s), press Ctrl+C to exit", files.len());
    check_once(program, &files, args);

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(tx, notify::Config::default()).context("starting filesystem watcher")?;

    let roots = watch_roots(&files);
    for root in &roots {
        watcher
            .watch(root, RecursiveMode::NonRecursive)
            .with_context(|| format!("watching {}", root.display()))?;
    }

    loop {
        match rx.recv() {
            Ok(_) => {
                // Drain whatever else arrives inside the debounce window so a
                // save-triggered burst of events only causes one re-check.
                loop {
                    match rx.recv_timeout(DEBOUNCE) {
                        Ok(_) => continue,
                        Err(_) => break,
                    }
                }
                for path in &files {
                    program.mark_dirty(path, pyrite_program::DirtyReason::ContentChanged);
                }
                check_once(program, &files, args);
            }
            Err(_) => {
                eprintln!("watcher disconnected, exiting");
                return Ok(EXIT_CONFIGURATION_OR_IO_ERROR);
            }
        }
    }
}

/// The set of directories `notify` needs to watch to see every change to
/// `files`: each file's parent, or the current directory when `files` is
/// empty (the whole-directory discovery case).
fn watch_roots(files: &[PathBuf]) -> HashSet<PathBuf> {
    let mut roots: HashSet<PathBuf> = files.iter().filter_map(|f| f.parent().map(Path::to_path_buf)).collect();
    if roots.is_empty() {
        roots.insert(PathBuf::from("."));
    }
    roots
}

fn check_once(program: &mut Program, files: &[PathBuf], args: &CliArgs) {
    program.analyze(None);
    match driver::report_and_exit(program, files, args) {
        Ok(code) if code == EXIT_NO_ISSUES => eprintln!("no issues found"),
        Ok(_) => {}
        Err(error) => eprintln!("error reporting diagnostics: {error:#}"),
    }
}

#[cfg(test)]
#[path = "../tests/watch_tests.rs"]
mod tests;
