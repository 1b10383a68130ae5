use super::*;
use pyrite_common::checker_options::CheckerOptions;
use pyrite_resolver::fs_probe::FakeFileSystem;
use pyrite_resolver::search_path::SearchPaths;
use std::path::PathBuf;

fn program_with(reader: FakeSourceReader, probe: FakeFileSystem) -> Program {
    let mut paths = SearchPaths::new();
    paths.source_roots.push(PathBuf::from("/proj"));
    let resolver = Resolver::new(paths, Box::new(probe));
    Program::new(Dialect::default(), CheckerOptions::default(), resolver, Box::new(reader))
}

#[test]
fn analyze_parses_binds_and_checks_a_single_tracked_file() {
    let mut reader = FakeSourceReader::new();
    reader.set("/proj/a.py", "x: int = 1\n");
    let mut probe = FakeFileSystem::new();
    probe.add_file("/proj/a.py");

    let mut program = program_with(reader, probe);
    program.set_tracked_files(vec![PathBuf::from("/proj/a.py")]);
    let pending = program.analyze(None);

    assert!(!pending);
    assert!(program.files.get(&PathBuf::from("/proj/a.py")).unwrap().is_checked());
}

#[test]
fn analyze_follows_an_import_into_a_dependency_file() {
    let mut reader = FakeSourceReader::new();
    reader.set("/proj/a.py", "import b\n");
    reader.set("/proj/b.py", "y = 1\n");
    let mut probe = FakeFileSystem::new();
    probe.add_file("/proj/a.py");
    probe.add_file("/proj/b.py");

    let mut program = program_with(reader, probe);
    program.set_tracked_files(vec![PathBuf::from("/proj/a.py")]);
    program.analyze(None);

    let a = program.files.get(&PathBuf::from("/proj/a.py")).unwrap();
    assert!(a.is_checked());
    assert_eq!(a.dependencies, vec![PathBuf::from("/proj/b.py")]);
    // b.py was never a tracked root but still gets checked as a dependency.
    assert!(program.files.get(&PathBuf::from("/proj/b.py")).unwrap().is_checked());
}

#[test]
fn an_unresolvable_import_produces_a_missing_imports_diagnostic() {
    let mut reader = FakeSourceReader::new();
    reader.set("/proj/a.py", "from m import g\n");
    let mut probe = FakeFileSystem::new();
    probe.add_file("/proj/a.py");

    let mut program = program_with(reader, probe);
    let diagnostics = program.get_diagnostics(&PathBuf::from("/proj/a.py"));

    let missing = diagnostics.iter().find(|d| d.rule == pyrite_common::diagnostics::DiagnosticRule::MissingImports).expect("an unresolvable import should be reported");
    assert_eq!(missing.severity, pyrite_common::diagnostics::Severity::Error);
    assert!(missing.message.contains('m'));
}

#[test]
fn get_diagnostics_triggers_on_demand_analysis_for_an_untracked_file() {
    let mut reader = FakeSourceReader::new();
    reader.set("/proj/a.py", "x = 1\n");
    let mut probe = FakeFileSystem::new();
    probe.add_file("/proj/a.py");

    let mut program = program_with(reader, probe);
    // Never calls set_tracked_files; get_diagnostics alone must pull a.py
    // through the whole pipeline.
    let diagnostics = program.get_diagnostics(&PathBuf::from("/proj/a.py"));
    assert!(diagnostics.is_empty() || diagnostics.iter().all(|d| d.severity != pyrite_common::diagnostics::Severity::Error));
}

#[test]
fn reading_an_unreadable_file_produces_a_diagnostic_instead_of_panicking() {
    let reader = FakeSourceReader::new();
    let probe = FakeFileSystem::new();
    let mut program = program_with(reader, probe);

    let diagnostics = program.get_diagnostics(&PathBuf::from("/proj/missing.py"));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, pyrite_common::diagnostics::Severity::Error);
}

#[test]
fn content_changed_on_a_dependency_downgrades_its_dependent_to_check_deferred() {
    let mut reader = FakeSourceReader::new();
    reader.set("/proj/a.py", "import b\n");
    reader.set("/proj/b.py", "y = 1\n");
    let mut probe = FakeFileSystem::new();
    probe.add_file("/proj/a.py");
    probe.add_file("/proj/b.py");

    let mut program = program_with(reader, probe);
    program.set_tracked_files(vec![PathBuf::from("/proj/a.py")]);
    program.analyze(None);
    assert!(program.files.get(&PathBuf::from("/proj/a.py")).unwrap().is_checked());

    program.mark_dirty(&PathBuf::from("/proj/b.py"), DirtyReason::ContentChanged);

    let b = program.files.get(&PathBuf::from("/proj/b.py")).unwrap();
    assert_eq!(b.state, SourceFileState::Unparsed);
    let a = program.files.get(&PathBuf::from("/proj/a.py")).unwrap();
    assert_eq!(a.state, SourceFileState::CheckDeferred);

    // Re-running analyze brings both back to Checked.
    program.analyze(None);
    assert!(program.files.get(&PathBuf::from("/proj/a.py")).unwrap().is_checked());
}

#[test]
fn set_options_marks_every_tracked_file_dirty() {
    let mut reader = FakeSourceReader::new();
    reader.set("/proj/a.py", "x = 1\n");
    let mut probe = FakeFileSystem::new();
    probe.add_file("/proj/a.py");

    let mut program = program_with(reader, probe);
    program.set_tracked_files(vec![PathBuf::from("/proj/a.py")]);
    program.analyze(None);
    assert!(program.files.get(&PathBuf::from("/proj/a.py")).unwrap().is_checked());

    let mut options = CheckerOptions::default();
    options.use_library_code_for_types = !options.use_library_code_for_types;
    program.set_options(options);

    assert_eq!(program.files.get(&PathBuf::from("/proj/a.py")).unwrap().state, SourceFileState::Unparsed);
}

#[test]
fn set_tracked_files_drops_a_file_no_longer_tracked_and_not_depended_on() {
    let mut reader = FakeSourceReader::new();
    reader.set("/proj/a.py", "x = 1\n");
    reader.set("/proj/b.py", "y = 1\n");
    let mut probe = FakeFileSystem::new();
    probe.add_file("/proj/a.py");
    probe.add_file("/proj/b.py");

    let mut program = program_with(reader, probe);
    program.set_tracked_files(vec![PathBuf::from("/proj/a.py"), PathBuf::from("/proj/b.py")]);
    assert!(program.files.contains_key(&PathBuf::from("/proj/b.py")));

    program.set_tracked_files(vec![PathBuf::from("/proj/a.py")]);
    assert!(!program.files.contains_key(&PathBuf::from("/proj/b.py")));
    assert_eq!(program.tracked_files(), vec![PathBuf::from("/proj/a.py")]);
}

#[test]
fn set_tracked_files_keeps_a_file_still_needed_as_a_dependency() {
    let mut reader = FakeSourceReader::new();
    reader.set("/proj/a.py", "import b\n");
    reader.set("/proj/b.py", "y = 1\n");
    let mut probe = FakeFileSystem::new();
    probe.add_file("/proj/a.py");
    probe.add_file("/proj/b.py");

    let mut program = program_with(reader, probe);
    program.set_tracked_files(vec![PathBuf::from("/proj/a.py"), PathBuf::from("/proj/b.py")]);
    program.analyze(None);

    program.set_tracked_files(vec![PathBuf::from("/proj/a.py")]);
    assert!(program.files.contains_key(&PathBuf::from("/proj/b.py")));
}

#[test]
fn hover_reports_a_rendered_type_for_an_annotated_name() {
    let mut reader = FakeSourceReader::new();
    reader.set("/proj/a.py", "x: int = 1\n");
    let mut probe = FakeFileSystem::new();
    probe.add_file("/proj/a.py");

    let mut program = program_with(reader, probe);
    let info = program.hover(&PathBuf::from("/proj/a.py"), pyrite_common::position::Position { line: 0, character: 0 });
    assert!(info.is_some());
}

#[test]
fn dependencies_of_an_unknown_path_is_empty() {
    let reader = FakeSourceReader::new();
    let probe = FakeFileSystem::new();
    let program = program_with(reader, probe);
    assert!(program.dependencies_of(&PathBuf::from("/proj/ghost.py")).is_empty());
}

#[test]
fn persistent_cache_skips_reparsing_unchanged_content_across_programs() {
    let dir = std::env::temp_dir().join(format!("pyrite-program-cache-test-{:?}", std::thread::current().id()));
    let _ = std::fs::remove_dir_all(&dir);

    let mut reader = FakeSourceReader::new();
    reader.set("/proj/a.py", "x: int = 1\n");
    let mut probe = FakeFileSystem::new();
    probe.add_file("/proj/a.py");

    let mut first = program_with(reader.clone(), probe.clone());
    first = first.with_cache(PersistentCache::new(dir.clone(), "test-tool"));
    first.set_tracked_files(vec![PathBuf::from("/proj/a.py")]);
    first.analyze(None);

    let mut second = program_with(reader, probe);
    second = second.with_cache(PersistentCache::new(dir.clone(), "test-tool"));
    second.set_tracked_files(vec![PathBuf::from("/proj/a.py")]);
    second.analyze(None);

    assert!(second.files.get(&PathBuf::from("/proj/a.py")).unwrap().is_checked());

    let _ = std::fs::remove_dir_all(&dir);
}
