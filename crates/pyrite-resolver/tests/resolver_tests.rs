use super::*;
use crate::fs_probe::FakeFileSystem;
use crate::search_path::SearchPaths;
use std::path::PathBuf;

fn resolver_with(fs: FakeFileSystem, search_paths: SearchPaths) -> Resolver {
    Resolver::new(search_paths, Box::new(fs))
}

#[test]
fn local_stub_sibling_wins_over_everything_else() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/proj/pkg/widgets.py");
    fs.add_file("/proj/pkg/widgets.pyi");
    let mut paths = SearchPaths::new();
    paths.source_roots.push(PathBuf::from("/proj"));

    let mut resolver = resolver_with(fs, paths);
    let reference = ModuleReference::absolute(vec!["pkg".into(), "widgets".into()]);
    let resolution = resolver.resolve(Path::new("/proj/pkg/main.py"), &reference);

    match resolution {
        Resolution::Resolved(module) => {
            assert!(module.is_stub);
            assert_eq!(module.resolved_path, PathBuf::from("/proj/pkg/widgets.pyi"));
        }
        Resolution::Unresolved => panic!("expected a resolved local stub"),
    }
}

#[test]
fn configured_stub_root_resolves_when_no_local_stub_exists() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/proj/pkg/widgets.py");
    fs.add_file("/typeshed/pkg/widgets.pyi");
    let mut paths = SearchPaths::new();
    paths.source_roots.push(PathBuf::from("/proj"));
    paths.stub_roots.push(PathBuf::from("/typeshed"));

    let mut resolver = resolver_with(fs, paths);
    let reference = ModuleReference::absolute(vec!["pkg".into(), "widgets".into()]);
    let resolution = resolver.resolve(Path::new("/proj/pkg/main.py"), &reference);

    assert!(matches!(resolution, Resolution::Resolved(ref m) if m.is_stub && m.import_type == ImportType::Stdlib));
}

#[test]
fn in_tree_source_resolves_when_no_stub_is_configured() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/proj/pkg/widgets.py");
    let mut paths = SearchPaths::new();
    paths.source_roots.push(PathBuf::from("/proj"));

    let mut resolver = resolver_with(fs, paths);
    let reference = ModuleReference::absolute(vec!["pkg".into(), "widgets".into()]);
    let resolution = resolver.resolve(Path::new("/proj/pkg/main.py"), &reference);

    match resolution {
        Resolution::Resolved(module) => {
            assert!(!module.is_stub);
            assert_eq!(module.import_type, ImportType::Local);
        }
        Resolution::Unresolved => panic!("expected a resolved in-tree source file"),
    }
}

#[test]
fn bundled_fallback_is_used_only_after_everything_else_misses() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/bundled/requests/__init__.pyi");
    let mut paths = SearchPaths::new();
    paths.source_roots.push(PathBuf::from("/proj"));
    paths.bundled_fallback_root = Some(PathBuf::from("/bundled"));

    let mut resolver = resolver_with(fs, paths);
    let reference = ModuleReference::absolute(vec!["requests".into()]);
    let resolution = resolver.resolve(Path::new("/proj/main.py"), &reference);

    assert!(matches!(resolution, Resolution::Resolved(ref m) if m.import_type == ImportType::Stdlib && m.is_stub));
}

#[test]
fn third_party_is_skipped_when_consult_third_party_is_false() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/site-packages/numpy/__init__.py");
    let mut paths = SearchPaths::new();
    paths.third_party_roots.push(PathBuf::from("/site-packages"));
    paths.consult_third_party = false;

    let mut resolver = resolver_with(fs, paths);
    let reference = ModuleReference::absolute(vec!["numpy".into()]);
    let resolution = resolver.resolve(Path::new("/proj/main.py"), &reference);

    assert_eq!(resolution, Resolution::Unresolved);
}

#[test]
fn third_party_resolves_when_enabled() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/site-packages/numpy/__init__.py");
    let mut paths = SearchPaths::new();
    paths.third_party_roots.push(PathBuf::from("/site-packages"));

    let mut resolver = resolver_with(fs, paths);
    let reference = ModuleReference::absolute(vec!["numpy".into()]);
    let resolution = resolver.resolve(Path::new("/proj/main.py"), &reference);

    assert!(matches!(resolution, Resolution::Resolved(ref m) if m.import_type == ImportType::ThirdParty));
}

#[test]
fn directory_with_no_init_file_resolves_as_a_namespace_package() {
    let mut fs = FakeFileSystem::new();
    fs.add_dir("/proj/ns_pkg");
    let mut paths = SearchPaths::new();
    paths.source_roots.push(PathBuf::from("/proj"));

    let mut resolver = resolver_with(fs, paths);
    let reference = ModuleReference::absolute(vec!["ns_pkg".into()]);
    let resolution = resolver.resolve(Path::new("/proj/main.py"), &reference);

    assert!(matches!(resolution, Resolution::Resolved(ref m) if m.is_namespace_package));
}

#[test]
fn relative_import_resolves_against_the_importing_files_directory() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/proj/pkg/sibling.py");
    let paths = SearchPaths::new();

    let mut resolver = resolver_with(fs, paths);
    let reference = ModuleReference::relative(1, vec!["sibling".into()]);
    let resolution = resolver.resolve(Path::new("/proj/pkg/main.py"), &reference);

    match resolution {
        Resolution::Resolved(module) => assert_eq!(module.resolved_path, PathBuf::from("/proj/pkg/sibling.py")),
        Resolution::Unresolved => panic!("expected the sibling module to resolve"),
    }
}

#[test]
fn relative_import_with_extra_dots_walks_up_further() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/proj/cousin.py");
    let paths = SearchPaths::new();

    let mut resolver = resolver_with(fs, paths);
    let reference = ModuleReference::relative(2, vec!["cousin".into()]);
    let resolution = resolver.resolve(Path::new("/proj/pkg/main.py"), &reference);

    assert!(resolution.is_resolved());
}

#[test]
fn unknown_module_resolves_to_unresolved() {
    let fs = FakeFileSystem::new();
    let paths = SearchPaths::new();

    let mut resolver = resolver_with(fs, paths);
    let reference = ModuleReference::absolute(vec!["nonexistent".into()]);
    let resolution = resolver.resolve(Path::new("/proj/main.py"), &reference);

    assert_eq!(resolution, Resolution::Unresolved);
}

#[test]
fn resolution_is_memoized_and_survives_the_underlying_file_disappearing() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/proj/pkg/widgets.py");
    let mut paths = SearchPaths::new();
    paths.source_roots.push(PathBuf::from("/proj"));

    let mut resolver = resolver_with(fs, paths);
    let reference = ModuleReference::absolute(vec!["pkg".into(), "widgets".into()]);
    let from_file = Path::new("/proj/pkg/main.py");

    let first = resolver.resolve(from_file, &reference);
    assert!(first.is_resolved());

    // The underlying filesystem snapshot is owned by the resolver now, so
    // there's no direct way to mutate it from here; the memoized result
    // staying resolved on a second call with no invalidation is the
    // behavior under test.
    let second = resolver.resolve(from_file, &reference);
    assert_eq!(first, second);
}

#[test]
fn invalidate_path_drops_only_entries_that_probed_that_path() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/proj/pkg/widgets.py");
    let mut paths = SearchPaths::new();
    paths.source_roots.push(PathBuf::from("/proj"));

    let mut resolver = resolver_with(fs, paths);
    let widgets = ModuleReference::absolute(vec!["pkg".into(), "widgets".into()]);
    let gadgets = ModuleReference::absolute(vec!["pkg".into(), "gadgets".into()]);
    let from_file = Path::new("/proj/pkg/main.py");

    resolver.resolve(from_file, &widgets);
    resolver.resolve(from_file, &gadgets);
    assert_eq!(resolver.cache.len(), 2);

    resolver.invalidate_path(Path::new("/proj/pkg/widgets.py"));
    assert_eq!(resolver.cache.len(), 1);
}

#[test]
fn replacing_search_paths_clears_every_memoized_resolution() {
    let fs = FakeFileSystem::new();
    let paths = SearchPaths::new();

    let mut resolver = resolver_with(fs, paths);
    let reference = ModuleReference::absolute(vec!["anything".into()]);
    resolver.resolve(Path::new("/proj/main.py"), &reference);
    assert_eq!(resolver.cache.len(), 1);

    resolver.set_search_paths(SearchPaths::new());
    assert!(resolver.cache.is_empty());
}
