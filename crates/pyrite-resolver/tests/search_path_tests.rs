use super::*;

#[test]
fn new_defaults_to_consulting_third_party() {
    let paths = SearchPaths::new();
    assert!(paths.consult_third_party);
    assert!(paths.all_roots().is_empty());
}

#[test]
fn all_roots_orders_by_precedence_tier() {
    let mut paths = SearchPaths::new();
    paths.source_roots.push(PathBuf::from("/src"));
    paths.stub_roots.push(PathBuf::from("/stubs"));
    paths.bundled_fallback_root = Some(PathBuf::from("/bundled"));
    paths.third_party_roots.push(PathBuf::from("/site-packages"));

    let roots = paths.all_roots();
    assert_eq!(roots, vec![Path::new("/src"), Path::new("/stubs"), Path::new("/bundled"), Path::new("/site-packages")]);
}

#[test]
fn all_roots_skips_third_party_when_disabled() {
    let mut paths = SearchPaths::new();
    paths.consult_third_party = false;
    paths.third_party_roots.push(PathBuf::from("/site-packages"));

    assert!(paths.all_roots().is_empty());
}
