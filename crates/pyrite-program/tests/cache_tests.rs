use super::*;
use pyrite_parser::Dialect;
use std::path::PathBuf;

fn fixture() -> (ParseResult, BindResult) {
    let parse = pyrite_parser::parse("x: int = 1\n", "a.py", Dialect::default());
    let bind = pyrite_binder::bind_module(&parse.arena, parse.root, "a", Dialect::default());
    (parse, bind)
}

fn tmp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pyrite-cache-test-{name}-{:?}", std::thread::current().id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn store_then_load_round_trips_the_entry() {
    let dir = tmp_dir("roundtrip");
    let cache = PersistentCache::new(dir.clone(), "1.0.0");
    let (parse, bind) = fixture();
    let config_hash = ContentHash::of_str("config");
    let content_hash = ContentHash::of_str("x: int = 1\n");
    let key = cache.key(config_hash, content_hash);

    cache.store(key, config_hash, content_hash, &parse, &bind, Vec::new()).unwrap();
    let loaded = cache.load(key, config_hash, content_hash, |_| None).expect("entry should load");

    assert_eq!(loaded.parse.diagnostics.len(), parse.diagnostics.len());
    assert!(loaded.dependencies.is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn load_misses_when_content_hash_no_longer_matches() {
    let dir = tmp_dir("content-mismatch");
    let cache = PersistentCache::new(dir.clone(), "1.0.0");
    let (parse, bind) = fixture();
    let config_hash = ContentHash::of_str("config");
    let old_hash = ContentHash::of_str("x: int = 1\n");
    let key = cache.key(config_hash, old_hash);
    cache.store(key, config_hash, old_hash, &parse, &bind, Vec::new()).unwrap();

    let new_hash = ContentHash::of_str("x: int = 2\n");
    assert!(cache.load(key, config_hash, new_hash, |_| None).is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn load_misses_when_tool_version_changed() {
    let dir = tmp_dir("tool-version");
    let (parse, bind) = fixture();
    let config_hash = ContentHash::of_str("config");
    let content_hash = ContentHash::of_str("x: int = 1\n");

    let old_cache = PersistentCache::new(dir.clone(), "1.0.0");
    let key = old_cache.key(config_hash, content_hash);
    old_cache.store(key, config_hash, content_hash, &parse, &bind, Vec::new()).unwrap();

    let new_cache = PersistentCache::new(dir.clone(), "2.0.0");
    assert!(new_cache.load(key, config_hash, content_hash, |_| None).is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn load_misses_when_a_recorded_dependency_hash_no_longer_matches() {
    let dir = tmp_dir("dep-mismatch");
    let cache = PersistentCache::new(dir.clone(), "1.0.0");
    let (parse, bind) = fixture();
    let config_hash = ContentHash::of_str("config");
    let content_hash = ContentHash::of_str("x: int = 1\n");
    let key = cache.key(config_hash, content_hash);
    let dep_path = PathBuf::from("/proj/dep.py");
    let dep_hash = ContentHash::of_str("dep v1");
    cache.store(key, config_hash, content_hash, &parse, &bind, vec![(dep_path.clone(), dep_hash)]).unwrap();

    let current_dep_hash = ContentHash::of_str("dep v2");
    let hit = cache.load(key, config_hash, content_hash, |p| if p == dep_path { Some(current_dep_hash) } else { None });
    assert!(hit.is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn validate_counts_entries_from_a_different_tool_version_as_corrupt() {
    let dir = tmp_dir("validate");
    let (parse, bind) = fixture();
    let config_hash = ContentHash::of_str("config");
    let content_hash = ContentHash::of_str("x: int = 1\n");

    let old_cache = PersistentCache::new(dir.clone(), "1.0.0");
    let key = old_cache.key(config_hash, content_hash);
    old_cache.store(key, config_hash, content_hash, &parse, &bind, Vec::new()).unwrap();

    let new_cache = PersistentCache::new(dir.clone(), "2.0.0");
    let report = new_cache.validate().unwrap();
    assert_eq!(report.total_entries, 1);
    assert_eq!(report.valid_entries, 0);
    assert_eq!(report.corrupt_entries, 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn clear_removes_the_whole_cache_directory() {
    let dir = tmp_dir("clear");
    let cache = PersistentCache::new(dir.clone(), "1.0.0");
    let (parse, bind) = fixture();
    let config_hash = ContentHash::of_str("config");
    let content_hash = ContentHash::of_str("x: int = 1\n");
    let key = cache.key(config_hash, content_hash);
    cache.store(key, config_hash, content_hash, &parse, &bind, Vec::new()).unwrap();

    cache.clear().unwrap();
    assert!(!dir.exists());
}

#[test]
fn prune_removes_only_entries_not_in_the_keep_set() {
    let dir = tmp_dir("prune");
    let cache = PersistentCache::new(dir.clone(), "1.0.0");
    let (parse, bind) = fixture();
    let config_hash = ContentHash::of_str("config");

    let keep_hash = ContentHash::of_str("keep");
    let keep_key = cache.key(config_hash, keep_hash);
    cache.store(keep_key, config_hash, keep_hash, &parse, &bind, Vec::new()).unwrap();

    let drop_hash = ContentHash::of_str("drop");
    let drop_key = cache.key(config_hash, drop_hash);
    cache.store(drop_key, config_hash, drop_hash, &parse, &bind, Vec::new()).unwrap();

    let mut keep = FxHashSet::default();
    keep.insert(keep_key);
    let removed = cache.prune(&keep).unwrap();

    assert_eq!(removed, 1);
    assert!(cache.load(keep_key, config_hash, keep_hash, |_| None).is_some());
    assert!(cache.load(drop_key, config_hash, drop_hash, |_| None).is_none());

    let _ = std::fs::remove_dir_all(&dir);
}
