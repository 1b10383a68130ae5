use super::*;

#[test]
fn fake_file_system_reports_added_files() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/project/pkg/module.py");

    assert!(fs.is_file(Path::new("/project/pkg/module.py")));
    assert!(!fs.is_file(Path::new("/project/pkg/other.py")));
}

#[test]
fn adding_a_file_registers_its_ancestor_directories() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/project/pkg/module.py");

    assert!(fs.is_dir(Path::new("/project/pkg")));
    assert!(fs.is_dir(Path::new("/project")));
    assert!(!fs.is_file(Path::new("/project/pkg")));
}

#[test]
fn namespace_packages_are_directories_with_no_registered_files() {
    let mut fs = FakeFileSystem::new();
    fs.add_dir("/project/ns");

    assert!(fs.is_dir(Path::new("/project/ns")));
    assert!(!fs.is_file(Path::new("/project/ns")));
}

#[test]
fn removing_a_file_clears_only_that_file() {
    let mut fs = FakeFileSystem::new();
    fs.add_file("/project/pkg/module.py");
    fs.remove_file(Path::new("/project/pkg/module.py"));

    assert!(!fs.is_file(Path::new("/project/pkg/module.py")));
    assert!(fs.is_dir(Path::new("/project/pkg")));
}
