use super::*;

#[test]
fn parses_known_versions() {
    assert_eq!(PythonVersion::parse("3.10"), Some(PythonVersion::Py310));
    assert_eq!(PythonVersion::parse("3.5"), Some(PythonVersion::Py35));
    assert_eq!(PythonVersion::parse("3.99"), None);
}

#[test]
fn default_version_is_latest_supported() {
    assert_eq!(PythonVersion::default(), PythonVersion::Py313);
}

#[test]
fn displays_as_dotted_version() {
    assert_eq!(PythonVersion::Py312.to_string(), "3.12");
}

#[test]
fn gates_version_specific_syntax() {
    assert!(!PythonVersion::Py37.supports_walrus());
    assert!(PythonVersion::Py38.supports_walrus());

    assert!(!PythonVersion::Py39.supports_match_statement());
    assert!(PythonVersion::Py310.supports_match_statement());

    assert!(!PythonVersion::Py311.supports_pep695_generics());
    assert!(PythonVersion::Py312.supports_pep695_generics());

    assert!(!PythonVersion::Py35.supports_numeric_underscores());
    assert!(PythonVersion::Py36.supports_numeric_underscores());
}

#[test]
fn parses_platform_case_insensitively() {
    assert_eq!(PythonPlatform::parse("Linux"), Some(PythonPlatform::Linux));
    assert_eq!(PythonPlatform::parse("windows"), Some(PythonPlatform::Windows));
    assert_eq!(PythonPlatform::parse("solaris"), None);
}

#[test]
fn resolves_most_specific_matching_environment() {
    let default_env = ExecutionEnvironment {
        root: String::new(),
        python_version: PythonVersion::Py313,
        python_platform: PythonPlatform::All,
        extra_paths: Vec::new(),
    };
    let src_env = ExecutionEnvironment {
        root: "src/".to_string(),
        python_version: PythonVersion::Py38,
        python_platform: PythonPlatform::Linux,
        extra_paths: Vec::new(),
    };
    let environments = vec![src_env.clone()];

    let resolved = resolve_execution_environment(&environments, &default_env, "src/pkg/mod.py");
    assert_eq!(resolved.python_version, PythonVersion::Py38);

    let fallback = resolve_execution_environment(&environments, &default_env, "tools/script.py");
    assert_eq!(fallback.python_version, PythonVersion::Py313);
}
