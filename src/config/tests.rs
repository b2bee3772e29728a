//! Tests for config functionality.

use crate::config::{Config, OutputFormat};

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.repository_uri, "");
    assert_eq!(config.root_path, None);
    assert_eq!(config.cache_path, "cvs-cache.json");
    assert!(config.dedup_committers);
    assert_eq!(config.output, OutputFormat::Ndjson);
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config.cache_path, "cvs-cache.json");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
repository_uri: ":pserver:anonymous@cvs.example.org:/cvsroot/proj"
cache_path: /tmp/proj-cache.json
dedup_committers: false
output: summary
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.cache_path, "/tmp/proj-cache.json");
    assert!(!config.dedup_committers);
    assert_eq!(config.output, OutputFormat::Summary);
    assert_eq!(config.effective_root_path(), "/cvsroot/proj");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
cache_path: c.json
some_future_option: 42
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.cache_path, "c.json");
}

#[test]
fn test_explicit_root_path_overrides_uri() {
    let yaml = r#"
repository_uri: "ext:host:/cvsroot/proj"
root_path: "/mirror/proj/"
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.effective_root_path(), "/mirror/proj/");
}

#[test]
fn test_empty_cache_path_is_rejected() {
    let err = Config::from_yaml("cache_path: \"  \"").unwrap_err();
    assert!(err.to_string().contains("cache_path must not be empty"));
}

#[test]
fn test_invalid_output_format_is_rejected() {
    assert!(Config::from_yaml("output: xml").is_err());
    assert_eq!(OutputFormat::from_str("summary"), Some(OutputFormat::Summary));
    assert_eq!(OutputFormat::from_str("xml"), None);
}

#[test]
fn test_yaml_roundtrip_keeps_values() {
    let config = Config {
        repository_uri: "/var/cvs/proj".to_string(),
        cache_path: "out.json".to_string(),
        ..Config::default()
    };
    let reparsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();

    assert_eq!(reparsed.repository_uri, "/var/cvs/proj");
    assert_eq!(reparsed.cache_path, "out.json");
    assert_eq!(reparsed.effective_root_path(), "/var/cvs/proj");
}

#[test]
fn test_load_missing_file_is_user_error() {
    let err = Config::load("/nonexistent/cvsparse.yaml").unwrap_err();
    assert_eq!(err.exit_code(), crate::exit_codes::USER_ERROR);
}
