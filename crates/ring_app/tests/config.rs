use std::fs;
use std::time::Duration;

use pretty_assertions::assert_eq;
use ring_app::config::{EmptyMode, SourceErrorMode};
use ring_app::{ConfigError, RingConfig};
use ring_core::DocFormat;
use ring_engine::{EmptyResultPolicy, SourceErrorPolicy};
use tempfile::TempDir;

#[test]
fn loads_yaml_with_defaults() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("ring.yaml");
    fs::write(
        &file,
        "path: /api/v1/docs/\ndocs:\n  - path: http://a/pets.yaml\n  - location: http://b/store.json\n",
    )
    .unwrap();

    let config = RingConfig::load(&file).unwrap();
    assert_eq!(config.base_path(), "/api/v1/docs");
    assert_eq!(config.listen.to_string(), "127.0.0.1:8080");
    assert_eq!(config.on_source_error, SourceErrorMode::Skip);
    assert_eq!(config.on_empty, EmptyMode::EmptyDocument);
    assert_eq!(config.render_options().json_indent, 0);

    let sources = config.sources();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].location, "http://a/pets.yaml");
    assert_eq!(sources[0].format, DocFormat::Yaml);
    assert_eq!(sources[1].format, DocFormat::Json);

    let settings = config.fetch_settings();
    assert_eq!(settings.request_timeout, Duration::from_secs(30));
    assert_eq!(settings.redirect_limit, 5);
}

#[test]
fn loads_json_with_overrides() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("ring.json");
    fs::write(
        &file,
        r#"{
            "path": "/",
            "docs": [{"path": "http://a/doc.yml"}],
            "listen": "0.0.0.0:9000",
            "indent": 2,
            "fetch": {"request_timeout_secs": 3},
            "on_source_error": "abort",
            "on_empty": "error",
            "title": "Pets"
        }"#,
    )
    .unwrap();

    let config = RingConfig::load(&file).unwrap();
    assert_eq!(config.base_path(), "/");
    assert_eq!(config.listen.port(), 9000);
    assert_eq!(config.render_options().json_indent, 2);
    assert_eq!(config.fetch_settings().request_timeout, Duration::from_secs(3));
    assert_eq!(config.fetch_settings().connect_timeout, Duration::from_secs(10));
    assert_eq!(config.policy().on_source_error, SourceErrorPolicy::Abort);
    assert_eq!(config.policy().on_empty, EmptyResultPolicy::Error);
    assert_eq!(config.title, "Pets");
}

#[test]
fn rejects_empty_docs() {
    let err = RingConfig::from_yaml_str("path: /docs\ndocs: []\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref message) if message.contains("docs cannot be empty")));
}

#[test]
fn rejects_relative_base_path() {
    let err = RingConfig::from_yaml_str("path: docs\ndocs: [{path: http://a/x.yaml}]\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn rejects_blank_document_path() {
    let err = RingConfig::from_json_str(r#"{"path": "/d", "docs": [{"path": "  "}]}"#).unwrap_err();
    assert_eq!(err.to_string(), "invalid configuration: docs[0] has an empty path");
}

#[test]
fn rejects_unknown_policy_values() {
    let err = RingConfig::from_yaml_str(
        "path: /d\ndocs: [{path: http://a/x.yaml}]\non_source_error: retry\n",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn rejects_unsupported_extension_and_missing_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("ring.toml");
    fs::write(&file, "path = '/'").unwrap();
    assert!(matches!(
        RingConfig::load(&file),
        Err(ConfigError::UnsupportedExtension(_))
    ));
    assert!(matches!(
        RingConfig::load(&temp.path().join("absent.yaml")),
        Err(ConfigError::Io { .. })
    ));
}
