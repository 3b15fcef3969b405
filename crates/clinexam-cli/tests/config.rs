use clinexam_cli::config::{CURRENT_VERSION, CliConfig, LogFormat, load_config, migrate, parse_config};
use clinexam_core::models::domain::Domain;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(Some(dir.path().join("config.json").as_path())).unwrap();
    assert_eq!(config, CliConfig::default());
    assert_eq!(config.domains, Domain::ALL);
}

#[test]
fn current_version_loads_as_is() {
    let config = parse_config(
        r#"{"config_version": 1, "log_format": "json", "pretty": true, "domains": ["neurology"]}"#,
    )
    .unwrap();
    assert_eq!(config.log_format, LogFormat::Json);
    assert!(config.pretty);
    assert_eq!(config.domains, [Domain::Neurology]);
    assert_eq!(config.migrated_from, None);
    assert_eq!(config.engine_config().domains, [Domain::Neurology]);
}

#[test]
fn v0_config_is_migrated() {
    let config = parse_config(r#"{"log_json": true, "pretty": false}"#).unwrap();
    assert_eq!(config.config_version, CURRENT_VERSION);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.domains, Domain::ALL);
    assert_eq!(config.migrated_from, Some(0));
}

#[test]
fn migration_keeps_explicit_fields() {
    let json = serde_json::json!({"log_format": "text", "domains": ["hematology"]});
    let migrated = migrate(json, 0).unwrap();
    assert_eq!(migrated["domains"], serde_json::json!(["hematology"]));
    assert_eq!(migrated["config_version"], 1);
    assert!(migrated.get("log_json").is_none());
}

#[test]
fn newer_version_is_rejected() {
    let err = parse_config(r#"{"config_version": 99}"#).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn version_beyond_u32_is_rejected_not_wrapped() {
    // 2^32 + 1 would wrap to version 1 if narrowed
    let err = parse_config(r#"{"config_version": 4294967297}"#).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn non_object_config_is_rejected() {
    assert!(parse_config("[1, 2]").is_err());
}

#[test]
fn config_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"config_version": 1, "pretty": true}"#).unwrap();
    let config = load_config(Some(path.as_path())).unwrap();
    assert!(config.pretty);
    assert_eq!(config.log_format, LogFormat::Text);
}
