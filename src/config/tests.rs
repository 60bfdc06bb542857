//! Tests for config functionality.

use crate::config::Config;
use crate::locks::AcquireStrategy;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.bucket, "locks");
    assert_eq!(config.store_root, PathBuf::from(".bucketlock"));
    assert_eq!(config.acquire_strategy, AcquireStrategy::CheckThenWrite);
    assert_eq!(config.call_timeout_ms, None);
    assert_eq!(config.stale_after_minutes, 120);
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();

    assert_eq!(config.bucket, "locks");
    assert_eq!(config.stale_after_minutes, 120);
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
bucket: deploy-locks
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.bucket, "deploy-locks");
    assert_eq!(config.store_root, PathBuf::from(".bucketlock"));
    assert_eq!(config.acquire_strategy, AcquireStrategy::CheckThenWrite);
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
bucket: deploy-locks
store_root: /mnt/shared/locks
acquire_strategy: conditional
call_timeout_ms: 2500
stale_after_minutes: 30
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.bucket, "deploy-locks");
    assert_eq!(config.store_root, PathBuf::from("/mnt/shared/locks"));
    assert_eq!(config.acquire_strategy, AcquireStrategy::Conditional);
    assert_eq!(config.call_timeout_ms, Some(2500));
    assert_eq!(config.stale_after_minutes, 30);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
bucket: deploy-locks
region: eu-west-1
future_setting:
  nested: true
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.bucket, "deploy-locks");
}

#[test]
fn test_invalid_strategy_is_rejected() {
    let result = Config::from_yaml("acquire_strategy: optimistic");
    assert!(result.is_err());
}

#[test]
fn test_validate_empty_bucket() {
    let err = Config::from_yaml("bucket: \"\"").unwrap_err();
    assert!(err.to_string().contains("bucket must not be empty"));
}

#[test]
fn test_validate_bucket_with_separator() {
    for bucket in ["a/b", "a\\\\b", "..", "."] {
        let yaml = format!("bucket: \"{}\"", bucket);
        assert!(
            Config::from_yaml(&yaml).is_err(),
            "bucket {:?} should be rejected",
            bucket
        );
    }
}

#[test]
fn test_validate_zero_stale_minutes() {
    let err = Config::from_yaml("stale_after_minutes: 0").unwrap_err();
    assert!(err.to_string().contains("stale_after_minutes"));
}

#[test]
fn test_validate_zero_timeout() {
    let err = Config::from_yaml("call_timeout_ms: 0").unwrap_err();
    assert!(err.to_string().contains("call_timeout_ms"));
}

#[test]
fn test_lock_options_from_config() {
    let config = Config::from_yaml("acquire_strategy: conditional\ncall_timeout_ms: 1500").unwrap();
    let options = config.lock_options();

    assert_eq!(options.strategy, AcquireStrategy::Conditional);
    assert_eq!(options.call_timeout, Some(Duration::from_millis(1500)));
}

#[test]
fn test_yaml_round_trip() {
    let config = Config::from_yaml("bucket: deploy-locks\ncall_timeout_ms: 100").unwrap();
    let reparsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();

    assert_eq!(reparsed.bucket, "deploy-locks");
    assert_eq!(reparsed.call_timeout_ms, Some(100));
}

#[test]
fn test_load_or_default_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_or_default(temp_dir.path().join("bucketlock.yaml")).unwrap();
    assert_eq!(config.bucket, "locks");
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bucketlock.yaml");
    std::fs::write(&path, "bucket: from-file\n").unwrap();

    assert_eq!(Config::load(&path).unwrap().bucket, "from-file");
    assert_eq!(Config::load_or_default(&path).unwrap().bucket, "from-file");
}

#[test]
fn test_load_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load(temp_dir.path().join("nope.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}
