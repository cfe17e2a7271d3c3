//! Integration tests for configuration loader
//!
//! Loads real files from a temp directory and checks the result is usable
//! by the infrastructure constructors.

use std::path::PathBuf;

use tempfile::TempDir;
use wastetrack_domain::constants::{DEFAULT_API_TIMEOUT_SECS, DEFAULT_GEOCODING_ENDPOINT};
use wastetrack_domain::WasteTrackError;
use wastetrack_infra::{config, ApiClientConfig, MapboxGeocoder};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write config file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write(
        &dir,
        "wastetrack.json",
        r#"{
            "api": { "base_url": "https://api.wastetrack.test/api", "timeout_secs": 10 },
            "geocoding": {
                "endpoint": "https://geo.wastetrack.test/places",
                "access_token": "pk.integration",
                "cache_capacity": 32
            },
            "obfuscation": { "secret": "integration-secret" }
        }"#,
    );

    let config = config::load_from_file(Some(path)).expect("Failed to load config");

    assert_eq!(config.api.base_url, "https://api.wastetrack.test/api");
    assert_eq!(ApiClientConfig::from(&config.api).timeout.as_secs(), 10);
    assert_eq!(config.geocoding.cache_capacity, 32);
    assert_eq!(config.obfuscation.secret, "integration-secret");
    assert!(MapboxGeocoder::new(&config.geocoding).is_ok());
}

#[test]
fn test_load_config_from_partial_toml_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write(
        &dir,
        "wastetrack.toml",
        r#"
[api]
base_url = "https://staging.wastetrack.test/api"
"#,
    );

    let config = config::load_from_file(Some(path)).expect("Failed to load config");

    assert_eq!(config.api.base_url, "https://staging.wastetrack.test/api");
    assert_eq!(config.api.timeout_secs, DEFAULT_API_TIMEOUT_SECS);
    assert_eq!(config.geocoding.endpoint, DEFAULT_GEOCODING_ENDPOINT);
}

#[test]
fn test_invalid_toml_reports_config_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write(&dir, "wastetrack.toml", "[api\nbase_url = 1");

    let err = config::load_from_file(Some(path)).unwrap_err();

    assert!(matches!(err, WasteTrackError::Config(ref msg) if msg.contains("TOML")));
}
