//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use crate::data_structures::perfect_hash::{PerfectHashError, PerfectHashMap};
use crate::error::config::ConfigError;
use crate::error::{FksError, FksResult};
use std::path::PathBuf;

/// Test that nested errors work correctly.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let fks_error = FksError::Io(io_error);

    let error_string = format!("{fks_error}");
    assert!(error_string.contains("file not found"));
}

/// Test conversion of configuration errors.
#[test]
fn test_config_error_conversion() {
    let error: FksError = ConfigError::FileNotFound(PathBuf::from("missing.toml")).into();
    assert!(matches!(error, FksError::Config(_)));
    assert_eq!(
        error.to_string(),
        "Configuration error: Configuration file not found: missing.toml"
    );
}

/// Test that map errors propagate through `?`.
#[test]
fn test_perfect_hash_error_propagation() {
    fn store(map: &PerfectHashMap<String, u8>, key: &str) -> FksResult<()> {
        map.put(key, 1)?;
        Ok(())
    }

    let map = PerfectHashMap::new(["known".to_string()]).unwrap();
    assert!(store(&map, "known").is_ok());

    let error = store(&map, "unknown").unwrap_err();
    assert!(matches!(
        error,
        FksError::PerfectHash(PerfectHashError::UnknownKey)
    ));
    assert_eq!(
        error.to_string(),
        "Perfect hash error: Key was not in the original key set"
    );
}

/// Test conversion of serialization errors.
#[test]
fn test_serialization_error_conversion() {
    let parse = serde_json::from_str::<u32>("not json").unwrap_err();
    let error: FksError = parse.into();
    assert!(error.to_string().starts_with("Serialization error:"));
}

/// Test custom errors display their message verbatim.
#[test]
fn test_custom_error() {
    let error = FksError::Custom("test error".to_string());
    assert_eq!(error.to_string(), "test error");
}
