use nogashio::settings::{DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, hide_api};
use nogashio::{AppError, Settings};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_default_settings() {
    let settings = Settings::new();
    assert_eq!(settings.model, DEFAULT_MODEL);
    assert_eq!(settings.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert!(settings.openai_api_key.is_none());
    assert!(!settings.has_api_key());
    assert!(!settings.debug_mode);
}

#[test]
fn test_settings_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let settings = Settings {
        openai_api_key: Some("sk-test-1234567890".to_string()),
        model: "gpt-4o".to_string(),
        api_base: Some("http://localhost:8080/v1".to_string()),
        request_timeout_secs: 15,
        debug_mode: true,
    };
    settings.save_to_file(&path).unwrap();

    let loaded = Settings::load_settings_from_file(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"model":"gpt-4o"}"#).unwrap();

    let loaded = Settings::load_settings_from_file(&path).unwrap();
    assert_eq!(loaded.model, "gpt-4o");
    assert_eq!(loaded.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert!(loaded.openai_api_key.is_none());
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "not json").unwrap();

    let result = Settings::load_settings_from_file(&path);
    assert!(matches!(result, Err(AppError::Serialization(_))));

    let missing = Settings::load_settings_from_file(dir.path().join("missing.json"));
    assert!(matches!(missing, Err(AppError::IO(_))));
}

#[test]
fn test_overrides_skip_blank_values() {
    let settings = Settings::new().with_overrides(Some("  sk-env-key  ".into()), Some(" ".into()));
    assert_eq!(settings.openai_api_key.as_deref(), Some("sk-env-key"));
    assert_eq!(settings.model, DEFAULT_MODEL);
    assert!(settings.has_api_key());

    let settings = settings.with_overrides(Some("".into()), Some("gpt-4.1".into()));
    assert_eq!(settings.openai_api_key.as_deref(), Some("sk-env-key"));
    assert_eq!(settings.model, "gpt-4.1");
}

#[test]
fn test_debug_output_hides_the_key() {
    let settings = Settings::new().with_overrides(Some("sk-abcdefghijklmnop".into()), None);
    let debug = format!("{settings:?}");
    assert!(!debug.contains("sk-abcdefghijklmnop"));
    assert!(debug.contains("sk-abcd...nop"));

    assert_eq!(hide_api("short"), "***");
}

#[test]
fn test_timeout_is_never_zero() {
    let settings = Settings {
        request_timeout_secs: 0,
        ..Settings::default()
    };
    assert_eq!(settings.request_timeout(), Duration::from_secs(1));
}
