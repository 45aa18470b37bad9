//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_returns_some_path() {
    let path = default_config_path();
    assert!(
        path.is_some(),
        "default_config_path should return Some on supported platforms"
    );
}

#[test]
fn default_config_path_contains_urlstate_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("urlstate") && path_str.ends_with("config.toml"),
        "Path should contain 'urlstate' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_urlstate_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("urlstate.log"),
        "Default log path should end with 'urlstate.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("urlstate_test_config.toml");

    let toml_content = r#"
base_path = "/search"
json_output = true
log_file_path = "/tmp/urlstate-test.log"
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(result.is_ok(), "Should successfully parse valid TOML");

    let config = result.unwrap().expect("Should return Some for existing file");
    assert_eq!(config.base_path, Some("/search".to_string()));
    assert_eq!(config.json_output, Some(true));
    assert_eq!(
        config.log_file_path,
        Some(std::path::PathBuf::from("/tmp/urlstate-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("urlstate_test_invalid.toml");

    let invalid_toml = "this is not valid TOML ][}{";
    fs::write(&config_path, invalid_toml).expect("Failed to write invalid test config");

    let result = load_config_file(&config_path);
    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("urlstate_test_unknown.toml");

    fs::write(&config_path, "not_a_real_field = 1\n").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Unknown fields should be a parse error, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_handles_partial_config() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("urlstate_test_partial.toml");

    let partial_toml = r#"
base_path = "/transformations"
# Other fields omitted
"#;

    fs::write(&config_path, partial_toml).expect("Failed to write partial test config");

    let result = load_config_file(&config_path);
    assert!(result.is_ok(), "Should parse partial config");

    let config = result.unwrap().unwrap();
    assert_eq!(config.base_path, Some("/transformations".to_string()));
    assert_eq!(config.json_output, None);
    assert_eq!(config.log_file_path, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn merge_config_none_uses_defaults() {
    let resolved = merge_config(None);
    assert_eq!(resolved, ResolvedConfig::default());
    assert_eq!(resolved.base_path, "/");
    assert!(!resolved.json_output);
}

#[test]
fn merge_config_file_values_override_defaults() {
    let config_file = ConfigFile {
        base_path: Some("/gallery".to_string()),
        json_output: Some(true),
        log_file_path: None,
    };

    let resolved = merge_config(Some(config_file));
    assert_eq!(resolved.base_path, "/gallery");
    assert!(resolved.json_output);
    assert_eq!(
        resolved.log_file_path,
        default_log_path(),
        "Missing log_file_path in config should use default"
    );
}

#[test]
#[serial(urlstate_env)]
fn apply_env_overrides_reads_urlstate_base() {
    env::set_var("URLSTATE_BASE", "/from-env");
    let resolved = apply_env_overrides(ResolvedConfig::default());
    env::remove_var("URLSTATE_BASE");

    assert_eq!(resolved.base_path, "/from-env");
}

#[test]
#[serial(urlstate_env)]
fn apply_env_overrides_without_var_keeps_config() {
    env::remove_var("URLSTATE_BASE");
    let resolved = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(resolved.base_path, "/");
}

#[test]
#[serial(urlstate_env)]
fn load_config_with_precedence_prefers_explicit_path() {
    let temp_dir = env::temp_dir();
    let explicit_path = temp_dir.join("urlstate_test_explicit.toml");
    let env_path = temp_dir.join("urlstate_test_envvar.toml");

    fs::write(&explicit_path, "base_path = \"/explicit\"\n").expect("write explicit");
    fs::write(&env_path, "base_path = \"/env\"\n").expect("write env");
    env::set_var("URLSTATE_CONFIG", &env_path);

    let result = load_config_with_precedence(Some(explicit_path.clone()));

    env::remove_var("URLSTATE_CONFIG");
    fs::remove_file(&explicit_path).ok();
    fs::remove_file(&env_path).ok();

    let config = result.expect("load ok").expect("config present");
    assert_eq!(config.base_path, Some("/explicit".to_string()));
}

#[test]
#[serial(urlstate_env)]
fn load_config_with_precedence_falls_back_to_env_var() {
    let temp_dir = env::temp_dir();
    let env_path = temp_dir.join("urlstate_test_envvar_only.toml");

    fs::write(&env_path, "base_path = \"/env\"\n").expect("write env");
    env::set_var("URLSTATE_CONFIG", &env_path);

    let result = load_config_with_precedence(None);

    env::remove_var("URLSTATE_CONFIG");
    fs::remove_file(&env_path).ok();

    let config = result.expect("load ok").expect("config present");
    assert_eq!(config.base_path, Some("/env".to_string()));
}

#[test]
fn apply_cli_overrides_beat_everything() {
    let resolved = ResolvedConfig {
        base_path: "/from-file".to_string(),
        json_output: false,
        log_file_path: default_log_path(),
    };

    let resolved = apply_cli_overrides(resolved, Some("/from-cli".to_string()), Some(true));
    assert_eq!(resolved.base_path, "/from-cli");
    assert!(resolved.json_output);
}

#[test]
fn apply_cli_overrides_none_keeps_config() {
    let resolved = apply_cli_overrides(ResolvedConfig::default(), None, None);
    assert_eq!(resolved, ResolvedConfig::default());
}
