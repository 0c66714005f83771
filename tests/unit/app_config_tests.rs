/*!
 * Tests for application configuration functionality
 */

use easyread::app_config::{Config, LogLevel};

use crate::common::create_temp_dir;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.language, "en");
    assert_eq!(config.generation.model, "gpt-4o-mini");
    assert_eq!(config.generation.endpoint, "https://api.openai.com/v1");
    assert_eq!(config.generation.temperature, 0.4);
    assert_eq!(config.generation.max_words_per_sentence, 15);
    assert!(config.pictograms.enabled);
    assert_eq!(config.pictograms.search_endpoint, "https://api.arasaac.org/api");
    assert_eq!(config.extraction.attribute, "data-content-id");
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    // Start with a valid config
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Invalid language code
    config.language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.language = "es".to_string();
    assert!(config.validate().is_ok());

    // Empty model
    config.generation.model = "  ".to_string();
    assert!(config.validate().is_err());
    config.generation.model = "gpt-4o-mini".to_string();

    // Temperature out of range
    config.generation.temperature = 0.0;
    assert!(config.validate().is_err());
    config.generation.temperature = 1.5;
    assert!(config.validate().is_err());
    config.generation.temperature = 1.0;
    assert!(config.validate().is_ok());

    // Zero-length sentences make no sense
    config.generation.max_words_per_sentence = 0;
    assert!(config.validate().is_err());
    config.generation.max_words_per_sentence = 10;

    // Empty extraction attribute
    config.extraction.attribute = "".to_string();
    assert!(config.validate().is_err());
}

/// Test parsing a partial config file with serde defaults filling the rest
#[test]
fn test_config_fromPartialJson_shouldApplyDefaults() {
    let json = r#"{
        "language": "fr",
        "generation": { "model": "gpt-4o" }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.language, "fr");
    assert_eq!(config.generation.model, "gpt-4o");
    // Everything else falls back to defaults
    assert_eq!(config.generation.temperature, 0.4);
    assert!(config.pictograms.enabled);
    assert_eq!(config.extraction.attribute, "data-content-id");
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test round-tripping a config through a file
#[test]
fn test_config_fromFileOrCreate_shouldCreateAndReload() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let created = Config::from_file_or_create(&path).unwrap();
    assert!(path.exists());

    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.language, created.language);
    assert_eq!(reloaded.generation.model, created.generation.model);
}

/// Test that a malformed config file is rejected with context
#[test]
fn test_config_fromFile_withInvalidJson_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}
