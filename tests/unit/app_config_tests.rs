/*!
 * Tests for configuration loading, defaults, and validation
 */

use cvetrans::app_config::{Config, TranslationProvider};

use crate::common;

#[test]
fn test_config_saveAndLoad_shouldRoundTrip() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.provider.provider_type = TranslationProvider::Anthropic;
    config.provider.model = "claude-3-5-sonnet-20241022".to_string();
    config.translation.batch_size = 8;

    config.save_to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.provider.provider_type, TranslationProvider::Anthropic);
    assert_eq!(loaded.provider.model, "claude-3-5-sonnet-20241022");
    assert_eq!(loaded.translation.batch_size, 8);
}

#[test]
fn test_config_fromMinimalJson_shouldApplyDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &dir.path().to_path_buf(),
        "conf.json",
        r#"{ "provider": { "api_key": "sk-test" } }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "ja");
    assert_eq!(config.provider.provider_type, TranslationProvider::OpenAI);
    assert_eq!(config.provider.model, "gpt-4o");
    assert_eq!(config.provider.api_key, "sk-test");
    assert!((config.provider.temperature - 0.1).abs() < f32::EPSILON);
    assert_eq!(config.translation.batch_size, 5);
    assert_eq!(config.translation.max_concurrency, 3);
    assert_eq!(config.classifier.coverage_threshold, 0.5);
    assert!(!config.validation.enabled);
}

#[test]
fn test_batchOptions_shouldMapTimeoutZeroToNone() {
    let mut config = Config::default();
    assert!(config.translation.batch_options().document_timeout.is_none());

    config.translation.document_timeout_secs = 120;
    let options = config.translation.batch_options();
    assert_eq!(
        options.document_timeout,
        Some(std::time::Duration::from_secs(120))
    );
    assert_eq!(options.batch_size, 5);
    assert_eq!(options.max_concurrency, 3);
}

#[test]
fn test_requestParams_shouldMirrorProviderConfig() {
    let mut config = Config::default();
    config.provider.model = "gpt-4o-mini".to_string();
    config.provider.max_tokens = 2048;

    let params = config.provider.request_params();
    assert_eq!(params.model, "gpt-4o-mini");
    assert_eq!(params.max_tokens, 2048);
}

#[test]
fn test_validate_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.translation.batch_size = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.classifier.coverage_threshold = 1.5;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.provider.model = String::new();
    assert!(config.validate().is_err());
}
