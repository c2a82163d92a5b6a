/*!
 * Tests for app configuration functionality
 */

use std::str::FromStr;

use locforge::app_config::{
    Config, LogLevel, ProviderConfig, RunConfig, TranslationProvider,
};

use crate::common::create_temp_dir;

#[test]
fn test_default_config_shouldUseDocumentedDefaults() {
    let config = Config::default();
    assert_eq!(config.source_language, "en");
    assert!(config.target_languages.is_empty());
    assert_eq!(config.provider, TranslationProvider::OpenAI);
    assert_eq!(config.run.concurrent_requests, 3);
    assert_eq!(config.run.batch_size, 10);
    assert_eq!(config.run.retry_count, 0);
    assert!(config.run.request_timeout_secs.is_none());
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_default_config_shouldKnowEveryProvider() {
    let config = Config::default();
    for provider in ["openai", "anthropic", "gemini", "azure", "github"] {
        assert!(
            config.available_providers.iter().any(|p| p.provider_type == provider),
            "missing provider config for {}",
            provider
        );
    }
}

#[test]
fn test_run_config_validate_shouldEnforceBounds() {
    let valid = RunConfig::default();
    assert!(valid.validate().is_ok());

    for concurrency in [0, 11] {
        let config = RunConfig { concurrent_requests: concurrency, ..RunConfig::default() };
        assert!(config.validate().is_err(), "concurrency {} accepted", concurrency);
    }
    for batch_size in [0, 31] {
        let config = RunConfig { batch_size, ..RunConfig::default() };
        assert!(config.validate().is_err(), "batch size {} accepted", batch_size);
    }

    // Boundary values are legal
    let edges = RunConfig { concurrent_requests: 10, batch_size: 30, ..RunConfig::default() };
    assert!(edges.validate().is_ok());
    let edges = RunConfig { concurrent_requests: 1, batch_size: 1, ..RunConfig::default() };
    assert!(edges.validate().is_ok());
}

#[test]
fn test_provider_from_str_shouldAcceptKnownNamesCaseInsensitively() {
    assert_eq!(TranslationProvider::from_str("OpenAI").unwrap(), TranslationProvider::OpenAI);
    assert_eq!(TranslationProvider::from_str("anthropic").unwrap(), TranslationProvider::Anthropic);
    assert_eq!(TranslationProvider::from_str("GEMINI").unwrap(), TranslationProvider::Gemini);
    assert_eq!(TranslationProvider::from_str("azure").unwrap(), TranslationProvider::Azure);
    assert_eq!(TranslationProvider::from_str("github").unwrap(), TranslationProvider::GitHubModels);
    assert!(TranslationProvider::from_str("llamacpp").is_err());
}

#[test]
fn test_config_parse_withPartialJson_shouldFillDefaults() {
    let json = r#"{
        "target_languages": ["fr", "de"],
        "provider": "anthropic",
        "run": { "concurrent_requests": 5, "protected_terms": ["LocForge"] }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.target_languages, vec!["fr".to_string(), "de".to_string()]);
    assert_eq!(config.provider, TranslationProvider::Anthropic);
    assert_eq!(config.run.concurrent_requests, 5);
    assert_eq!(config.run.batch_size, 10);
    assert_eq!(config.run.protected_terms, vec!["LocForge".to_string()]);
    assert_eq!(config.get_model(), "claude-3-5-haiku-latest");
}

#[test]
fn test_from_file_or_default_withMissingFile_shouldCreateDefaultConfig() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("locforge.json");

    let config = Config::from_file_or_default(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config.provider, TranslationProvider::OpenAI);

    // A second load reads the file it just wrote
    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.source_language, config.source_language);
}

#[test]
fn test_active_provider_config_shouldFollowSelectedProvider() {
    let mut config = Config::default();
    config.provider = TranslationProvider::Gemini;
    let active = config.active_provider_config().unwrap();
    assert_eq!(active.provider_type, "gemini");
    assert_eq!(active.model, "gemini-2.0-flash");
}

#[test]
fn test_provider_config_new_forGithub_shouldDefaultEndpoint() {
    let config = ProviderConfig::new(TranslationProvider::GitHubModels);
    assert_eq!(config.endpoint, "https://models.inference.ai.azure.com");
}

#[test]
fn test_config_roundtrip_shouldPreserveRunSettings() {
    let mut config = Config::default();
    config.run.retry_count = 2;
    config.run.request_timeout_secs = Some(30);
    config.target_languages = vec!["zh-Hans".to_string()];

    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back.run.retry_count, 2);
    assert_eq!(back.run.request_timeout_secs, Some(30));
    assert_eq!(back.target_languages, vec!["zh-Hans".to_string()]);
}
