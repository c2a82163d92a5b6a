/*!
 * Tests for provider construction and the batch prompt protocol
 */

use locforge::app_config::{ProviderConfig, TranslationProvider};
use locforge::errors::ProviderError;
use locforge::providers::backend_from_config;
use locforge::translation::prompts;

#[test]
fn test_backend_from_config_shouldBuildEveryProvider() {
    let cases = [
        (TranslationProvider::OpenAI, "openai"),
        (TranslationProvider::Anthropic, "anthropic"),
        (TranslationProvider::Gemini, "gemini"),
        (TranslationProvider::GitHubModels, "github"),
    ];
    for (provider, expected_name) in cases {
        let config = ProviderConfig::new(provider);
        let backend = backend_from_config(provider, &config).unwrap();
        assert_eq!(backend.name(), expected_name);
    }
}

#[test]
fn test_backend_from_config_forAzureWithoutEndpoint_shouldFail() {
    let config = ProviderConfig::new(TranslationProvider::Azure);
    let result = backend_from_config(TranslationProvider::Azure, &config);
    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}

#[test]
fn test_backend_from_config_forAzureWithEndpoint_shouldSucceed() {
    let mut config = ProviderConfig::new(TranslationProvider::Azure);
    config.endpoint = "https://myresource.openai.azure.com".to_string();
    let backend = backend_from_config(TranslationProvider::Azure, &config).unwrap();
    assert_eq!(backend.name(), "azure");
}

#[test]
fn test_encode_decode_batch_shouldRoundTripMarkers() {
    let texts = vec![
        "Hello".to_string(),
        "A line\nwith a break".to_string(),
        "Goodbye".to_string(),
    ];
    let encoded = prompts::encode_batch(&texts);
    // A model that echoes the payload decodes back to the same texts
    let decoded = prompts::decode_batch(&encoded, texts.len()).unwrap();
    assert_eq!(decoded, texts);
}

#[test]
fn test_decode_batch_withMissingEntries_shouldFailAsParseError() {
    let response = "<<ENTRY_0>>\nBonjour\n<<END>>";
    let result = prompts::decode_batch(response, 2);
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[test]
fn test_build_system_prompt_shouldNameLanguageAndProtectedTerms() {
    let prompt = prompts::build_system_prompt(
        "Simplified Chinese",
        &["LocForge".to_string(), "Pro Mode".to_string()],
    );
    assert!(prompt.contains("Simplified Chinese"));
    assert!(prompt.contains("LocForge"));
    assert!(prompt.contains("Pro Mode"));

    let plain = prompts::build_system_prompt("French", &[]);
    assert!(plain.contains("French"));
    assert!(!plain.contains("verbatim"));
}
