/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for various LLM providers:
 * - OpenAI: chat completions API (also backs Azure OpenAI and GitHub Models)
 * - Anthropic: messages API
 * - Gemini: Google generateContent API
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::app_config::{ProviderConfig, TranslationProvider};
use crate::errors::ProviderError;

/// Common capability for all translation backends
///
/// One call translates one batch of same-language texts. On success the
/// returned vector has exactly one output per input, in input order; any
/// other condition is an error and fails the whole batch.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Translate a batch of texts into one target language
    ///
    /// # Arguments
    /// * `texts` - Source texts, one per batch item
    /// * `target_language` - Locale identifier of the target language
    /// * `protected_terms` - Terms the model must leave unchanged
    ///
    /// # Returns
    /// * `Result<Vec<String>, ProviderError>` - One translation per input text, or an error
    async fn translate_batch(
        &self,
        texts: &[String],
        target_language: &str,
        protected_terms: &[String],
    ) -> Result<Vec<String>, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

/// Build a backend for the configured provider
pub fn backend_from_config(
    provider: TranslationProvider,
    config: &ProviderConfig,
) -> Result<Arc<dyn TranslationBackend>, ProviderError> {
    match provider {
        TranslationProvider::OpenAI => Ok(Arc::new(openai::OpenAI::new(
            &config.api_key,
            &config.endpoint,
            &config.model,
            config.timeout_secs,
        ))),
        TranslationProvider::Azure => {
            if config.endpoint.is_empty() {
                return Err(ProviderError::ConnectionError(
                    "Azure OpenAI requires an endpoint URL".to_string(),
                ));
            }
            Ok(Arc::new(openai::OpenAI::azure(
                &config.api_key,
                &config.endpoint,
                &config.model,
                config.timeout_secs,
            )))
        }
        TranslationProvider::GitHubModels => Ok(Arc::new(openai::OpenAI::github_models(
            &config.api_key,
            &config.endpoint,
            &config.model,
            config.timeout_secs,
        ))),
        TranslationProvider::Anthropic => Ok(Arc::new(anthropic::Anthropic::new(
            &config.api_key,
            &config.endpoint,
            &config.model,
            config.timeout_secs,
        ))),
        TranslationProvider::Gemini => Ok(Arc::new(gemini::Gemini::new(
            &config.api_key,
            &config.endpoint,
            &config.model,
            config.timeout_secs,
        ))),
    }
}

pub mod anthropic;
pub mod gemini;
pub mod mock;
pub mod openai;
