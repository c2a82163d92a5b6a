use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::translation::prompts;

use super::TranslationBackend;
use super::openai::classify_status;

/// Gemini client for the Google generateContent API
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key, passed as a query parameter
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
    /// Model name
    model: String,
}

impl std::fmt::Debug for Gemini {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gemini")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

/// One text part of a content block
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}

/// A content block with a role and text parts
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<GeminiPart>,
}

/// Generation tuning parameters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// generateContent request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation turns
    contents: Vec<GeminiContent>,
    /// System instruction guiding the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    /// Generation tuning
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

impl GeminiRequest {
    /// Create a request with one user turn
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: user_text.into(),
                }],
            }],
            system_instruction: None,
            generation_config: None,
        }
    }

    /// Set the system instruction
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system_instruction = Some(GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: system.into(),
            }],
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        let config = self
            .generation_config
            .get_or_insert(GeminiGenerationConfig {
                temperature: None,
                max_output_tokens: None,
            });
        config.temperature = Some(temperature);
        self
    }
}

/// One response candidate
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiContent,
}

/// generateContent response
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// The full generateContent URL for this client's model
    fn api_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        };
        format!("{}/v1beta/models/{}:generateContent", base, self.model)
    }

    /// Complete a generateContent request
    pub async fn complete(&self, request: GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        let response = self
            .client
            .post(self.api_url())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, error_text);
            return Err(classify_status(status.as_u16(), error_text));
        }

        response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Extract the first candidate's text from a response
    pub fn extract_text(response: &GeminiResponse) -> Result<String, ProviderError> {
        let candidate = response.candidates.first().ok_or_else(|| {
            ProviderError::ParseError("response contained no candidates".to_string())
        })?;
        Ok(candidate
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect())
    }
}

#[async_trait]
impl TranslationBackend for Gemini {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target_language: &str,
        protected_terms: &[String],
    ) -> Result<Vec<String>, ProviderError> {
        let language_name = language_utils::display_name(target_language);
        let request = GeminiRequest::new(prompts::encode_batch(texts))
            .system(prompts::build_system_prompt(&language_name, protected_terms))
            .temperature(0.3);

        let response = self.complete(request).await?;
        let content = Self::extract_text(&response)?;
        prompts::decode_batch(&content, texts.len())
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = GeminiRequest::new("Reply with OK");
        self.complete(request).await?;
        Ok(())
    }
}
