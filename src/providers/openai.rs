use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::translation::prompts;

use super::TranslationBackend;

/// Which chat-completions flavor this client talks to
///
/// Azure OpenAI and GitHub Models speak the same request shape as OpenAI;
/// only the URL layout and auth header differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApiFlavor {
    OpenAI,
    Azure,
    GitHubModels,
}

/// Client for OpenAI-compatible chat completions APIs
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
    /// Model (or Azure deployment) name
    model: String,
    /// Endpoint flavor
    flavor: ApiFlavor,
}

impl std::fmt::Debug for OpenAI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAI")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("flavor", &self.flavor)
            .finish()
    }
}

/// Chat message format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Chat completions request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,
    /// The messages for the conversation
    messages: Vec<ChatMessage>,
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl OpenAIRequest {
    /// Create a new chat completions request
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct OpenAIUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// One completion choice
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: ChatMessage,
}

/// Chat completions response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    pub choices: Vec<OpenAIChoice>,
    pub usage: Option<OpenAIUsage>,
}

impl OpenAI {
    /// Create a new OpenAI client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self::with_flavor(api_key, endpoint, model, timeout_secs, ApiFlavor::OpenAI)
    }

    /// Create a client for an Azure OpenAI deployment
    pub fn azure(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self::with_flavor(api_key, endpoint, model, timeout_secs, ApiFlavor::Azure)
    }

    /// Create a client for the GitHub Models endpoint
    pub fn github_models(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self::with_flavor(
            api_key,
            endpoint,
            model,
            timeout_secs,
            ApiFlavor::GitHubModels,
        )
    }

    fn with_flavor(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
        flavor: ApiFlavor,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            flavor,
        }
    }

    /// The full completions URL for this client's flavor
    fn api_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        match self.flavor {
            ApiFlavor::OpenAI => {
                if base.is_empty() {
                    "https://api.openai.com/v1/chat/completions".to_string()
                } else {
                    format!("{}/v1/chat/completions", base)
                }
            }
            ApiFlavor::Azure => format!(
                "{}/openai/deployments/{}/chat/completions?api-version=2024-02-15-preview",
                base, self.model
            ),
            ApiFlavor::GitHubModels => {
                if base.is_empty() {
                    "https://models.inference.ai.azure.com/chat/completions".to_string()
                } else {
                    format!("{}/chat/completions", base)
                }
            }
        }
    }

    /// Complete a chat request
    pub async fn complete(&self, request: OpenAIRequest) -> Result<OpenAIResponse, ProviderError> {
        let mut builder = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json");
        builder = match self.flavor {
            ApiFlavor::Azure => builder.header("api-key", &self.api_key),
            _ => builder.header("Authorization", format!("Bearer {}", self.api_key)),
        };

        let response = builder
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
            error!("{} API error ({}): {}", self.name(), status, error_text);
            return Err(classify_status(status.as_u16(), error_text));
        }

        response
            .json::<OpenAIResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Extract the completion text from a response
    pub fn extract_text(response: &OpenAIResponse) -> Result<String, ProviderError> {
        response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| ProviderError::ParseError("response contained no choices".to_string()))
    }
}

/// Map an HTTP error status to a provider error kind
pub(crate) fn classify_status(status_code: u16, message: String) -> ProviderError {
    match status_code {
        401 | 403 => ProviderError::AuthenticationError(message),
        429 => ProviderError::RateLimitExceeded(message),
        _ => ProviderError::ApiError {
            status_code,
            message,
        },
    }
}

#[async_trait]
impl TranslationBackend for OpenAI {
    fn name(&self) -> &str {
        match self.flavor {
            ApiFlavor::OpenAI => "openai",
            ApiFlavor::Azure => "azure",
            ApiFlavor::GitHubModels => "github",
        }
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target_language: &str,
        protected_terms: &[String],
    ) -> Result<Vec<String>, ProviderError> {
        let language_name = language_utils::display_name(target_language);
        let request = OpenAIRequest::new(&self.model)
            .add_message(
                "system",
                prompts::build_system_prompt(&language_name, protected_terms),
            )
            .add_message("user", prompts::encode_batch(texts))
            .temperature(0.3);

        let response = self.complete(request).await?;
        let content = Self::extract_text(&response)?;
        prompts::decode_batch(&content, texts.len())
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = OpenAIRequest::new(&self.model)
            .add_message("user", "Reply with OK")
            .max_tokens(10);
        self.complete(request).await?;
        Ok(())
    }
}
