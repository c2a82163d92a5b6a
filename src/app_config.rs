use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::PipelineError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.

/// Minimum number of concurrent batch requests
pub const MIN_CONCURRENT_REQUESTS: usize = 1;
/// Maximum number of concurrent batch requests
pub const MAX_CONCURRENT_REQUESTS: usize = 10;
/// Minimum number of texts per batch
pub const MIN_TEXTS_PER_BATCH: usize = 1;
/// Maximum number of texts per batch
pub const MAX_TEXTS_PER_BATCH: usize = 30;

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    /// OpenAI chat completions API
    #[default]
    OpenAI,
    /// Anthropic messages API
    Anthropic,
    /// Google Gemini generateContent API
    Gemini,
    /// Azure OpenAI deployment (OpenAI-compatible)
    Azure,
    /// GitHub Models endpoint (OpenAI-compatible)
    #[serde(rename = "github")]
    GitHubModels,
}

impl TranslationProvider {
    /// Capitalized provider name for display
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Gemini => "Gemini",
            Self::Azure => "Azure OpenAI",
            Self::GitHubModels => "GitHub Models",
        }
    }

    /// Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::Gemini => "gemini".to_string(),
            Self::Azure => "azure".to_string(),
            Self::GitHubModels => "github".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "gemini" => Ok(Self::Gemini),
            "azure" => Ok(Self::Azure),
            "github" | "githubmodels" => Ok(Self::GitHubModels),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Per-provider connection configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    /// Model name
    #[serde(default = "String::new")]
    pub model: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL; empty means the provider's public endpoint
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Provider config with per-provider default model and endpoint
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Gemini => Self {
                provider_type: "gemini".to_string(),
                model: default_gemini_model(),
                api_key: String::new(),
                endpoint: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Azure => Self {
                provider_type: "azure".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::GitHubModels => Self {
                provider_type: "github".to_string(),
                model: default_github_model(),
                api_key: String::new(),
                endpoint: default_github_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Configuration for one translation run
///
/// The pipeline reads only this struct; it never consults ambient state,
/// so runs are reproducible functions of their explicit inputs.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RunConfig {
    /// Maximum number of concurrent batch requests (1-10)
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Number of texts grouped into one backend call (1-30)
    #[serde(default = "default_texts_per_batch")]
    pub batch_size: usize,

    /// Terms the model must leave unchanged in its output
    #[serde(default)]
    pub protected_terms: Vec<String>,

    /// Number of retries after a failed batch call (0 = single attempt)
    #[serde(default)]
    pub retry_count: u32,

    /// Base backoff in milliseconds for exponential retry backoff
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Per-call deadline in seconds; None preserves the no-timeout behavior
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrent_requests: default_concurrent_requests(),
            batch_size: default_texts_per_batch(),
            protected_terms: Vec::new(),
            retry_count: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
            request_timeout_secs: None,
        }
    }
}

impl RunConfig {
    /// Validate the run configuration before any network call is made
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.concurrent_requests < MIN_CONCURRENT_REQUESTS
            || self.concurrent_requests > MAX_CONCURRENT_REQUESTS
        {
            return Err(PipelineError::InvalidArgument(format!(
                "concurrent_requests must be between {} and {}, got {}",
                MIN_CONCURRENT_REQUESTS, MAX_CONCURRENT_REQUESTS, self.concurrent_requests
            )));
        }
        if self.batch_size < MIN_TEXTS_PER_BATCH || self.batch_size > MAX_TEXTS_PER_BATCH {
            return Err(PipelineError::InvalidArgument(format!(
                "batch_size must be between {} and {}, got {}",
                MIN_TEXTS_PER_BATCH, MAX_TEXTS_PER_BATCH, self.batch_size
            )));
        }
        Ok(())
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language codes to translate to
    #[serde(default)]
    pub target_languages: Vec<String>,

    /// Active translation provider
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Connection settings for each configured provider
    #[serde(default = "default_available_providers")]
    pub available_providers: Vec<ProviderConfig>,

    /// Pipeline run settings
    #[serde(default)]
    pub run: RunConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_languages: Vec::new(),
            provider: TranslationProvider::default(),
            available_providers: default_available_providers(),
            run: RunConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.as_ref().display(), e))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file: {}", e))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.as_ref().display(), e))?;
        Ok(())
    }

    /// Load from file, creating a default config file if none exists
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.to_file(path)?;
            Ok(config)
        }
    }

    /// Connection settings for the active provider
    pub fn active_provider_config(&self) -> Result<&ProviderConfig> {
        let wanted = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == wanted)
            .ok_or_else(|| anyhow!("No provider config for '{}'", wanted))
    }

    /// Model name for the active provider
    pub fn get_model(&self) -> String {
        self.active_provider_config()
            .map(|p| p.model.clone())
            .unwrap_or_default()
    }

    /// API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        self.active_provider_config()
            .map(|p| p.endpoint.clone())
            .unwrap_or_default()
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_concurrent_requests() -> usize {
    3
}

fn default_texts_per_batch() -> usize {
    10
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_github_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_github_endpoint() -> String {
    "https://models.inference.ai.azure.com".to_string()
}

fn default_available_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(TranslationProvider::OpenAI),
        ProviderConfig::new(TranslationProvider::Anthropic),
        ProviderConfig::new(TranslationProvider::Gemini),
        ProviderConfig::new(TranslationProvider::Azure),
        ProviderConfig::new(TranslationProvider::GitHubModels),
    ]
}
