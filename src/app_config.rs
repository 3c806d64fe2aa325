use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use url::Url;

use crate::classifier::ClassifierConfig;
use crate::language_utils;
use crate::providers::RequestParams;
use crate::translation::BatchOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Pipeline settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Quality validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: OpenAI
    #[default]
    OpenAI,
    // @provider: Anthropic
    Anthropic,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type", default)]
    pub provider_type: TranslationProvider,

    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL (optional, defaults to the public API)
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    // @field: Max tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: TranslationProvider::default(),
            model: default_model(),
            api_key: String::new(),
            endpoint: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl ProviderConfig {
    /// Generation parameters derived from this provider configuration
    pub fn request_params(&self) -> RequestParams {
        RequestParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Blocks per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Maximum concurrent provider requests
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Whole-document deadline in seconds; 0 disables the deadline
    #[serde(default)]
    pub document_timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_concurrency: default_max_concurrency(),
            document_timeout_secs: 0,
        }
    }
}

impl TranslationConfig {
    /// Orchestration options derived from this configuration
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            batch_size: self.batch_size,
            max_concurrency: self.max_concurrency,
            document_timeout: if self.document_timeout_secs > 0 {
                Some(std::time::Duration::from_secs(self.document_timeout_secs))
            } else {
                None
            },
        }
    }
}

/// Quality validation configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ValidationConfig {
    /// Whether to score translations with the embeddings validator
    #[serde(default)]
    pub enabled: bool,

    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            embedding_model: default_embedding_model(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
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
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "ja".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_batch_size() -> usize {
    5
}

fn default_max_concurrency() -> usize {
    3
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            provider: ProviderConfig::default(),
            translation: TranslationConfig::default(),
            classifier: ClassifierConfig::default(),
            validation: ValidationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !language_utils::validate_language_code(&self.source_language) {
            return Err(anyhow!(
                "Invalid source language code: {}",
                self.source_language
            ));
        }
        if !language_utils::validate_language_code(&self.target_language) {
            return Err(anyhow!(
                "Invalid target language code: {}",
                self.target_language
            ));
        }
        if self.provider.model.trim().is_empty() {
            return Err(anyhow!("Provider model must not be empty"));
        }
        if !self.provider.endpoint.is_empty() {
            let url = Url::parse(&self.provider.endpoint)
                .map_err(|e| anyhow!("Invalid endpoint URL {}: {}", self.provider.endpoint, e))?;
            if url.host_str().is_none() {
                return Err(anyhow!(
                    "Endpoint URL has no host: {}",
                    self.provider.endpoint
                ));
            }
        }
        if self.translation.batch_size == 0 {
            return Err(anyhow!("batch_size must be at least 1"));
        }
        if self.translation.max_concurrency == 0 {
            return Err(anyhow!("max_concurrency must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.classifier.coverage_threshold) {
            return Err(anyhow!("coverage_threshold must be within [0, 1]"));
        }
        Ok(())
    }
}
