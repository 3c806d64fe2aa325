/*!
 * Provider implementations for translation and validation backends.
 *
 * This module contains client implementations for the external services the
 * pipeline depends on:
 * - OpenAI: chat-completions translation client and embeddings validator
 * - Anthropic: messages API translation client
 * - Mock: deterministic providers for tests
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::{ProviderError, ValidationError};

/// Generation parameters forwarded with every translation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestParams {
    /// Model identifier
    pub model: String,

    /// Sampling temperature. Kept low so identifiers and numbers come back
    /// verbatim.
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.1,
            max_tokens: 4096,
        }
    }
}

/// Common trait for all translation backends
///
/// This trait defines the interface that all translation clients must
/// follow, allowing them to be used interchangeably by the translation
/// service.
#[async_trait]
pub trait TranslationClient: Send + Sync + Debug {
    /// Translate a single protected text under the given system prompt
    ///
    /// # Arguments
    /// * `text` - The protected source text (tokens already in place)
    /// * `system_prompt` - Domain instructions for the model
    /// * `params` - Generation parameters
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The raw translated text or an error
    async fn translate(
        &self,
        text: &str,
        system_prompt: &str,
        params: &RequestParams,
    ) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

/// Trait for semantic quality scoring of a translation
#[async_trait]
pub trait SemanticValidator: Send + Sync + Debug {
    /// Score semantic similarity between source and translation, in [0, 1]
    async fn score(&self, source: &str, translated: &str) -> Result<f32, ValidationError>;
}

pub use self::anthropic::Anthropic;
pub use self::openai::{OpenAi, OpenAiEmbeddings};

pub mod anthropic;
pub mod mock;
pub mod openai;
