/*!
 * Error types for the cvetrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while translating a single content block.
///
/// These are always recorded per block and never abort the batch or the
/// document; the block is marked failed and its source text is kept.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Provider returned an empty or unusable response
    #[error("Provider returned empty response")]
    EmptyResponse,

    /// The overall document deadline expired before this block completed
    #[error("Document timeout expired before block was translated")]
    Timeout,
}

/// Errors from the semantic validation adapter.
///
/// Non-fatal: the block is still counted as translated and its quality
/// score is recorded as absent rather than zero.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Error from the embedding provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Scoring produced an unusable value
    #[error("Scoring failed: {0}")]
    ScoringFailed(String),
}

/// Errors that can occur during document extraction or reconstruction
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Extraction/reconstruction cannot establish a 1:1 block-to-element
    /// mapping. Fatal: the whole document operation aborts and no partial
    /// document is returned.
    #[error("Structural integrity violation: {0}")]
    StructuralIntegrity(String),

    /// A translation result references a block id that was never extracted
    #[error("Unknown block id in results: {0}")]
    UnknownBlock(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from document processing
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::File(error.to_string())
    }
}
