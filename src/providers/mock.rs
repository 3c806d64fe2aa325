/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock clients that simulate different backend
 * behaviors:
 * - `MockTranslator::working()` - Always succeeds, tokens preserved
 * - `MockTranslator::failing()` - Always fails with an error
 * - `MockTranslator::failing_when(..)` - Fails for matching inputs only
 * - `MockTranslator::intermittent(..)` - Fails every Nth request
 * - `MockTranslator::scripted(..)` - Returns a fixed response
 * - `MockTranslator::token_dropping()` - Drops the first protection token
 * - `MockTranslator::empty()` - Returns empty responses
 * - `MockTranslator::slow(..)` - Delays, for timeout testing
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{ProviderError, ValidationError};
use crate::providers::{RequestParams, SemanticValidator, TranslationClient};

/// Behavior mode for the mock translator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, echoing the input with a translation prefix
    Working,
    /// Always fails with an API error
    Failing,
    /// Fails only when the input contains the given fragment
    FailingWhen(String),
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Returns the same fixed response for every request
    Scripted(String),
    /// Succeeds but drops the first protection token from the output
    TokenDropping,
    /// Returns an empty response
    Empty,
    /// Simulates a slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock translation client for testing pipeline behavior
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails only for inputs containing `fragment`
    pub fn failing_when(fragment: impl Into<String>) -> Self {
        Self::new(MockBehavior::FailingWhen(fragment.into()))
    }

    /// Create an intermittently failing mock
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a mock that returns the same response for every request
    pub fn scripted(response: impl Into<String>) -> Self {
        Self::new(MockBehavior::Scripted(response.into()))
    }

    /// Create a mock that drops the first `[KEEP:NNNN]` token
    pub fn token_dropping() -> Self {
        Self::new(MockBehavior::TokenDropping)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a slow mock for timeout testing
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of translate calls received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationClient for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _system_prompt: &str,
        _params: &RequestParams,
    ) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working => Ok(format!("翻訳済み: {text}")),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::FailingWhen(fragment) => {
                if text.contains(fragment.as_str()) {
                    Err(ProviderError::ApiError {
                        status_code: 500,
                        message: format!("Simulated failure for input containing '{fragment}'"),
                    })
                } else {
                    Ok(format!("翻訳済み: {text}"))
                }
            }

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(format!("翻訳済み: {text}"))
                }
            }

            MockBehavior::Scripted(response) => Ok(response.clone()),

            MockBehavior::TokenDropping => {
                let mut out = format!("翻訳済み: {text}");
                if let Some(start) = out.find("[KEEP:") {
                    if let Some(len) = out[start..].find(']') {
                        out.replace_range(start..start + len + 1, "");
                    }
                }
                Ok(out)
            }

            MockBehavior::Empty => Ok(String::new()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(format!("翻訳済み: {text}"))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Mock validator returning a fixed score, or failing
#[derive(Debug)]
pub struct MockScorer {
    score: Option<f32>,
}

impl MockScorer {
    /// Always return the given score
    pub fn fixed(score: f32) -> Self {
        Self { score: Some(score) }
    }

    /// Always fail scoring
    pub fn failing() -> Self {
        Self { score: None }
    }
}

#[async_trait]
impl SemanticValidator for MockScorer {
    async fn score(&self, _source: &str, _translated: &str) -> Result<f32, ValidationError> {
        match self.score {
            Some(score) => Ok(score),
            None => Err(ValidationError::ScoringFailed(
                "Simulated scoring failure".to_string(),
            )),
        }
    }
}
