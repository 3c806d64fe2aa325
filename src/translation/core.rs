/*!
 * Per-block translation service.
 *
 * Each block moves through protect, translate, restore, and validate. Any
 * failure along the way produces a failed result for that block alone; the
 * caller decides what to do with the rest of the batch.
 */

use std::sync::Arc;

use log::{debug, warn};

use crate::document::ContentBlock;
use crate::errors::TranslationError;
use crate::providers::{RequestParams, SemanticValidator, TranslationClient};
use crate::term_preserver::TermPreserver;

use super::{prompts, TranslationResult};

/// Service for translating individual content blocks.
///
/// Holds the injected backend clients; carries no global state, so one
/// instance can be shared across concurrent workers behind an `Arc`.
#[derive(Clone)]
pub struct TranslationService {
    client: Arc<dyn TranslationClient>,
    validator: Option<Arc<dyn SemanticValidator>>,
    preserver: TermPreserver,
    params: RequestParams,
    system_prompt: String,
}

impl TranslationService {
    /// Create a new translation service around a backend client.
    pub fn new(client: Arc<dyn TranslationClient>, params: RequestParams) -> Self {
        Self {
            client,
            validator: None,
            preserver: TermPreserver::new(),
            params,
            system_prompt: prompts::domain_prompt(),
        }
    }

    /// Attach a semantic validator. Scoring failures are non-fatal; the
    /// block's quality is simply recorded as absent.
    pub fn with_validator(mut self, validator: Arc<dyn SemanticValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Verify the backend is reachable.
    pub async fn test_connection(&self) -> Result<(), crate::errors::ProviderError> {
        self.client.test_connection().await
    }

    /// Translate one block: protect terms, call the backend, restore terms,
    /// and optionally score the result.
    ///
    /// Blocks holding a bare severity rating are mapped through the fixed
    /// glossary without a backend call. Never returns an error: failures are
    /// folded into the result so the rest of the batch is unaffected.
    pub async fn translate_block(&self, block: &ContentBlock) -> TranslationResult {
        if !block.translatable {
            return TranslationResult::skipped(block.id.clone(), block.text.clone());
        }

        if let Some(rating) = prompts::severity_ja(block.text.trim()) {
            debug!("Block {}: severity rating mapped via glossary", block.id);
            return TranslationResult::success(block.id.clone(), block.text.clone(), rating);
        }

        let (protected, map) = self.preserver.protect(&block.text);
        debug!(
            "Block {}: {} terms protected before translation",
            block.id,
            map.len()
        );

        let raw = match self
            .client
            .translate(&protected, &self.system_prompt, &self.params)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                let err = TranslationError::Provider(e);
                warn!("Block {} failed: {err}", block.id);
                let mut result =
                    TranslationResult::failed(block.id.clone(), block.text.clone(), err.to_string());
                result.protected_terms = map.len();
                return result;
            }
        };

        if raw.trim().is_empty() {
            let err = TranslationError::EmptyResponse;
            warn!("Block {} failed: {err}", block.id);
            let mut result =
                TranslationResult::failed(block.id.clone(), block.text.clone(), err.to_string());
            result.protected_terms = map.len();
            return result;
        }

        let restoration = self.preserver.restore(&raw, &map);
        if restoration.is_partial() {
            warn!(
                "Block {}: {} protection tokens missing from translation",
                block.id,
                restoration.missing_tokens.len()
            );
        }

        let mut result = TranslationResult::success(
            block.id.clone(),
            block.text.clone(),
            restoration.text.clone(),
        );
        result.protected_terms = map.len();
        result.partial_restoration = restoration.is_partial();

        if let Some(validator) = &self.validator {
            match validator.score(&block.text, &restoration.text).await {
                Ok(score) => result.quality_score = Some(score),
                Err(e) => {
                    warn!("Block {}: validation failed, quality not recorded: {e}", block.id);
                }
            }
        }

        result
    }
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService")
            .field("params", &self.params)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}
