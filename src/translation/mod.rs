/*!
 * Translation pipeline for advisory documents.
 *
 * This module contains the translation stages between extraction and
 * reconstruction. It is split into several submodules:
 *
 * - `core`: Per-block translation service (protect, translate, restore, validate)
 * - `batch`: Batching and bounded-concurrency orchestration
 * - `document`: Whole-document coordination
 * - `prompts`: Domain prompt and severity glossary
 * - `stats`: Per-document statistics accumulation
 */

// Re-export main types for easier usage
pub use self::batch::{BatchTranslator, BatchOptions};
pub use self::core::TranslationService;
pub use self::document::DocumentTranslator;
pub use self::prompts::domain_prompt;
pub use self::stats::DocumentStatistics;

// Submodules
pub mod batch;
pub mod core;
pub mod document;
pub mod prompts;
pub mod stats;

use serde::Serialize;

/// Terminal state of one block's trip through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    /// Translated and ready to be applied
    Success,
    /// Translation failed; the original text is kept in the document
    Failed,
    /// Classified non-translatable or empty; left untouched
    Skipped,
}

/// Outcome of translating one content block.
///
/// Every extracted block gets exactly one result, whatever its fate. This is
/// the contract reconstruction and statistics both rely on.
#[derive(Debug, Clone)]
pub struct TranslationResult {
    /// Id of the block this result belongs to
    pub block_id: String,

    /// The block's original text
    pub source_text: String,

    /// Translated text with protected terms restored. Present only on
    /// success.
    pub translated_text: Option<String>,

    /// Number of terms protected before translation
    pub protected_terms: usize,

    /// Semantic similarity score in [0, 1]. Absent when validation was not
    /// configured or failed; never coerced to zero.
    pub quality_score: Option<f32>,

    /// Whether restoration could not place every protection token
    pub partial_restoration: bool,

    pub status: TranslationStatus,

    /// Failure description for failed blocks
    pub error: Option<String>,
}

impl TranslationResult {
    pub fn success(
        block_id: impl Into<String>,
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            source_text: source_text.into(),
            translated_text: Some(translated_text.into()),
            protected_terms: 0,
            quality_score: None,
            partial_restoration: false,
            status: TranslationStatus::Success,
            error: None,
        }
    }

    pub fn failed(
        block_id: impl Into<String>,
        source_text: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            source_text: source_text.into(),
            translated_text: None,
            protected_terms: 0,
            quality_score: None,
            partial_restoration: false,
            status: TranslationStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn skipped(block_id: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            source_text: source_text.into(),
            translated_text: None,
            protected_terms: 0,
            quality_score: None,
            partial_restoration: false,
            status: TranslationStatus::Skipped,
            error: None,
        }
    }

    /// Whether this result carries text to apply to the document
    pub fn is_applied(&self) -> bool {
        self.status == TranslationStatus::Success && self.translated_text.is_some()
    }
}
