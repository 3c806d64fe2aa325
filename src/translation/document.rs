/*!
 * Whole-document translation coordination.
 *
 * Ties the stages together: extract blocks, classify them, translate in
 * batches, write the results back, and accumulate statistics. The 1:1
 * block-to-result invariant is checked here; a violation aborts the
 * document rather than saving a partially rebuilt artifact.
 */

use std::sync::Arc;

use log::info;

use crate::classifier::{ClassifierConfig, TextClassifier};
use crate::document::{extract_blocks, reconstruct, Document};
use crate::errors::DocumentError;

use super::batch::{BatchOptions, BatchTranslator};
use super::core::TranslationService;
use super::stats::DocumentStatistics;
use super::TranslationResult;

/// Everything a document run produces besides the mutated document itself.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// One result per extracted block, in block order
    pub results: Vec<TranslationResult>,

    /// Counters accumulated from the result set
    pub statistics: DocumentStatistics,
}

/// Translates whole documents in place.
pub struct DocumentTranslator {
    batch: BatchTranslator,
    classifier: TextClassifier,
}

impl DocumentTranslator {
    pub fn new(
        service: Arc<TranslationService>,
        options: BatchOptions,
        classifier_config: ClassifierConfig,
    ) -> Self {
        Self {
            batch: BatchTranslator::new(service, options),
            classifier: TextClassifier::new(classifier_config),
        }
    }

    /// Wrap an already-configured batch translator (for progress reporting).
    pub fn with_batch(batch: BatchTranslator, classifier_config: ClassifierConfig) -> Self {
        Self {
            batch,
            classifier: TextClassifier::new(classifier_config),
        }
    }

    /// Translate the document in place and return the per-block outcome.
    pub async fn translate_document(
        &self,
        document: &mut Document,
    ) -> Result<DocumentOutcome, DocumentError> {
        let mut extracted = extract_blocks(document)?;

        for block in &mut extracted.blocks {
            block.translatable = !block.is_empty && self.classifier.is_translatable(&block.text);
        }
        let translatable = extracted.blocks.iter().filter(|b| b.translatable).count();
        info!(
            "Classified {} of {} blocks as translatable",
            translatable,
            extracted.blocks.len()
        );

        let results = self.batch.translate_blocks(&extracted.blocks).await;
        if results.len() != extracted.blocks.len() {
            return Err(DocumentError::StructuralIntegrity(format!(
                "{} blocks extracted but {} results produced",
                extracted.blocks.len(),
                results.len()
            )));
        }

        reconstruct(document, &extracted, &results)?;

        let statistics = DocumentStatistics::from_results(&results);
        info!("Document complete: {}", statistics.summary());

        Ok(DocumentOutcome {
            results,
            statistics,
        })
    }
}
