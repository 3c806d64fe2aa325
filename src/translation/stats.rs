/*!
 * Per-document translation statistics.
 *
 * Accumulated in a single pass over the result set after all workers have
 * joined; counters are never updated concurrently.
 */

use serde::Serialize;

use super::{TranslationResult, TranslationStatus};

/// Summary counters for one document run. Reset per document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentStatistics {
    /// Blocks extracted from the document
    pub total_blocks: usize,

    /// Blocks translated and applied
    pub translated: usize,

    /// Blocks skipped by classification (including empty paragraphs)
    pub skipped: usize,

    /// Blocks that failed translation and kept their source text
    pub failed: usize,

    /// Total terms protected across all blocks
    pub preserved_terms: usize,

    /// Blocks where restoration could not place every token
    pub partial_restorations: usize,

    /// Mean quality score over blocks that were scored. Absent when nothing
    /// was scored.
    pub average_quality: Option<f32>,
}

impl DocumentStatistics {
    /// Accumulate statistics from a complete result set.
    pub fn from_results(results: &[TranslationResult]) -> Self {
        let mut stats = Self {
            total_blocks: results.len(),
            ..Self::default()
        };

        let mut quality_sum = 0.0f32;
        let mut quality_count = 0usize;

        for result in results {
            match result.status {
                TranslationStatus::Success => stats.translated += 1,
                TranslationStatus::Failed => stats.failed += 1,
                TranslationStatus::Skipped => stats.skipped += 1,
            }
            stats.preserved_terms += result.protected_terms;
            if result.partial_restoration {
                stats.partial_restorations += 1;
            }
            if let Some(score) = result.quality_score {
                quality_sum += score;
                quality_count += 1;
            }
        }

        if quality_count > 0 {
            stats.average_quality = Some(quality_sum / quality_count as f32);
        }
        stats
    }

    /// Human-readable one-line summary for logs and CLI output.
    pub fn summary(&self) -> String {
        let quality = match self.average_quality {
            Some(q) => format!("{q:.2}"),
            None => "n/a".to_string(),
        };
        format!(
            "{} blocks: {} translated, {} skipped, {} failed | {} terms preserved, {} partial restorations | avg quality {}",
            self.total_blocks,
            self.translated,
            self.skipped,
            self.failed,
            self.preserved_terms,
            self.partial_restorations,
            quality
        )
    }
}
