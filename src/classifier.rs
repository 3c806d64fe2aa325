/*!
 * Translatability classification for content blocks.
 *
 * Decides, per text block, whether it carries translatable prose or is a
 * pure technical label (a lone CVE id, a bare version number). The decision
 * is driven by the protected-term coverage ratio computed from the term
 * preserver's detectors.
 */

use serde::{Deserialize, Serialize};

use crate::term_preserver::TermPreserver;

/// Default coverage ratio above which a block is treated as a technical
/// label and passed through untranslated.
const DEFAULT_COVERAGE_THRESHOLD: f32 = 0.5;

/// Looser threshold used by the enhanced policy, so short technical-adjacent
/// labels are not skipped entirely.
const ENHANCED_COVERAGE_THRESHOLD: f32 = 0.3;

/// Blocks with fewer non-whitespace characters than this are never sent to
/// translation.
const MIN_CONTENT_CHARS: usize = 3;

/// Classifier tuning knobs.
///
/// The coverage threshold is deliberately a configuration value, not a
/// constant: 0.5 (strict) and 0.3 (enhanced) are both supported behaviors
/// reproducible by changing this one parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierConfig {
    /// Protected-term coverage ratio at or above which a block is
    /// classified non-translatable.
    #[serde(default = "default_coverage_threshold")]
    pub coverage_threshold: f32,
}

fn default_coverage_threshold() -> f32 {
    DEFAULT_COVERAGE_THRESHOLD
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            coverage_threshold: DEFAULT_COVERAGE_THRESHOLD,
        }
    }
}

impl ClassifierConfig {
    /// The enhanced policy: threshold loosened to 0.3.
    pub fn enhanced() -> Self {
        Self {
            coverage_threshold: ENHANCED_COVERAGE_THRESHOLD,
        }
    }
}

/// Decides whether a block's text should be sent to translation.
#[derive(Debug, Clone)]
pub struct TextClassifier {
    preserver: TermPreserver,
    config: ClassifierConfig,
}

impl TextClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            preserver: TermPreserver::new(),
            config,
        }
    }

    /// The configured coverage threshold.
    pub fn coverage_threshold(&self) -> f32 {
        self.config.coverage_threshold
    }

    /// Protected-term coverage ratio: characters matched by the term
    /// detectors over non-whitespace characters in the block.
    pub fn coverage_ratio(&self, text: &str) -> f32 {
        let content_chars = text.chars().filter(|c| !c.is_whitespace()).count();
        if content_chars == 0 {
            return 0.0;
        }
        let protected_chars = self.preserver.coverage(text);
        protected_chars as f32 / content_chars as f32
    }

    /// Classify a block as translatable prose or a pass-through label.
    ///
    /// Rules, in order:
    /// - empty or near-empty blocks are never translatable
    /// - blocks without any alphabetic content (bare numbers, punctuation)
    ///   are never translatable, regardless of coverage
    /// - coverage ratio at or above the threshold marks the block as a
    ///   technical label
    pub fn is_translatable(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.chars().filter(|c| !c.is_whitespace()).count() < MIN_CONTENT_CHARS {
            return false;
        }

        if !trimmed.chars().any(|c| c.is_alphabetic()) {
            return false;
        }

        self.coverage_ratio(trimmed) < self.config.coverage_threshold
    }
}

impl Default for TextClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
