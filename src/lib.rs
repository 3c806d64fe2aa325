/*!
 * # cvetrans - CVE Advisory Translator
 *
 * A Rust library for translating English CVE security advisories into
 * Japanese while preserving document structure and technical identifiers.
 *
 * ## Features
 *
 * - Protect technical terms (CVE ids, advisory ids, products, versions,
 *   URLs, hashes) behind placeholder tokens during translation
 * - Classify blocks so pure identifiers are never sent to translation
 * - Preserve paragraph, run, and table structure 1:1
 * - Replace the advisory's first page with a fixed Japanese template
 * - Batched, bounded-concurrency translation with per-block failure
 *   isolation
 * - Optional embeddings-based quality scoring
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `term_preserver`: Technical-term detection and token substitution
 * - `classifier`: Translatability classification
 * - `document`: Document tree, extraction, and reconstruction:
 *   - `document::model`: The in-memory document tree
 *   - `document::extract`: Block extraction
 *   - `document::first_page`: First-page detection and template insertion
 *   - `document::reconstruct`: Applying results back onto the tree
 * - `translation`: The translation pipeline:
 *   - `translation::core`: Per-block translation service
 *   - `translation::batch`: Batching and bounded concurrency
 *   - `translation::document`: Whole-document coordination
 * - `providers`: Client implementations for translation backends:
 *   - `providers::openai`: OpenAI chat and embeddings clients
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::mock`: Deterministic providers for tests
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod classifier;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod term_preserver;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use classifier::{ClassifierConfig, TextClassifier};
pub use document::{ContentBlock, Document};
pub use errors::{AppError, DocumentError, ProviderError, TranslationError, ValidationError};
pub use language_utils::{get_language_name, language_codes_match, validate_language_code};
pub use term_preserver::{ProtectionMap, TermPreserver};
pub use translation::{BatchTranslator, DocumentTranslator, TranslationService};
