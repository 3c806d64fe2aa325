/*!
 * Batched, bounded-concurrency translation orchestration.
 *
 * Blocks are grouped into fixed-size batches and dispatched concurrently,
 * with a semaphore capping in-flight provider requests across the whole
 * document. One block failing never aborts its batch; a document deadline
 * marks whatever has not finished as failed and lets reconstruction proceed
 * with the results that did.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::{stream, StreamExt};
use log::{debug, info, warn};
use tokio::sync::Semaphore;

use crate::document::ContentBlock;
use crate::errors::TranslationError;

use super::core::TranslationService;
use super::TranslationResult;

/// Default number of blocks per batch
const DEFAULT_BATCH_SIZE: usize = 5;

/// Default cap on concurrent provider requests
const DEFAULT_MAX_CONCURRENCY: usize = 3;

/// Orchestration knobs.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Blocks per batch
    pub batch_size: usize,

    /// Maximum in-flight provider requests across the document
    pub max_concurrency: usize,

    /// Overall deadline for the document. Blocks unfinished at the deadline
    /// are marked failed.
    pub document_timeout: Option<Duration>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            document_timeout: None,
        }
    }
}

/// Progress callback: (completed blocks, total blocks)
pub type ProgressFn = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Translates a block sequence in batches with bounded concurrency.
pub struct BatchTranslator {
    service: Arc<TranslationService>,
    options: BatchOptions,
    progress: Option<ProgressFn>,
}

impl BatchTranslator {
    pub fn new(service: Arc<TranslationService>, options: BatchOptions) -> Self {
        Self {
            service,
            options,
            progress: None,
        }
    }

    /// Register a callback invoked after every completed block.
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Translate all blocks and return one result per block, in block order.
    ///
    /// Never returns an error: per-block failures and deadline expiry are
    /// folded into the individual results.
    pub async fn translate_blocks(&self, blocks: &[ContentBlock]) -> Vec<TranslationResult> {
        if blocks.is_empty() {
            return Vec::new();
        }

        let total = blocks.len();
        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrency.max(1)));
        let completed: Arc<Mutex<HashMap<String, TranslationResult>>> =
            Arc::new(Mutex::new(HashMap::with_capacity(total)));

        info!(
            "Translating {} blocks in batches of {} with {} workers",
            total,
            self.options.batch_size.max(1),
            self.options.max_concurrency.max(1)
        );

        let run = async {
            for (batch_index, batch) in blocks.chunks(self.options.batch_size.max(1)).enumerate() {
                debug!("Dispatching batch {} ({} blocks)", batch_index, batch.len());

                stream::iter(batch.iter().map(|block| {
                    let semaphore = Arc::clone(&semaphore);
                    let completed = Arc::clone(&completed);
                    let service = Arc::clone(&self.service);
                    async move {
                        // The semaphore is never closed, so acquisition only
                        // fails if the runtime is shutting down.
                        let _permit = semaphore.acquire().await.ok();
                        let result = service.translate_block(block).await;
                        if let Ok(mut done) = completed.lock() {
                            done.insert(result.block_id.clone(), result);
                            if let Some(progress) = &self.progress {
                                progress(done.len(), total);
                            }
                        }
                    }
                }))
                .buffer_unordered(self.options.max_concurrency.max(1))
                .collect::<Vec<()>>()
                .await;
            }
        };

        match self.options.document_timeout {
            Some(deadline) => {
                if tokio::time::timeout(deadline, run).await.is_err() {
                    warn!("Document deadline of {deadline:?} expired with blocks outstanding");
                }
            }
            None => run.await,
        }

        // Reassemble in block order. Anything missing ran out of time.
        let mut done = completed.lock().map(|g| g.clone()).unwrap_or_default();
        blocks
            .iter()
            .map(|block| {
                done.remove(&block.id).unwrap_or_else(|| {
                    TranslationResult::failed(
                        block.id.clone(),
                        block.text.clone(),
                        TranslationError::Timeout.to_string(),
                    )
                })
            })
            .collect()
    }
}
