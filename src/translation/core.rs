/*!
 * Pipeline entry point.
 *
 * `TranslationPipeline` ties the pieces together: validate the run
 * configuration, group work into per-language batches, execute them under
 * the concurrency cap, aggregate per-item results and report progress.
 * Batch failures never unwind past the scheduler; every failed item falls
 * back to its source text and lands in the run summary instead.
 */

use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::RunConfig;
use crate::errors::{PipelineError, ProviderError};
use crate::providers::TranslationBackend;

use super::batch::{self, Batch, TranslatableItem};
use super::progress::{ItemResult, ProgressCallback, ProgressTracker, RunSummary};
use super::retry::RetryPolicy;
use super::scheduler;

/// Everything a run produces: one result per (item, language) pair plus
/// the aggregate summary
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Results in batch order: grouped by language, then by item order
    pub results: Vec<ItemResult>,
    /// Aggregate counts and itemized errors
    pub summary: RunSummary,
}

/// Batched, concurrency-limited translation pipeline over one backend
pub struct TranslationPipeline {
    backend: Arc<dyn TranslationBackend>,
    config: RunConfig,
}

impl TranslationPipeline {
    /// Create a pipeline over the given backend and run configuration
    pub fn new(backend: Arc<dyn TranslationBackend>, config: RunConfig) -> Self {
        Self { backend, config }
    }

    /// Translate every item into every target language
    ///
    /// Returns `Err` only for invalid configuration, before any network
    /// call. Backend failures are recovered per batch and reported through
    /// the summary; the returned result set always covers the full
    /// items x languages cross product exactly once.
    pub async fn run(
        &self,
        items: &[TranslatableItem],
        target_languages: &[String],
        on_progress: Option<ProgressCallback>,
    ) -> Result<RunOutcome, PipelineError> {
        self.config.validate()?;

        if items.is_empty() {
            debug!("Translation run with no items; nothing to do");
            return Ok(RunOutcome {
                results: Vec::new(),
                summary: RunSummary::default(),
            });
        }

        let languages = batch::dedup_languages(target_languages);
        if languages.is_empty() {
            return Err(PipelineError::InvalidArgument(
                "target language set is empty".to_string(),
            ));
        }

        let batches = batch::group_into_batches(items, &languages, self.config.batch_size)?;
        let total = items.len() * languages.len();
        info!(
            "Translating {} items into {} languages via {} ({} batches, concurrency {})",
            items.len(),
            languages.len(),
            self.backend.name(),
            batches.len(),
            self.config.concurrent_requests
        );

        let tracker = Arc::new(ProgressTracker::new(total, on_progress));
        let retry = RetryPolicy::from_run_config(&self.config);
        let deadline = self.config.request_timeout_secs.map(Duration::from_secs);
        let backend = Arc::clone(&self.backend);
        let protected_terms: Arc<Vec<String>> = Arc::new(self.config.protected_terms.clone());
        let exec_tracker = Arc::clone(&tracker);

        let exec = move |index: usize, batch: Batch| {
            let backend = Arc::clone(&backend);
            let tracker = Arc::clone(&exec_tracker);
            let protected_terms = Arc::clone(&protected_terms);
            async move {
                let outcome =
                    translate_one_batch(&*backend, &batch, &protected_terms, retry, deadline).await;
                aggregate_batch(index, &batch, outcome, &tracker)
            }
        };

        let per_batch =
            scheduler::execute_bounded(batches, self.config.concurrent_requests, exec).await;
        let results: Vec<ItemResult> = per_batch.into_iter().flatten().collect();

        let summary = tracker.summary();
        if summary.failed > 0 {
            warn!(
                "Translation completed with {} errors; affected fields kept original text",
                summary.failed
            );
        } else {
            info!("Translation completed: {} items", summary.succeeded);
        }

        Ok(RunOutcome { results, summary })
    }
}

/// Call the backend for one batch, with optional deadline and retries
async fn translate_one_batch(
    backend: &dyn TranslationBackend,
    batch: &Batch,
    protected_terms: &[String],
    retry: RetryPolicy,
    deadline: Option<Duration>,
) -> Result<Vec<String>, ProviderError> {
    let texts: Vec<String> = batch
        .items
        .iter()
        .map(|item| item.source_text.clone())
        .collect();

    let mut attempt = 0;
    loop {
        attempt += 1;

        let call = backend.translate_batch(&texts, &batch.target_language, protected_terms);
        let result = match deadline {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(inner) => inner,
                Err(_) => Err(ProviderError::Timeout(limit.as_secs())),
            },
            None => call.await,
        };

        // Same-length contract: a short or long response cannot be
        // attributed to items, so it fails the batch like any other error.
        let normalized = result.and_then(|translations| {
            if translations.len() == texts.len() {
                Ok(translations)
            } else {
                Err(ProviderError::ParseError(format!(
                    "expected {} translations, got {}",
                    texts.len(),
                    translations.len()
                )))
            }
        });

        match normalized {
            Ok(translations) => return Ok(translations),
            Err(err) if attempt < retry.max_attempts => {
                warn!(
                    "Batch for {} failed (attempt {}/{}): {}",
                    batch.target_language, attempt, retry.max_attempts, err
                );
                tokio::time::sleep(retry.backoff_delay(attempt)).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Convert one batch outcome into item results, recording progress per item
fn aggregate_batch(
    index: usize,
    batch: &Batch,
    outcome: Result<Vec<String>, ProviderError>,
    tracker: &ProgressTracker,
) -> Vec<ItemResult> {
    match outcome {
        Ok(translations) => batch
            .items
            .iter()
            .zip(translations)
            .map(|(item, value)| {
                let result = ItemResult::success(item, &batch.target_language, value);
                tracker.record(&result);
                result
            })
            .collect(),
        Err(err) => {
            error!(
                "Batch {} ({}) failed: {}; keeping original text for {} items",
                index + 1,
                batch.target_language,
                err,
                batch.items.len()
            );
            let message = err.to_string();
            batch
                .items
                .iter()
                .map(|item| {
                    let result = ItemResult::failed(item, &batch.target_language, message.clone());
                    tracker.record(&result);
                    result
                })
                .collect()
        }
    }
}
