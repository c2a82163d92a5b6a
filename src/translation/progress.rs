/*!
 * Progress reporting and run summaries.
 *
 * Batches complete concurrently, so the tracker applies each item's counter
 * increment and callback invocation under one lock. The caller-supplied
 * callback runs inside a panic guard: an observer bug must not be able to
 * abort a translation run.
 */

use log::warn;
use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use super::batch::TranslatableItem;

/// Outcome of one (item, language) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Success,
    Failed,
}

/// Result produced exactly once per (item, language) pair per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    /// The item's document key
    pub key: String,
    /// Language this result is for
    pub target_language: String,
    /// Whether the backend call for this item succeeded
    pub status: ItemStatus,
    /// Translated text, or the source text when the item failed
    pub value: String,
    /// Backend error message for failed items
    pub error_message: Option<String>,
}

impl ItemResult {
    /// A successful translation for an item
    pub fn success(item: &TranslatableItem, target_language: &str, value: String) -> Self {
        Self {
            key: item.key.clone(),
            target_language: target_language.to_string(),
            status: ItemStatus::Success,
            value,
            error_message: None,
        }
    }

    /// A failed item, falling back to its source text
    pub fn failed(item: &TranslatableItem, target_language: &str, error_message: String) -> Self {
        Self {
            key: item.key.clone(),
            target_language: target_language.to_string(),
            status: ItemStatus::Failed,
            value: item.source_text.clone(),
            error_message: Some(error_message),
        }
    }
}

/// Snapshot passed to the progress callback after each completed item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunProgress {
    /// Completed items so far, monotonically non-decreasing
    pub current: usize,
    /// Fixed at run start: items x languages
    pub total: usize,
    /// Short human label, e.g. "fr: description (3/12)"
    pub current_label: String,
    /// Backend error message when this item failed
    pub error: Option<String>,
}

/// One entry in the run's error list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    pub key: String,
    pub target_language: String,
    pub message: String,
}

/// Success/failure tally for one language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageTally {
    pub succeeded: usize,
    pub failed: usize,
}

/// Aggregate of all item results for one run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Total (item, language) pairs in the run
    pub total: usize,
    /// Items translated successfully
    pub succeeded: usize,
    /// Items that fell back to their source text
    pub failed: usize,
    /// Tallies per target language
    pub per_language: BTreeMap<String, LanguageTally>,
    /// Itemized failures
    pub errors: Vec<RunError>,
}

impl RunSummary {
    /// Completed with at least one error but not total failure
    pub fn is_partial_failure(&self) -> bool {
        self.failed > 0 && self.succeeded > 0
    }

    /// Every single item failed
    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.failed == self.total
    }
}

/// Callback invoked synchronously after each completed item
pub type ProgressCallback = Arc<dyn Fn(RunProgress) + Send + Sync>;

struct TrackerState {
    current: usize,
    summary: RunSummary,
}

/// Single-writer aggregator shared by all in-flight batch tasks
pub struct ProgressTracker {
    total: usize,
    state: StdMutex<TrackerState>,
    callback: Option<ProgressCallback>,
}

impl ProgressTracker {
    /// Create a tracker for a run of `total` (item, language) pairs
    pub fn new(total: usize, callback: Option<ProgressCallback>) -> Self {
        Self {
            total,
            state: StdMutex::new(TrackerState {
                current: 0,
                summary: RunSummary {
                    total,
                    ..RunSummary::default()
                },
            }),
            callback,
        }
    }

    /// Record one completed item and notify the observer
    ///
    /// Counter update, summary update and callback all happen under the
    /// lock so observers see a monotonic `current` with no lost updates.
    pub fn record(&self, result: &ItemResult) {
        let mut state = self.state.lock().unwrap();
        state.current += 1;
        let current = state.current;

        let tally = state
            .summary
            .per_language
            .entry(result.target_language.clone())
            .or_default();
        match result.status {
            ItemStatus::Success => {
                tally.succeeded += 1;
                state.summary.succeeded += 1;
            }
            ItemStatus::Failed => {
                tally.failed += 1;
                state.summary.failed += 1;
                state.summary.errors.push(RunError {
                    key: result.key.clone(),
                    target_language: result.target_language.clone(),
                    message: result
                        .error_message
                        .clone()
                        .unwrap_or_else(|| "unknown error".to_string()),
                });
            }
        }

        if let Some(callback) = &self.callback {
            let progress = RunProgress {
                current,
                total: self.total,
                current_label: format!(
                    "{}: {} ({}/{})",
                    result.target_language, result.key, current, self.total
                ),
                error: result.error_message.clone(),
            };
            let guarded = catch_unwind(AssertUnwindSafe(|| callback(progress)));
            if guarded.is_err() {
                warn!("Progress callback panicked; continuing translation run");
            }
        }
    }

    /// Snapshot of the summary so far
    pub fn summary(&self) -> RunSummary {
        self.state.lock().unwrap().summary.clone()
    }
}
