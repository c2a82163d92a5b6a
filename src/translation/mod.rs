/*!
 * Translation pipeline for localization metadata using AI providers.
 *
 * This module contains the core functionality for fanning short-text
 * translation requests out to an LLM backend. It is split into several
 * submodules:
 *
 * - `core`: Pipeline entry point, validation and result aggregation
 * - `batch`: Work item and batch types, batch grouping
 * - `scheduler`: Bounded-concurrency batch execution
 * - `progress`: Progress reporting and run summaries
 * - `retry`: Pluggable retry policy for failed batch calls
 * - `merge`: Folding results back into caller documents
 * - `prompts`: Prompt construction and batch marker encoding
 */

// Re-export main types for easier usage
pub use self::batch::{Batch, TranslatableItem};
pub use self::core::{RunOutcome, TranslationPipeline};
pub use self::merge::TranslationTarget;
pub use self::progress::{ItemResult, ItemStatus, ProgressCallback, RunProgress, RunSummary};
pub use self::retry::RetryPolicy;

// Submodules
pub mod batch;
pub mod core;
pub mod merge;
pub mod progress;
pub mod prompts;
pub mod retry;
pub mod scheduler;
