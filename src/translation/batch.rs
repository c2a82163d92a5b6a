/*!
 * Work items and batch grouping.
 *
 * A run translates a flat list of items into one or more target languages.
 * The grouper partitions that cross product into batches: per-language
 * chunks of at most `batch_size` items, each the unit of one backend call.
 * Batches never mix languages because the system prompt is per-language.
 */

use crate::errors::PipelineError;

/// One translatable unit of work, identified by its document key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableItem {
    /// Unique key within the source document
    pub key: String,
    /// Source-language text to translate
    pub source_text: String,
}

impl TranslatableItem {
    /// Create a new work item
    pub fn new(key: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source_text: source_text.into(),
        }
    }
}

/// An ordered group of same-language items sent in one backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Target language shared by every item in the batch
    pub target_language: String,
    /// Items in source order, at most `batch_size` of them
    pub items: Vec<TranslatableItem>,
}

/// Drop duplicate language codes, keeping first-occurrence order
pub fn dedup_languages(target_languages: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for lang in target_languages {
        if !seen.contains(lang) {
            seen.push(lang.clone());
        }
    }
    seen
}

/// Partition items x languages into per-language batches
///
/// Grouping is deterministic: languages in first-occurrence order, items in
/// input order, chunked by `batch_size`. An empty item list yields an empty
/// batch list. A zero batch size is a caller bug and fails fast.
pub fn group_into_batches(
    items: &[TranslatableItem],
    target_languages: &[String],
    batch_size: usize,
) -> Result<Vec<Batch>, PipelineError> {
    if batch_size == 0 {
        return Err(PipelineError::InvalidArgument(
            "batch_size must be a positive integer".to_string(),
        ));
    }

    let languages = dedup_languages(target_languages);
    let mut batches = Vec::new();
    for language in &languages {
        for chunk in items.chunks(batch_size) {
            batches.push(Batch {
                target_language: language.clone(),
                items: chunk.to_vec(),
            });
        }
    }
    Ok(batches)
}
