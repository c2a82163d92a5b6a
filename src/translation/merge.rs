/*!
 * Folding item results back into caller documents.
 *
 * The pipeline does not know what it is translating into; documents expose
 * one write path through `TranslationTarget`. Failed items are written
 * through the same path with their source text, so a merged document always
 * has a value for every requested (key, language) pair. Keys and languages
 * outside the result set are never touched.
 */

use super::progress::ItemResult;

/// A document the pipeline can write translations into
pub trait TranslationTarget {
    /// Set the value for one (key, language) pair
    fn apply(&mut self, key: &str, language: &str, value: &str);
}

/// Write every item result into the target document
pub fn apply_results<T: TranslationTarget>(target: &mut T, results: &[ItemResult]) {
    for result in results {
        target.apply(&result.key, &result.target_language, &result.value);
    }
}
