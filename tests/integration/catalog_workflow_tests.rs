/*!
 * End-to-end catalog translation tests
 *
 * Runs the full library flow a caller would use: parse a catalog, find
 * missing translations, run the pipeline over a backend, merge results
 * and serialize the updated catalog.
 */

use std::sync::Arc;

use locforge::app_config::RunConfig;
use locforge::providers::mock::MockBackend;
use locforge::translation::merge::apply_results;
use locforge::translation::{ItemStatus, TranslatableItem, TranslationPipeline};
use locforge::xcstrings::XCStringsDocument;

use crate::common::{create_temp_dir, recording_callback, SAMPLE_CATALOG};
use locforge::file_utils::FileManager;

fn items_missing(doc: &XCStringsDocument, language: &str) -> Vec<TranslatableItem> {
    doc.missing_translations(&[language.to_string()])
        .into_iter()
        .filter(|m| m.missing_languages.iter().any(|l| l == language))
        .map(|m| TranslatableItem::new(m.key, m.source_text))
        .collect()
}

#[tokio::test]
async fn test_catalog_workflow_shouldFillOnlyMissingEntries() {
    let mut doc = XCStringsDocument::parse(SAMPLE_CATALOG).unwrap();

    // "greeting" already has fr; only the other two keys need work
    let items = items_missing(&doc, "fr");
    let keys: Vec<&str> = items.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, vec!["farewell", "welcome_message"]);

    let backend = Arc::new(MockBackend::working());
    let pipeline = TranslationPipeline::new(backend, RunConfig::default());
    let outcome = pipeline
        .run(&items, &["fr".to_string()], None)
        .await
        .unwrap();
    apply_results(&mut doc, &outcome.results);

    // Pre-existing translation untouched, gaps filled by the backend
    assert_eq!(doc.translation("greeting", "fr"), Some("Bonjour"));
    assert_eq!(doc.translation("farewell", "fr"), Some("[fr] Goodbye"));
    assert_eq!(doc.translation("welcome_message", "fr"), Some("[fr] Welcome back!"));
    assert!(doc.missing_translations(&["fr".to_string()]).is_empty());
}

#[tokio::test]
async fn test_catalog_workflow_withPartialFailure_shouldKeepSourceTextAndReport() {
    let mut doc = XCStringsDocument::parse(SAMPLE_CATALOG).unwrap();
    let items = items_missing(&doc, "fr");
    assert_eq!(items.len(), 2);

    // One item per batch, every second backend call fails: exactly one of
    // the two entries falls back to its source text
    let backend = Arc::new(MockBackend::intermittent(2));
    let config = RunConfig {
        concurrent_requests: 2,
        batch_size: 1,
        ..RunConfig::default()
    };
    let pipeline = TranslationPipeline::new(backend, config);
    let (callback, updates) = recording_callback();

    let outcome = pipeline
        .run(&items, &["fr".to_string()], Some(callback))
        .await
        .unwrap();
    apply_results(&mut doc, &outcome.results);

    assert_eq!(outcome.summary.total, 2);
    assert_eq!(outcome.summary.succeeded, 1);
    assert_eq!(outcome.summary.failed, 1);
    assert!(outcome.summary.is_partial_failure());
    assert_eq!(outcome.summary.errors.len(), 1);

    // Both entries got a value; the failed one carries its source text
    for result in &outcome.results {
        let stored = doc.translation(&result.key, "fr").unwrap();
        match result.status {
            ItemStatus::Success => assert!(stored.starts_with("[fr] ")),
            ItemStatus::Failed => assert_eq!(stored, result.value),
        }
    }

    // Progress reached the total exactly once per item
    let updates = updates.lock().unwrap();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates.last().unwrap().current, 2);
}

#[tokio::test]
async fn test_catalog_workflow_shouldPersistDeterministicOutputFile() {
    let dir = create_temp_dir().unwrap();
    let input_path = dir.path().join("Localizable.xcstrings");
    FileManager::write_string(&input_path, SAMPLE_CATALOG).unwrap();

    let content = FileManager::read_to_string(&input_path).unwrap();
    let mut doc = XCStringsDocument::parse(&content).unwrap();
    let items = items_missing(&doc, "ja");

    let backend = Arc::new(MockBackend::working());
    let pipeline = TranslationPipeline::new(backend, RunConfig::default());
    let outcome = pipeline
        .run(&items, &["ja".to_string()], None)
        .await
        .unwrap();
    apply_results(&mut doc, &outcome.results);

    let output_path = FileManager::generate_output_path(&input_path, "translated");
    assert_eq!(
        output_path.file_name().unwrap().to_string_lossy(),
        "Localizable.translated.xcstrings"
    );
    FileManager::write_string(&output_path, &doc.to_json_string().unwrap()).unwrap();

    // Reloading and re-serializing produces byte-identical content
    let written = FileManager::read_to_string(&output_path).unwrap();
    let reparsed = XCStringsDocument::parse(&written).unwrap();
    assert_eq!(reparsed.to_json_string().unwrap(), written);
    assert_eq!(reparsed.translation("greeting", "ja"), Some("[ja] Hello"));
}
