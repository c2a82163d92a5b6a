/*!
 * Tests for the batch translation pipeline
 *
 * Covers the pipeline contract end to end over mock backends:
 * - Full coverage of the items x languages cross product
 * - Progress monotonicity and final counts
 * - The concurrency cap is never exceeded
 * - Failed batches are isolated and fall back to source text
 * - Invalid run configurations are rejected before any call
 */

use std::collections::HashSet;
use std::sync::Arc;

use locforge::app_config::RunConfig;
use locforge::errors::PipelineError;
use locforge::providers::mock::MockBackend;
use locforge::translation::{ItemStatus, TranslationPipeline};

use crate::common::{make_items, mock_translation, recording_callback};

fn run_config(concurrent_requests: usize, batch_size: usize) -> RunConfig {
    RunConfig {
        concurrent_requests,
        batch_size,
        ..RunConfig::default()
    }
}

fn languages(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

#[tokio::test]
async fn test_run_withWorkingBackend_shouldCoverFullCrossProduct() {
    let backend = Arc::new(MockBackend::working());
    let pipeline = TranslationPipeline::new(backend, run_config(3, 4));
    let items = make_items(7);
    let langs = languages(&["fr", "de", "ja"]);

    let outcome = pipeline.run(&items, &langs, None).await.unwrap();

    assert_eq!(outcome.results.len(), items.len() * langs.len());
    assert_eq!(outcome.summary.total, 21);
    assert_eq!(outcome.summary.succeeded, 21);
    assert_eq!(outcome.summary.failed, 0);

    // Every (key, language) pair appears exactly once
    let pairs: HashSet<(String, String)> = outcome
        .results
        .iter()
        .map(|r| (r.key.clone(), r.target_language.clone()))
        .collect();
    assert_eq!(pairs.len(), 21);

    for result in &outcome.results {
        assert_eq!(result.status, ItemStatus::Success);
        let item = items.iter().find(|i| i.key == result.key).unwrap();
        assert_eq!(result.value, mock_translation(item, &result.target_language));
    }
}

#[tokio::test]
async fn test_run_withEmptyItems_shouldReturnEmptyOutcome() {
    let backend = Arc::new(MockBackend::working());
    let pipeline = TranslationPipeline::new(backend.clone(), run_config(3, 10));

    let outcome = pipeline.run(&[], &languages(&["fr"]), None).await.unwrap();

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.summary.total, 0);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_run_withEmptyLanguages_shouldRejectBeforeAnyCall() {
    let backend = Arc::new(MockBackend::working());
    let pipeline = TranslationPipeline::new(backend.clone(), run_config(3, 10));

    let result = pipeline.run(&make_items(3), &[], None).await;

    assert!(matches!(result, Err(PipelineError::InvalidArgument(_))));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_run_withDuplicateLanguages_shouldTranslateEachOnce() {
    let backend = Arc::new(MockBackend::working());
    let pipeline = TranslationPipeline::new(backend, run_config(3, 10));
    let items = make_items(4);

    let outcome = pipeline
        .run(&items, &languages(&["fr", "de", "fr"]), None)
        .await
        .unwrap();

    assert_eq!(outcome.summary.total, 8);
    assert_eq!(outcome.results.len(), 8);
}

#[tokio::test]
async fn test_run_withOutOfRangeConcurrency_shouldRejectConfig() {
    let backend = Arc::new(MockBackend::working());
    for concurrency in [0, 11, 100] {
        let pipeline =
            TranslationPipeline::new(backend.clone(), run_config(concurrency, 10));
        let result = pipeline.run(&make_items(2), &languages(&["fr"]), None).await;
        assert!(
            matches!(result, Err(PipelineError::InvalidArgument(_))),
            "concurrency {} should be rejected",
            concurrency
        );
    }
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_run_withOutOfRangeBatchSize_shouldRejectConfig() {
    let backend = Arc::new(MockBackend::working());
    for batch_size in [0, 31] {
        let pipeline = TranslationPipeline::new(backend.clone(), run_config(3, batch_size));
        let result = pipeline.run(&make_items(2), &languages(&["fr"]), None).await;
        assert!(
            matches!(result, Err(PipelineError::InvalidArgument(_))),
            "batch size {} should be rejected",
            batch_size
        );
    }
}

#[tokio::test]
async fn test_run_withConcurrencyCap_shouldNeverExceedIt() {
    for cap in [1, 2, 5] {
        let backend = Arc::new(MockBackend::slow(10));
        let pipeline = TranslationPipeline::new(backend.clone(), run_config(cap, 1));
        let items = make_items(12);

        pipeline.run(&items, &languages(&["fr"]), None).await.unwrap();

        assert!(
            backend.peak_in_flight() <= cap,
            "peak {} exceeded cap {}",
            backend.peak_in_flight(),
            cap
        );
        assert_eq!(backend.call_count(), 12);
    }
}

#[tokio::test]
async fn test_run_withProgressCallback_shouldReportMonotonicallyUpToTotal() {
    let backend = Arc::new(MockBackend::working());
    let pipeline = TranslationPipeline::new(backend, run_config(4, 2));
    let items = make_items(9);
    let (callback, updates) = recording_callback();

    let outcome = pipeline
        .run(&items, &languages(&["fr", "de"]), Some(callback))
        .await
        .unwrap();

    let updates = updates.lock().unwrap();
    assert_eq!(updates.len(), outcome.summary.total);

    let mut previous = 0;
    for update in updates.iter() {
        assert!(update.current > previous, "progress went backwards");
        assert_eq!(update.total, 18);
        previous = update.current;
    }
    assert_eq!(previous, 18);
}

#[tokio::test]
async fn test_run_withFailingBackend_shouldFallBackToSourceText() {
    let backend = Arc::new(MockBackend::failing());
    let pipeline = TranslationPipeline::new(backend, run_config(2, 3));
    let items = make_items(5);

    let outcome = pipeline.run(&items, &languages(&["fr"]), None).await.unwrap();

    assert_eq!(outcome.summary.failed, 5);
    assert_eq!(outcome.summary.succeeded, 0);
    assert!(outcome.summary.all_failed());
    for result in &outcome.results {
        assert_eq!(result.status, ItemStatus::Failed);
        let item = items.iter().find(|i| i.key == result.key).unwrap();
        assert_eq!(result.value, item.source_text);
        assert!(result.error_message.is_some());
    }
}

#[tokio::test]
async fn test_run_withIntermittentBackend_shouldIsolateFailedBatches() {
    // fail_every=2 fails every second backend call; with one item per
    // batch that is every second item, the rest must still succeed
    let backend = Arc::new(MockBackend::intermittent(2));
    let pipeline = TranslationPipeline::new(backend, run_config(1, 1));
    let items = make_items(6);

    let outcome = pipeline.run(&items, &languages(&["fr"]), None).await.unwrap();

    assert_eq!(outcome.summary.total, 6);
    assert_eq!(outcome.summary.succeeded, 3);
    assert_eq!(outcome.summary.failed, 3);
    assert!(outcome.summary.is_partial_failure());
    assert_eq!(outcome.summary.errors.len(), 3);

    for result in &outcome.results {
        let item = items.iter().find(|i| i.key == result.key).unwrap();
        match result.status {
            ItemStatus::Success => {
                assert_eq!(result.value, mock_translation(item, "fr"));
            }
            ItemStatus::Failed => {
                assert_eq!(result.value, item.source_text);
            }
        }
    }
}

#[tokio::test]
async fn test_run_withShortResponse_shouldFailWholeBatch() {
    let backend = Arc::new(MockBackend::short_response());
    let pipeline = TranslationPipeline::new(backend, run_config(2, 5));
    let items = make_items(5);

    let outcome = pipeline.run(&items, &languages(&["fr"]), None).await.unwrap();

    assert_eq!(outcome.summary.failed, 5);
    for result in &outcome.results {
        assert_eq!(result.status, ItemStatus::Failed);
    }
}

#[tokio::test]
async fn test_run_withRetryEnabled_shouldRecoverIntermittentFailures() {
    // Every second call fails; one retry turns each failure into a success
    let backend = Arc::new(MockBackend::intermittent(2));
    let config = RunConfig {
        concurrent_requests: 1,
        batch_size: 1,
        retry_count: 1,
        retry_backoff_ms: 1,
        ..RunConfig::default()
    };
    let pipeline = TranslationPipeline::new(backend, config);
    let items = make_items(4);

    let outcome = pipeline.run(&items, &languages(&["fr"]), None).await.unwrap();

    assert_eq!(outcome.summary.failed, 0);
    assert_eq!(outcome.summary.succeeded, 4);
}

#[tokio::test]
async fn test_run_withRequestTimeout_shouldFailSlowBatches() {
    let backend = Arc::new(MockBackend::slow(1500));
    let config = RunConfig {
        concurrent_requests: 2,
        batch_size: 2,
        request_timeout_secs: Some(1),
        ..RunConfig::default()
    };
    let pipeline = TranslationPipeline::new(backend, config);
    let items = make_items(2);

    let outcome = pipeline.run(&items, &languages(&["fr"]), None).await.unwrap();

    assert_eq!(outcome.summary.failed, 2);
    let message = outcome.results[0].error_message.as_deref().unwrap();
    assert!(message.contains("timed out"), "unexpected message: {}", message);
}

#[tokio::test]
async fn test_run_withPanickingCallback_shouldStillComplete() {
    let backend = Arc::new(MockBackend::working());
    let pipeline = TranslationPipeline::new(backend, run_config(2, 2));
    let items = make_items(4);
    let callback: locforge::translation::ProgressCallback =
        Arc::new(|_| panic!("listener bug"));

    let outcome = pipeline
        .run(&items, &languages(&["fr"]), Some(callback))
        .await
        .unwrap();

    assert_eq!(outcome.summary.succeeded, 4);
}

#[tokio::test]
async fn test_run_withSameInputs_shouldProduceSameResultOrder() {
    let items = make_items(8);
    let langs = languages(&["fr", "de"]);

    let backend = Arc::new(MockBackend::working());
    let pipeline = TranslationPipeline::new(backend, run_config(5, 3));
    let first = pipeline.run(&items, &langs, None).await.unwrap();
    let second = pipeline.run(&items, &langs, None).await.unwrap();

    assert_eq!(first.results, second.results);
}
