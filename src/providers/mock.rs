/*!
 * Mock backend implementations for testing.
 *
 * This module provides mock backends that simulate different behaviors:
 * - `MockBackend::working()` - Always succeeds with translated text
 * - `MockBackend::intermittent(n)` - Fails every nth call
 * - `MockBackend::failing()` - Always fails with an error
 * - `MockBackend::slow(ms)` - Delays each call (for timeout testing)
 *
 * The backend also keeps an in-flight gauge so tests can assert the
 * scheduler never exceeds its concurrency cap.
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;

use super::TranslationBackend;

/// Behavior mode for the mock backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a tagged translation
    Working,
    /// Fails intermittently (every nth call)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns one output too few (violates the same-length contract)
    ShortResponse,
    /// Simulates a slow response
    Slow { delay_ms: u64 },
}

/// Mock backend for testing pipeline behavior
#[derive(Debug)]
pub struct MockBackend {
    /// Behavior mode
    behavior: MockBehavior,
    /// Call counter for intermittent failures
    call_count: Arc<AtomicUsize>,
    /// Currently in-flight calls
    in_flight: Arc<AtomicUsize>,
    /// Peak simultaneous in-flight calls observed
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Create a new mock backend with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock backend that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock backend
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock backend that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns too few outputs
    pub fn short_response() -> Self {
        Self::new(MockBehavior::ShortResponse)
    }

    /// Create a mock with a fixed per-call delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Total calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Peak simultaneous in-flight calls observed
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// The deterministic translation the working mock produces
    pub fn expected_translation(text: &str, target_language: &str) -> String {
        format!("[{}] {}", target_language, text)
    }
}

impl Clone for MockBackend {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            call_count: Arc::clone(&self.call_count),
            in_flight: Arc::clone(&self.in_flight),
            peak_in_flight: Arc::clone(&self.peak_in_flight),
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target_language: &str,
        _protected_terms: &[String],
    ) -> Result<Vec<String>, ProviderError> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        // Yield so overlapping calls actually overlap under the scheduler
        tokio::time::sleep(tokio::time::Duration::from_millis(2)).await;

        let result = match self.behavior {
            MockBehavior::Working => Ok(texts
                .iter()
                .map(|text| Self::expected_translation(text, target_language))
                .collect()),

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (call #{})", count + 1),
                    })
                } else {
                    Ok(texts
                        .iter()
                        .map(|text| Self::expected_translation(text, target_language))
                        .collect())
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated backend failure".to_string(),
            }),

            MockBehavior::ShortResponse => Ok(texts
                .iter()
                .take(texts.len().saturating_sub(1))
                .map(|text| Self::expected_translation(text, target_language))
                .collect()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(texts
                    .iter()
                    .map(|text| Self::expected_translation(text, target_language))
                    .collect())
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
