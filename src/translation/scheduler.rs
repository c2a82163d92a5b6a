/*!
 * Bounded-concurrency batch execution.
 *
 * Jobs are started in list order with at most `concurrency` in flight at
 * once; as soon as one completes the next queued job is dispatched. Jobs
 * may complete out of order, so results are re-sorted by dispatch index
 * before being returned. Tasks are infallible from the scheduler's point
 * of view: the executor closure converts its own failures into values,
 * which is what keeps one bad batch from touching the others.
 */

use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Run every job with at most `concurrency` in flight simultaneously
///
/// Resolves only once every job has completed exactly once; outputs come
/// back in job order regardless of completion order.
pub async fn execute_bounded<J, O, F, Fut>(jobs: Vec<J>, concurrency: usize, exec: F) -> Vec<O>
where
    J: Send,
    O: Send,
    F: Fn(usize, J) -> Fut + Clone,
    Fut: Future<Output = O>,
{
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    let mut results: Vec<(usize, O)> = stream::iter(jobs.into_iter().enumerate())
        .map(|(index, job)| {
            let semaphore = Arc::clone(&semaphore);
            let exec = exec.clone();
            async move {
                let _permit = semaphore.acquire().await.unwrap();
                let output = exec(index, job).await;
                (index, output)
            }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, output)| output).collect()
}
