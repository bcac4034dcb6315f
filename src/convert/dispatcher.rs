//! Bounded work dispatcher.
//!
//! Runs a blocking worker function over a batch of items with a fixed cap on
//! concurrently-active invocations, and hands every item's outcome back to
//! the caller instead of dropping results on the floor.

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Execute `worker` for every item with at most `concurrency` invocations
/// running at once.
///
/// Items are fed through a queue shared by `concurrency` worker tasks; each
/// task pulls the next item and runs the worker on the blocking pool, so a
/// slow external process never stalls the async runtime. Outcomes are
/// collected in completion order, which is not the submission order.
///
/// Every submitted item reaches a terminal state; there is no cancellation
/// and no per-item timeout. A panicking worker loses that item's outcome but
/// does not take the batch down.
pub async fn dispatch<T, R, F>(items: Vec<T>, concurrency: usize, worker: F) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> R + Send + Sync + 'static,
{
    let total = items.len();
    let concurrency = concurrency.max(1);

    let (work_tx, work_rx) = mpsc::channel::<T>(concurrency);
    let work_rx = Arc::new(Mutex::new(work_rx));
    let (result_tx, mut result_rx) = mpsc::channel::<R>(total.max(1));
    let worker = Arc::new(worker);

    let mut handles = Vec::with_capacity(concurrency);
    for _ in 0..concurrency {
        let rx = Arc::clone(&work_rx);
        let tx = result_tx.clone();
        let worker = Arc::clone(&worker);

        handles.push(tokio::spawn(async move {
            loop {
                let item = {
                    let mut guard = rx.lock().await;
                    guard.recv().await
                };
                let Some(item) = item else {
                    break;
                };

                let worker = Arc::clone(&worker);
                match tokio::task::spawn_blocking(move || worker(item)).await {
                    Ok(outcome) => {
                        let _ = tx.send(outcome).await;
                    }
                    Err(e) => {
                        tracing::error!("Worker panicked: {}", e);
                    }
                }
            }
        }));
    }
    drop(result_tx);

    let feeder = tokio::spawn(async move {
        for item in items {
            if work_tx.send(item).await.is_err() {
                break;
            }
        }
        // Dropping the sender lets the worker tasks drain and exit.
    });

    let mut results = Vec::with_capacity(total);
    while let Some(outcome) = result_rx.recv().await {
        results.push(outcome);
    }

    let _ = feeder.await;
    for handle in handles {
        let _ = handle.await;
    }

    results
}
