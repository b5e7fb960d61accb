//! Batch dispatcher: resolves many URLs on a bounded worker pool.
//!
//! Blank entries are skipped and each distinct URL is resolved once.
//! Outcomes are recorded as they arrive; [`BatchResult::iter_ordered`]
//! replays them in the original input order.

mod batch;
mod pool;

use std::collections::HashSet;
use std::sync::Arc;

use crate::resolve::{ResolutionOutcome, Resolver};

pub use batch::BatchResult;

/// Upper bound of the default worker count.
pub const MAX_DEFAULT_WORKERS: usize = 32;

/// Default worker count: min(32, available parallelism + 4).
pub fn default_workers() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cpus + 4).min(MAX_DEFAULT_WORKERS)
}

/// Resolves every non-blank URL with at most `workers` concurrent resolver calls.
pub fn dispatch<R>(urls: &[String], workers: usize, resolver: Arc<R>) -> BatchResult
where
    R: Resolver + ?Sized + 'static,
{
    dispatch_with_progress(urls, workers, resolver, |_, _| {})
}

/// Like [`dispatch`], calling `on_complete` on the caller's thread as each
/// distinct URL finishes (completion order, not input order).
pub fn dispatch_with_progress<R, F>(
    urls: &[String],
    workers: usize,
    resolver: Arc<R>,
    mut on_complete: F,
) -> BatchResult
where
    R: Resolver + ?Sized + 'static,
    F: FnMut(&str, &ResolutionOutcome),
{
    let order: Vec<String> = urls
        .iter()
        .filter(|u| !u.trim().is_empty())
        .cloned()
        .collect();

    let mut seen = HashSet::with_capacity(order.len());
    let tasks: Vec<String> = order
        .iter()
        .filter(|u| seen.insert(u.as_str()))
        .cloned()
        .collect();

    tracing::info!(
        urls = order.len(),
        distinct = tasks.len(),
        workers,
        "dispatching batch"
    );

    let outcomes = pool::run_pool(tasks, workers, resolver, |url, outcome| {
        match outcome {
            Ok(res) => {
                tracing::debug!(url, final_url = %res.final_url, status = res.status, "resolved")
            }
            Err(e) => tracing::warn!(url, error = %e, "resolution failed"),
        }
        on_complete(url, outcome);
    });

    let batch = BatchResult::new(order, outcomes);
    tracing::info!(
        resolved = batch.succeeded(),
        failed = batch.failed(),
        "batch finished"
    );
    batch
}
