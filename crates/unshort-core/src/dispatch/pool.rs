//! Bounded worker pool over a shared queue.

use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};

use crate::resolve::{ResolutionOutcome, ResolveError, Resolver};

/// Run `tasks` on `min(workers, tasks.len())` threads pulling from one queue.
/// `on_result` runs on the calling thread for each result as it arrives.
/// A resolver panic becomes `ResolveError::Execution` and the worker moves on.
/// Tasks left queued because no worker could be spawned get an
/// `Execution` error carrying the spawn failure.
pub(super) fn run_pool<R, F>(
    tasks: Vec<String>,
    workers: usize,
    resolver: Arc<R>,
    mut on_result: F,
) -> HashMap<String, ResolutionOutcome>
where
    R: Resolver + ?Sized + 'static,
    F: FnMut(&str, &ResolutionOutcome),
{
    let count = tasks.len();
    let mut outcomes = HashMap::with_capacity(count);
    if count == 0 {
        return outcomes;
    }

    let work: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(tasks.into_iter().collect()));
    let (tx, rx) = mpsc::channel::<(String, ResolutionOutcome)>();
    let num_workers = workers.max(1).min(count);
    let mut handles = Vec::with_capacity(num_workers);
    let mut spawn_error = None;
    for i in 0..num_workers {
        let work = Arc::clone(&work);
        let tx = tx.clone();
        let resolver = Arc::clone(&resolver);
        let spawned = std::thread::Builder::new()
            .name(format!("resolve-{}", i))
            .spawn(move || loop {
                let next = work
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();
                let Some(url) = next else {
                    break;
                };
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| resolver.resolve(&url)))
                    .unwrap_or_else(|payload| Err(ResolveError::Execution(panic_message(&*payload))));
                if tx.send((url, outcome)).is_err() {
                    break;
                }
            });
        match spawned {
            Ok(h) => handles.push(h),
            Err(e) => {
                tracing::warn!("could not spawn resolver worker {}: {}", i, e);
                spawn_error = Some(e.to_string());
            }
        }
    }
    drop(tx);

    // Ends when every worker has exited and dropped its sender.
    for (url, outcome) in rx.iter() {
        on_result(&url, &outcome);
        outcomes.insert(url, outcome);
    }

    for h in handles {
        if h.join().is_err() {
            tracing::warn!("resolver worker panicked outside a task");
        }
    }

    if let Some(reason) = spawn_error {
        for (url, outcome) in drain_unstarted(&work, &reason) {
            on_result(&url, &outcome);
            outcomes.insert(url, outcome);
        }
    }

    if outcomes.len() < count {
        tracing::warn!(
            missing = count - outcomes.len(),
            "some URLs produced no outcome"
        );
    }
    outcomes
}

/// Empties the queue, failing each task no worker picked up.
pub(super) fn drain_unstarted(
    work: &Mutex<VecDeque<String>>,
    reason: &str,
) -> Vec<(String, ResolutionOutcome)> {
    let mut queue = work.lock().unwrap_or_else(PoisonError::into_inner);
    queue
        .drain(..)
        .map(|url| {
            let err = ResolveError::Execution(format!("no resolver worker available: {}", reason));
            (url, Err(err))
        })
        .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "resolver panicked".to_string()
    }
}
