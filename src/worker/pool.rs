use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::core::MAX_WORKERS;
use crate::worker::{WorkerError, WorkerResult};

/// Bounded pool: every job gets its own tokio task, but at most
/// `worker_count` of them run their body at once.
#[derive(Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    active_workers: Arc<AtomicUsize>,
    peak_workers: Arc<AtomicUsize>,
    worker_count: usize,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(None)
    }
}

impl WorkerPool {
    pub fn new(worker_count: Option<usize>) -> Self {
        let worker_count = worker_count.unwrap_or(MAX_WORKERS).max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(worker_count)),
            active_workers: Arc::new(AtomicUsize::new(0)),
            peak_workers: Arc::new(AtomicUsize::new(0)),
            worker_count,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::SeqCst)
    }

    /// Highest number of jobs seen running at the same time.
    pub fn peak_workers(&self) -> usize {
        self.peak_workers.load(Ordering::SeqCst)
    }

    /// Runs `job` for every item and waits for all of them.
    ///
    /// Results come back in input order. A job that panics yields a
    /// [`WorkerError`] in its slot; the other jobs keep running.
    pub async fn run_all<I, R, F, Fut>(&self, items: Vec<I>, job: F) -> Vec<WorkerResult<R>>
    where
        I: Send + 'static,
        R: Send + 'static,
        F: Fn(I) -> Fut + Clone + Send + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        debug!("Dispatching {} jobs on {} workers", items.len(), self.worker_count);

        let handles: Vec<_> = items
            .into_iter()
            .map(|item| {
                let pool = self.clone();
                let job = job.clone();
                tokio::spawn(async move {
                    let _permit = pool.semaphore.acquire().await?;
                    let _active = pool.enter();
                    Ok::<_, WorkerError>(job(item).await)
                })
            })
            .collect();

        join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.map_err(WorkerError::from).and_then(|r| r))
            .collect()
    }

    fn enter(&self) -> ActiveGuard {
        let now = self.active_workers.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_workers.fetch_max(now, Ordering::SeqCst);
        debug!(
            "Worker started - Active: {}/{}, Available permits: {}",
            now,
            self.worker_count,
            self.semaphore.available_permits()
        );
        ActiveGuard {
            active_workers: Arc::clone(&self.active_workers),
        }
    }
}

/// Decrements the active count when a job ends, even by panic.
struct ActiveGuard {
    active_workers: Arc<AtomicUsize>,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.active_workers.fetch_sub(1, Ordering::SeqCst);
    }
}
