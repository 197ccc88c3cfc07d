//! Bounded worker pool for front-end actions
//!
//! Each user action runs as its own tokio task so the caller stays
//! responsive, but at most `max_workers` actions execute at once; the rest
//! wait for a permit. Results come back through a [`JobHandle`]. Dropping
//! the handle is allowed, the action still runs to completion.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Semaphore, oneshot};
use xbdm_core::{XbdmError, XbdmResult};

/// Default number of concurrently running actions
pub const DEFAULT_MAX_WORKERS: usize = 8;

/// Runs submitted actions on the tokio runtime under a concurrency limit
#[derive(Debug, Clone)]
pub struct Dispatcher {
    permits: Arc<Semaphore>,
    max_workers: usize,
}

/// Result channel of one submitted action
#[derive(Debug)]
pub struct JobHandle<T> {
    rx: oneshot::Receiver<XbdmResult<T>>,
}

impl<T> JobHandle<T> {
    /// Wait for the action's result
    ///
    /// Fails with `WorkerLost` if the action panicked or its task was
    /// dropped before finishing.
    pub async fn wait(self) -> XbdmResult<T> {
        self.rx.await.map_err(|_| XbdmError::WorkerLost)?
    }
}

impl Dispatcher {
    /// Create a dispatcher running at most `max_workers` actions at once
    ///
    /// A limit of zero is raised to one.
    pub fn new(max_workers: usize) -> Self {
        let max_workers = max_workers.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_workers)),
            max_workers,
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Number of actions that could start right now
    pub fn idle_workers(&self) -> usize {
        self.permits.available_permits()
    }

    /// Queue an action
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit<F, T>(&self, job: F) -> JobHandle<T>
    where
        F: Future<Output = XbdmResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let permits = self.permits.clone();

        tokio::spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };
            let result = job.await;
            if let Err(e) = &result {
                log::warn!("Action failed: {}", e);
            }
            let _ = tx.send(result);
        });

        JobHandle { rx }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORKERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_result_delivered() {
        let dispatcher = Dispatcher::default();
        let handle = dispatcher.submit(async { Ok(42) });
        assert_eq!(handle.wait().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_fault_delivered() {
        let dispatcher = Dispatcher::new(1);
        let handle = dispatcher.submit(async { Err::<(), _>(XbdmError::Timeout) });
        assert!(matches!(handle.wait().await, Err(XbdmError::Timeout)));
    }

    #[tokio::test]
    async fn test_panicking_job_reports_worker_lost() {
        let dispatcher = Dispatcher::new(1);
        let handle = dispatcher.submit(async {
            if true {
                panic!("boom");
            }
            Ok(())
        });
        assert!(matches!(handle.wait().await, Err(XbdmError::WorkerLost)));

        // The permit is released by unwinding
        let handle = dispatcher.submit(async { Ok("next") });
        assert_eq!(handle.wait().await.unwrap(), "next");
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let dispatcher = Dispatcher::new(2);
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let active = active.clone();
                let peak = peak.clone();
                dispatcher.submit(async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    Ok(i)
                })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.wait().await.unwrap());
        }
        assert_eq!(results, (0..10).collect::<Vec<_>>());
        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(dispatcher.idle_workers(), 2);
    }

    #[tokio::test]
    async fn test_zero_workers_raised_to_one() {
        let dispatcher = Dispatcher::new(0);
        assert_eq!(dispatcher.max_workers(), 1);
        assert_eq!(dispatcher.submit(async { Ok(1) }).wait().await.unwrap(), 1);
    }
}
