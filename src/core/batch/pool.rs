//! Worker Pool - bounded, reusable async workers
//!
//! A fixed number of long-lived workers pull boxed jobs from a shared FIFO
//! queue. Submitting never blocks: jobs wait in the queue while every worker
//! is busy. Each submission yields a [`TaskHandle`] that resolves with the
//! job's output, or with a [`TaskError`] if the job panicked or was abandoned
//! by a forced shutdown.

use crate::config::WorkerPoolConfig;
use crate::utils::error::{Result, ServiceError};
use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use parking_lot::Mutex;
use serde::Serialize;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

type Job = BoxFuture<'static, ()>;

/// Why a submitted task produced no value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// The task panicked while running
    #[error("task panicked")]
    Panicked,
    /// The task was dropped before finishing (forced shutdown)
    #[error("task cancelled before completion")]
    Cancelled,
}

/// Handle to the eventual output of a submitted task
pub struct TaskHandle<T> {
    receiver: oneshot::Receiver<std::result::Result<T, TaskError>>,
}

impl<T> Future for TaskHandle<T> {
    type Output = std::result::Result<T, TaskError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            // Sender dropped without a value: the job future was dropped.
            Poll::Ready(Err(_)) => Poll::Ready(Err(TaskError::Cancelled)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// How a shutdown ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownOutcome {
    /// Every queued and in-flight task finished within the grace period
    Graceful,
    /// The grace period elapsed and remaining tasks were cancelled
    TimedOut,
    /// The wait was interrupted and remaining tasks were cancelled
    Interrupted,
    /// The pool had already been shut down
    AlreadyStopped,
}

/// Point-in-time pool statistics
#[derive(Debug, Clone, Serialize)]
pub struct PoolStats {
    /// Configured worker count
    pub workers: usize,
    /// Tasks submitted but not yet picked up
    pub queued: usize,
    /// Tasks currently running
    pub active: usize,
    /// Tasks that reached a terminal state
    pub completed: usize,
    /// Whether new submissions are accepted
    pub accepting: bool,
}

#[derive(Debug, Default)]
struct Counters {
    queued: AtomicUsize,
    active: AtomicUsize,
    completed: AtomicUsize,
}

/// Bounded pool of reusable async workers
pub struct WorkerPool {
    config: WorkerPoolConfig,
    sender: Mutex<Option<mpsc::UnboundedSender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    counters: Arc<Counters>,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

impl WorkerPool {
    /// Start a pool on the current Tokio runtime
    ///
    /// Must be called from within a runtime context.
    pub fn new(config: WorkerPoolConfig) -> Self {
        Self::with_handle(config, &Handle::current())
    }

    /// Start a pool whose workers run on the given runtime
    pub fn with_handle(config: WorkerPoolConfig, runtime: &Handle) -> Self {
        let worker_count = config.workers.max(1);
        let (tx, rx) = mpsc::unbounded_channel::<Job>();
        let rx = Arc::new(tokio::sync::Mutex::new(rx));
        let counters = Arc::new(Counters::default());

        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let rx = Arc::clone(&rx);
            let counters = Arc::clone(&counters);
            handles.push(runtime.spawn(async move {
                debug!(worker_id, "Worker started");
                loop {
                    let job = {
                        let mut guard = rx.lock().await;
                        guard.recv().await
                    };
                    match job {
                        Some(job) => {
                            counters.queued.fetch_sub(1, Ordering::SeqCst);
                            counters.active.fetch_add(1, Ordering::SeqCst);
                            job.await;
                            counters.active.fetch_sub(1, Ordering::SeqCst);
                            counters.completed.fetch_add(1, Ordering::SeqCst);
                        }
                        None => {
                            debug!(worker_id, "Worker shutting down");
                            break;
                        }
                    }
                }
            }));
        }

        info!(workers = worker_count, "Worker pool started");

        Self {
            config,
            sender: Mutex::new(Some(tx)),
            workers: Mutex::new(handles),
            counters,
        }
    }

    /// Queue a task for execution
    ///
    /// Fails immediately once shutdown has begun.
    pub fn submit<F, T>(&self, task: F) -> Result<TaskHandle<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self
            .sender
            .lock()
            .clone()
            .ok_or_else(|| ServiceError::pool_unavailable("worker pool is shut down"))?;

        let (tx, rx) = oneshot::channel();
        let job: Job = Box::pin(async move {
            let result = AssertUnwindSafe(task)
                .catch_unwind()
                .await
                .map_err(|_| TaskError::Panicked);
            // The caller may have stopped waiting; nothing to do then.
            let _ = tx.send(result);
        });

        self.counters.queued.fetch_add(1, Ordering::SeqCst);
        if sender.send(job).is_err() {
            self.counters.queued.fetch_sub(1, Ordering::SeqCst);
            return Err(ServiceError::pool_unavailable("worker pool is shut down"));
        }

        Ok(TaskHandle { receiver: rx })
    }

    /// Whether new submissions are accepted
    pub fn is_accepting(&self) -> bool {
        self.sender.lock().is_some()
    }

    /// Configured worker count
    pub fn worker_count(&self) -> usize {
        self.config.workers.max(1)
    }

    /// Current statistics
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            workers: self.worker_count(),
            queued: self.counters.queued.load(Ordering::SeqCst),
            active: self.counters.active.load(Ordering::SeqCst),
            completed: self.counters.completed.load(Ordering::SeqCst),
            accepting: self.is_accepting(),
        }
    }

    /// Shut down, waiting up to the configured grace period
    pub async fn shutdown(&self) -> ShutdownOutcome {
        self.shutdown_with_interrupt(std::future::pending::<()>())
            .await
    }

    /// Shut down, waiting up to the grace period unless `interrupt` fires first
    ///
    /// Stops accepting work immediately, lets queued and in-flight tasks
    /// drain, and aborts every worker once the grace period elapses or the
    /// interrupt resolves. Aborted tasks surface as [`TaskError::Cancelled`].
    pub async fn shutdown_with_interrupt<I>(&self, interrupt: I) -> ShutdownOutcome
    where
        I: Future,
    {
        // Dropping the only sender closes the queue once it drains.
        drop(self.sender.lock().take());

        let handles: Vec<JoinHandle<()>> = std::mem::take(&mut *self.workers.lock());
        if handles.is_empty() {
            return ShutdownOutcome::AlreadyStopped;
        }

        let grace = self.config.grace_period();
        info!(
            grace_secs = grace.as_secs(),
            queued = self.counters.queued.load(Ordering::SeqCst),
            active = self.counters.active.load(Ordering::SeqCst),
            "Shutting down worker pool"
        );

        let aborts: Vec<AbortHandle> = handles.iter().map(JoinHandle::abort_handle).collect();
        let drain = join_all(handles);

        let outcome = tokio::select! {
            drained = tokio::time::timeout(grace, drain) => match drained {
                Ok(_) => ShutdownOutcome::Graceful,
                Err(_) => ShutdownOutcome::TimedOut,
            },
            _ = interrupt => ShutdownOutcome::Interrupted,
        };

        if outcome != ShutdownOutcome::Graceful {
            warn!(?outcome, "Forcing worker pool stop, cancelling remaining tasks");
            for abort in &aborts {
                abort.abort();
            }
        }

        info!(?outcome, "Worker pool stopped");
        outcome
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        for handle in self.workers.get_mut().drain(..) {
            handle.abort();
        }
    }
}
