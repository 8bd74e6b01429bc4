//! Bounded worker pool
//!
//! A fixed number of permits shared by every call to [`WorkerPool::map`].
//! Each item runs in its own tokio task and holds a permit while it runs, so
//! no more than `size` items are ever in flight, however many batches reuse
//! the pool.

use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("worker pool is closed")]
    Closed,

    #[error("worker task failed: {0}")]
    Task(#[from] JoinError),
}

#[derive(Clone, Debug)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
}

impl WorkerPool {
    /// Create a pool; a size of zero is treated as one
    pub fn new(size: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(size.max(1))),
        }
    }

    /// Apply `f` to every item concurrently and wait for all of them
    ///
    /// Results come back in input order. A task that panics yields an error
    /// in its own slot and leaves the others untouched.
    pub async fn map<T, R, F, Fut>(&self, items: Vec<T>, f: F) -> Vec<Result<R, PoolError>>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Clone + Send + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let mut tasks = Vec::with_capacity(items.len());

        for item in items {
            let permits = Arc::clone(&self.permits);
            let f = f.clone();

            let task = tokio::spawn(async move {
                let _permit = permits.acquire_owned().await.map_err(|_| PoolError::Closed)?;
                Ok::<_, PoolError>(f(item).await)
            });

            tasks.push(task);
        }

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            results.push(task.await.map_err(PoolError::from).and_then(|r| r));
        }
        results
    }
}
