//! Bounded fetch pool shared by every corpus load.
//!
//! The pool is built once when the service starts. Each fetch holds one
//! permit while it runs, so no more than `workers` fetches are in flight
//! across the whole process no matter how many calls load the corpus at once.

use crate::error::{CorpusError, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

#[derive(Debug, Clone)]
pub struct FetchPool {
    permits: Arc<Semaphore>,
}

impl FetchPool {
    /// A pool with at least one worker.
    pub fn new(workers: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }

    /// Stops the pool. Running fetches finish, new ones fail with
    /// [`CorpusError::PoolClosed`].
    pub fn close(&self) {
        self.permits.close();
    }

    /// Runs every job, returning the outputs in input order.
    ///
    /// The first failing job fails the batch and drops the jobs still pending.
    pub async fn run_all<I, F, T>(&self, jobs: I) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = Result<T>>,
    {
        if self.is_closed() {
            return Err(CorpusError::PoolClosed);
        }

        let tasks = jobs.into_iter().map(|job| {
            let permits = self.permits.clone();
            async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|_| CorpusError::PoolClosed)?;
                job.await
            }
        });

        futures::future::try_join_all(tasks).await
    }
}

impl Default for FetchPool {
    fn default() -> Self {
        Self::new(config::constants::DEFAULT_FETCH_WORKERS)
    }
}
