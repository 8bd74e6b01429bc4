//! Batch deleter
//!
//! Splits the identifiers into consecutive batches and pushes each batch
//! through the worker pool. A batch is fully drained before the next one is
//! submitted, so results come back grouped by batch, in input order.

use crate::client::WpClient;
use crate::config::RunConfig;
use crate::error::Result;
use crate::ids::RecordId;
use crate::outcome::{DeleteOutcome, StatusRecord};
use crate::pool::WorkerPool;
use crate::sampler;

/// Snapshot handed to the observer after every batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchProgress {
    /// 1-based index of the batch that just finished
    pub batch: usize,
    pub batches: usize,
    pub batch_len: usize,
    /// Identifiers processed so far, this batch included
    pub submitted: usize,
    pub total: usize,
    /// Successful deletions so far
    pub succeeded: usize,
}

pub struct BatchDeleter {
    client: WpClient,
    pool: WorkerPool,
    batch_size: usize,
}

impl BatchDeleter {
    pub fn new(config: &RunConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            client: WpClient::new(config)?,
            pool: WorkerPool::new(config.pool_size),
            batch_size: config.batch_size,
        })
    }

    pub fn batch_count(&self, total: usize) -> usize {
        total.div_ceil(self.batch_size)
    }

    /// Delete every identifier, one outcome per identifier
    ///
    /// Per-item failures are recorded, never raised.
    pub async fn run<F>(&self, ids: &[RecordId], mut on_batch: F) -> Vec<StatusRecord>
    where
        F: FnMut(&BatchProgress),
    {
        let total = ids.len();
        let batches = self.batch_count(total);
        let mut results = Vec::with_capacity(total);
        let mut succeeded = 0;

        for (index, batch) in ids.chunks(self.batch_size).enumerate() {
            let client = self.client.clone();
            let outcomes = self
                .pool
                .map(batch.to_vec(), move |id| {
                    let client = client.clone();
                    async move { client.delete_post(id).await }
                })
                .await;

            let current: Vec<StatusRecord> = batch
                .iter()
                .zip(outcomes)
                .map(|(id, outcome)| match outcome {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::error!("Worker failed while deleting post {}: {}", id, e);
                        StatusRecord::new(
                            id.clone(),
                            self.client.post_url(id).to_string(),
                            DeleteOutcome::Failed,
                        )
                    }
                })
                .collect();

            succeeded += current.iter().filter(|r| r.is_success()).count();
            tracing::info!(
                "Submitted {} records for deletion, total submitted: {}",
                current.len(),
                results.len() + current.len()
            );
            sampler::log_random_record(&current);
            results.extend(current);

            on_batch(&BatchProgress {
                batch: index + 1,
                batches,
                batch_len: batch.len(),
                submitted: results.len(),
                total,
                succeeded,
            });
        }

        results
    }
}
