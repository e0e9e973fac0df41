//! The store boundary: one operation, `submit(batch)`

use crate::core::seed::{Batch, MAX_BATCH_SIZE};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Why a store refused or could not take a batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store handle itself is unusable; the run must stop
    #[error("store misconfigured: {0}")]
    Configuration(String),

    /// The request never got a definitive answer
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered and refused the batch
    #[error("rejected by store: {0}")]
    Rejected(String),
}

/// A keyed store that accepts batches of records
#[async_trait]
pub trait BatchStore: Send + Sync {
    /// Name used in log lines
    fn name(&self) -> &str;

    /// Largest batch accepted in a single request
    fn max_batch_size(&self) -> usize {
        MAX_BATCH_SIZE
    }

    /// Write every record of `batch` as one logical request.
    async fn submit(&self, batch: &Batch<'_>) -> Result<(), StoreError>;

    /// Release the handle. Called exactly once, at the end of a run.
    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Shared handles let callers inspect a store after a run has released it
#[async_trait]
impl<T: BatchStore + ?Sized> BatchStore for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn max_batch_size(&self) -> usize {
        (**self).max_batch_size()
    }

    async fn submit(&self, batch: &Batch<'_>) -> Result<(), StoreError> {
        (**self).submit(batch).await
    }

    async fn close(&self) -> Result<(), StoreError> {
        (**self).close().await
    }
}
