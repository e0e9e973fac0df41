//! Submits one batch and turns the store's answer into a [`WriteOutcome`]

use super::types::{Batch, WriteOutcome};
use crate::storage::{BatchStore, StoreError};
use crate::utils::error::{Result, SeedError};
use tracing::{error, info};

/// Writes batches through a borrowed store handle
pub struct BatchWriter<'s, S: BatchStore + ?Sized> {
    store: &'s S,
    total_batches: usize,
}

impl<'s, S: BatchStore + ?Sized> BatchWriter<'s, S> {
    pub fn new(store: &'s S, total_batches: usize) -> Self {
        Self {
            store,
            total_batches,
        }
    }

    /// Submit `batch` once, without retrying.
    ///
    /// Transport and store-side errors become `Failure`; a misconfigured
    /// store is returned as `Err` and ends the run.
    pub async fn write(&self, batch: &Batch<'_>) -> Result<WriteOutcome> {
        info!(
            "Processing batch {}/{} ({} records)...",
            batch.number(),
            self.total_batches,
            batch.len()
        );

        match self.store.submit(batch).await {
            Ok(()) => {
                info!("Batch {} inserted successfully", batch.number());
                Ok(WriteOutcome::Success)
            }
            Err(StoreError::Configuration(message)) => {
                error!(store = %self.store.name(), "Store is misconfigured: {}", message);
                Err(SeedError::config(format!("{}: {}", self.store.name(), message)))
            }
            Err(e @ (StoreError::Transport(_) | StoreError::Rejected(_))) => {
                error!("Error inserting batch {}: {}", batch.number(), e);
                Ok(WriteOutcome::Failure(e.to_string()))
            }
        }
    }
}
