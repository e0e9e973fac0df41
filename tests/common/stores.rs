//! Scripted store utilities
//!
//! A store whose answers are fixed up front, for exercising the fail-fast
//! path without a real backend.

use async_trait::async_trait;
use db_seeds::core::seed::Batch;
use db_seeds::storage::{BatchStore, StoreError};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Records every submission and answers from a per-batch script
#[derive(Debug, Default)]
pub struct ScriptedStore {
    failures: HashMap<usize, StoreError>,
    submitted: Mutex<Vec<Vec<String>>>,
    closes: Mutex<usize>,
}

impl ScriptedStore {
    /// A store that accepts everything
    pub fn accepting() -> Self {
        Self::default()
    }

    /// Answer `error` for the batch at `index` (0-based)
    pub fn failing_at(mut self, index: usize, error: StoreError) -> Self {
        self.failures.insert(index, error);
        self
    }

    /// Keys of every submitted batch, in submission order
    pub fn submitted(&self) -> Vec<Vec<String>> {
        self.submitted.lock().clone()
    }

    pub fn submissions(&self) -> usize {
        self.submitted.lock().len()
    }

    pub fn closes(&self) -> usize {
        *self.closes.lock()
    }
}

#[async_trait]
impl BatchStore for ScriptedStore {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn submit(&self, batch: &Batch<'_>) -> Result<(), StoreError> {
        let keys = batch
            .records()
            .iter()
            .map(|r| r.key("id").unwrap_or_default().to_string())
            .collect();
        self.submitted.lock().push(keys);

        match self.failures.get(&batch.index()) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn close(&self) -> Result<(), StoreError> {
        *self.closes.lock() += 1;
        Ok(())
    }
}
