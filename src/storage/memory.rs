//! In-process store with upsert-by-key semantics
//!
//! Used by the test suites and by callers embedding the loader.

use super::store::{BatchStore, StoreError};
use crate::core::seed::{Batch, Record};
use crate::utils::error::{Result, SeedError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::debug;

/// Records keyed by one string field
#[derive(Debug)]
pub struct MemoryStore {
    name: String,
    key_field: String,
    records: Mutex<BTreeMap<String, Record>>,
    submissions: Mutex<usize>,
}

impl MemoryStore {
    pub fn new(name: &str, key_field: &str) -> Result<Self> {
        if key_field.is_empty() {
            return Err(SeedError::config("memory store needs a key field"));
        }
        Ok(Self {
            name: name.to_string(),
            key_field: key_field.to_string(),
            records: Mutex::new(BTreeMap::new()),
            submissions: Mutex::new(0),
        })
    }

    /// Snapshot of the stored records ordered by key
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Number of accepted batch requests
    pub fn submissions(&self) -> usize {
        *self.submissions.lock()
    }
}

#[async_trait]
impl BatchStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn submit(&self, batch: &Batch<'_>) -> std::result::Result<(), StoreError> {
        // Validate the whole batch before touching the map so a rejected
        // batch leaves nothing behind.
        let mut keyed = Vec::with_capacity(batch.len());
        for record in batch.records() {
            let key = record.key(&self.key_field).ok_or_else(|| {
                StoreError::Rejected(format!("record without key field '{}'", self.key_field))
            })?;
            keyed.push((key.to_string(), record.clone()));
        }

        let mut records = self.records.lock();
        records.extend(keyed);
        *self.submissions.lock() += 1;

        debug!(store = %self.name, batch = batch.number(), size = batch.len(), "Batch stored");
        Ok(())
    }
}
