//! Sequential, fail-fast batch loading

use super::chunker::{batch_count, chunk};
use super::fixtures::FixtureSource;
use super::reporter::RunReporter;
use super::types::{Record, RunReport};
use super::writer::BatchWriter;
use crate::storage::BatchStore;
use crate::utils::error::{Result, SeedError};
use std::num::NonZeroUsize;
use tracing::{info, warn};

/// Load `records` into `store`, one batch at a time.
///
/// Stops at the first failed batch. Returns `Err` only for fatal errors
/// (bad batch size, misconfigured store); batch failures are reported in
/// the returned [`RunReport`].
pub async fn load_records<S>(
    store: &S,
    records: &[Record],
    max_batch_size: usize,
) -> Result<RunReport>
where
    S: BatchStore + ?Sized,
{
    let max = check_batch_size(store, max_batch_size)?;
    let total_batches = batch_count(records.len(), max);

    info!(
        store = %store.name(),
        "Loading {} records in {} batches of up to {}",
        records.len(),
        total_batches,
        max
    );

    let writer = BatchWriter::new(store, total_batches);
    let mut reporter = RunReporter::new(records.len(), total_batches);

    for batch in chunk(records, max) {
        let outcome = writer.write(&batch).await?;
        if reporter.record(outcome).is_break() {
            break;
        }
    }

    Ok(reporter.finish())
}

/// Run [`load_records`] with an owned store, releasing it on every path
pub async fn seed_records<S>(store: S, records: &[Record], max_batch_size: usize) -> Result<RunReport>
where
    S: BatchStore,
{
    let result = load_records(&store, records, max_batch_size).await;
    release(&store).await;
    result
}

/// Read `source`, then seed its records into `store`.
///
/// Source errors abort before any write; the store is released regardless.
pub async fn seed_collection<S>(
    store: S,
    source: &FixtureSource,
    max_batch_size: usize,
) -> Result<(Vec<Record>, RunReport)>
where
    S: BatchStore,
{
    let records = match source.load().await {
        Ok(records) => records,
        Err(e) => {
            release(&store).await;
            return Err(e);
        }
    };

    let report = seed_records(store, &records, max_batch_size).await?;
    Ok((records, report))
}

fn check_batch_size<S: BatchStore + ?Sized>(store: &S, requested: usize) -> Result<NonZeroUsize> {
    let limit = store.max_batch_size();
    match NonZeroUsize::new(requested) {
        Some(size) if requested <= limit => Ok(size),
        _ => Err(SeedError::config(format!(
            "batch size {} is outside 1..={} accepted by {}",
            requested,
            limit,
            store.name()
        ))),
    }
}

async fn release<S: BatchStore + ?Sized>(store: &S) {
    match store.close().await {
        Ok(()) => info!("{} connection closed", store.name()),
        Err(e) => warn!("Failed to close {}: {}", store.name(), e),
    }
}
