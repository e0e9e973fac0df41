//! Splits a record sequence into bounded batches

use super::types::{Batch, Record};
use std::iter::{Enumerate, FusedIterator};
use std::num::NonZeroUsize;
use std::slice;

/// Number of batches `total` records split into with `max_batch_size`
pub fn batch_count(total: usize, max_batch_size: NonZeroUsize) -> usize {
    total.div_ceil(max_batch_size.get())
}

/// Lazily partition `records` into batches of at most `max_batch_size`,
/// preserving order. Only the last batch may be shorter.
pub fn chunk(records: &[Record], max_batch_size: NonZeroUsize) -> Chunks<'_> {
    Chunks {
        inner: records.chunks(max_batch_size.get()).enumerate(),
    }
}

/// Iterator returned by [`chunk`]
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    inner: Enumerate<slice::Chunks<'a, Record>>,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(index, records)| Batch::new(index, records))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Chunks<'_> {}

impl FusedIterator for Chunks<'_> {}
