//! Fixture loading core
//!
//! Fixture Source -> Chunker -> Batch Writer -> Run Reporter, strictly
//! sequential and fail-fast.

mod chunker;
mod fixtures;
mod reporter;
mod runner;
mod targets;
mod types;
mod writer;

pub use chunker::{Chunks, batch_count, chunk};
pub use fixtures::{FixtureSource, SqlScript};
pub use reporter::RunReporter;
pub use runner::{load_records, seed_collection, seed_records};
pub use targets::{SeedTarget, seed_sql_target, seed_users};
pub use types::{
    Batch, MAX_BATCH_SIZE, Record, RunDisposition, RunReport, RunSummary, WriteOutcome,
};
pub use writer::BatchWriter;
