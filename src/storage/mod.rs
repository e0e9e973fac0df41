//! Storage layer for the seed runs
//!
//! Every destination a batch can be written to implements [`BatchStore`].

/// Relational database storage module
pub mod database;
/// DynamoDB storage module
pub mod dynamodb;
mod memory;
mod store;

pub use database::{SeedDatabase, SqlTableStore};
pub use dynamodb::DynamoDbStore;
pub use memory::MemoryStore;
pub use store::{BatchStore, StoreError};
