//! DynamoDB storage
//!
//! Batches are written with `BatchWriteItem` put requests.

mod client;
mod marshal;

pub use client::DynamoDbStore;
pub use marshal::record_to_item;
