//! Configuration data models
//!
//! This module defines all configuration structures used throughout the seeder.

pub mod database;
pub mod dynamodb;
pub(crate) mod env;
pub mod logging;
pub mod seed;
pub mod stack;

// Re-export all configuration types
pub use database::*;
pub use dynamodb::*;
pub use logging::*;
pub use seed::*;
pub use stack::*;

/// Default database host
pub fn default_host() -> String {
    "localhost".to_string()
}

/// Default database user
pub fn default_user() -> String {
    "root".to_string()
}

/// Default maximum pool connections
pub fn default_max_connections() -> u32 {
    5
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    10
}

/// Default AWS region
pub fn default_region() -> String {
    "us-east-1".to_string()
}

/// Default batch size, the `BatchWriteItem` request limit
pub fn default_batch_size() -> usize {
    crate::core::seed::MAX_BATCH_SIZE
}

/// Default deployment stage
pub fn default_stage() -> String {
    "dev".to_string()
}
