//! # db-seeds
//!
//! Fixture seeding for the e-commerce microservice stores.
//!
//! ## Features
//!
//! - **SQL targets**: replay seed scripts against the auth (MySQL),
//!   order-product and inventory (PostgreSQL) databases
//! - **Batched loads**: read a JSON fixture collection and write it to a keyed
//!   store in batches of at most 25 records
//! - **Fail-fast**: the first rejected batch ends the run with a non-zero exit
//! - **Infrastructure**: the users-service DynamoDB + SQS stack as data,
//!   rendered to a CloudFormation template
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use db_seeds::core::seed::{FixtureSource, seed_collection};
//! use db_seeds::storage::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> db_seeds::Result<()> {
//!     let store = MemoryStore::new("users", "id")?;
//!     let source = FixtureSource::new("seeds/master-data.json", "id").collection("users");
//!
//!     let (records, report) = seed_collection(store, &source, 25).await?;
//!     println!("{} records: {}", records.len(), report.into_result()?);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]

pub mod cli;
pub mod config;
pub mod core;
pub mod infra;
pub mod storage;
pub mod utils;

pub use config::SeedConfig;
pub use utils::error::{Result, SeedError};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Seconds since the epoch at build time
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
