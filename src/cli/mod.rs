//! Command line interface

mod commands;

pub use commands::run;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "db-seeds",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about = "Seed the microservice stores with fixture data"
)]
pub struct Cli {
    /// YAML configuration file; the environment is used when omitted
    #[arg(long, short, global = true, env = "SEED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level or filter directive, overrides LOG_LEVEL
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay the auth service SQL seed against MySQL
    Auth,
    /// Replay the order-product SQL seed against PostgreSQL
    Orders,
    /// Replay the inventory SQL seed against PostgreSQL
    Inventory,
    /// Load the users collection into DynamoDB
    Users(UsersArgs),
    /// Seed every target in order, stopping at the first failure
    All(AllArgs),
    /// Load any JSON fixture into a SQL table or DynamoDB table
    Load(LoadArgs),
    /// Render the users-service stack as a CloudFormation template
    Synth(SynthArgs),
    /// Check configuration and the stack definition, then exit
    Validate,
}

#[derive(Debug, Args)]
pub struct UsersArgs {
    /// Read and batch the fixture without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Records per batch (1-25)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

#[derive(Debug, Args)]
pub struct AllArgs {
    /// Read every fixture and script without touching any store
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// JSON fixture document
    #[arg(long)]
    pub source: PathBuf,

    /// Top-level array to read; the document root when omitted
    #[arg(long)]
    pub collection: Option<String>,

    /// Unique key field of every record
    #[arg(long, default_value = "id")]
    pub key: String,

    /// Fields to keep, comma separated; all fields when omitted
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Relational target; DynamoDB is used when omitted
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Destination table
    #[arg(long)]
    pub table: String,

    /// Records per batch (1-25)
    #[arg(long, default_value_t = crate::core::seed::MAX_BATCH_SIZE)]
    pub batch_size: usize,

    /// Read and batch the fixture without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct SynthArgs {
    /// Deployment stage, overrides STAGE
    #[arg(long)]
    pub stage: Option<String>,

    /// Write the template here instead of stdout
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}
