//! db-seeds - seed the microservice stores with fixture data

#![allow(missing_docs)]

use clap::Parser;
use db_seeds::SeedConfig;
use db_seeds::cli::{self, Cli};
use db_seeds::utils::logging::init_logging;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; real environment variables win
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = match SeedConfig::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    init_logging(&config.logging);

    match cli::run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Seed failed: {}", e);
            if e.is_fatal_before_write() {
                error!("No writes were attempted");
            }
            ExitCode::FAILURE
        }
    }
}
