//! SQL script execution

use super::connection::SeedDatabase;
use crate::core::seed::SqlScript;
use crate::utils::error::{Result, SeedError};
use sea_orm::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// What a script run did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptReport {
    pub script: PathBuf,
    pub bytes: usize,
    pub rows_affected: u64,
    /// Rows returned by the summary query, one JSON object per row
    pub summary: Vec<JsonValue>,
    pub elapsed: Duration,
}

/// Execute `script` as a single multi-statement command, then run
/// `summary_query` if one is configured.
pub async fn execute_script(
    db: &SeedDatabase,
    script: &SqlScript,
    summary_query: Option<&str>,
) -> Result<ScriptReport> {
    info!("Executing SQL seed script {}...", script.path.display());
    let started = Instant::now();

    let result = db
        .connection()
        .execute_unprepared(&script.sql)
        .await
        .map_err(SeedError::Database)?;

    let summary = match summary_query {
        Some(query) => fetch_summary(db, query).await?,
        None => Vec::new(),
    };

    if !summary.is_empty() {
        info!("Summary:");
        for row in &summary {
            info!("  {}", row);
        }
    }

    Ok(ScriptReport {
        script: script.path.clone(),
        bytes: script.len(),
        rows_affected: result.rows_affected(),
        summary,
        elapsed: started.elapsed(),
    })
}

async fn fetch_summary(db: &SeedDatabase, query: &str) -> Result<Vec<JsonValue>> {
    let statement = Statement::from_string(db.backend(), query.to_string());
    <JsonValue as FromQueryResult>::find_by_statement(statement)
        .all(db.connection())
        .await
        .map_err(SeedError::Database)
}
