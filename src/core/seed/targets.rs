//! Named seed targets of the local microservice stack

use super::fixtures::{FixtureSource, SqlScript};
use super::runner::seed_collection;
use super::types::{Record, RunReport};
use crate::config::{SqlSeedConfig, UsersSeedConfig};
use crate::storage::BatchStore;
use crate::storage::database::{ScriptReport, SeedDatabase, execute_script};
use crate::utils::error::Result;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// A service store populated by this tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedTarget {
    Auth,
    Orders,
    Inventory,
    Users,
}

impl SeedTarget {
    /// Every target, in the order `all` seeds them
    pub const ALL: [SeedTarget; 4] = [Self::Auth, Self::Orders, Self::Inventory, Self::Users];

    pub fn service(&self) -> &'static str {
        match self {
            Self::Auth => "Auth Service",
            Self::Orders => "Order-Product Service",
            Self::Inventory => "Inventory Service",
            Self::Users => "Users Service",
        }
    }
}

impl fmt::Display for SeedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auth => "auth",
            Self::Orders => "orders",
            Self::Inventory => "inventory",
            Self::Users => "users",
        };
        f.write_str(name)
    }
}

/// Replay a SQL script against a relational target.
///
/// The script is read before connecting; the connection is closed on every
/// path once opened.
pub async fn seed_sql_target(
    target: SeedTarget,
    config: &SqlSeedConfig,
    script_path: &Path,
) -> Result<ScriptReport> {
    info!(
        "Seeding {} ({})...",
        config.database.engine.label(),
        target.service()
    );
    info!("Target: {}", config.database.display_target());

    let script = SqlScript::load(script_path).await?;
    let db = SeedDatabase::connect(&config.database).await?;

    let result = execute_script(&db, &script, config.summary_query.as_deref()).await;

    match db.close().await {
        Ok(()) => info!("{} connection closed", config.database.engine.label()),
        Err(e) => warn!("Failed to close connection: {}", e),
    }

    let report = result?;
    info!("{} seed completed successfully!", target.service());
    Ok(report)
}

/// Load the users collection into `store`
pub async fn seed_users<S>(store: S, config: &UsersSeedConfig, fixture_path: &Path) -> Result<RunReport>
where
    S: BatchStore,
{
    info!("Seeding users to {}", store.name());

    let source = FixtureSource::new(fixture_path, &config.key_field)
        .collection(&config.collection)
        .fields(config.fields.iter().cloned());

    let (records, report) = seed_collection(store, &source, config.max_batch_size).await?;

    if report.is_success() {
        info!("Successfully seeded {} users", records.len());
        info!("User summary:");
        for user in &records {
            info!("  {}", describe_user(user, &config.key_field));
        }
    }

    Ok(report)
}

fn describe_user(user: &Record, key_field: &str) -> String {
    format!(
        "{} ({}) - Role: {} - ID: {}",
        field_text(user, "name"),
        field_text(user, "email"),
        field_text(user, "role"),
        field_text(user, key_field)
    )
}

fn field_text(record: &Record, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}
