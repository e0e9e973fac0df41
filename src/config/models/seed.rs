//! Seed target configuration

use super::database::{DatabaseConfig, DatabaseEngine};
use super::default_batch_size;
use super::dynamodb::DynamoDbConfig;
use super::env::EnvReader;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Credentials per role after the auth seed
pub const AUTH_SUMMARY: &str =
    "SELECT role, COUNT(*) AS users FROM auth_credentials GROUP BY role ORDER BY role";

/// Stocked products and units after the inventory seed
pub const INVENTORY_SUMMARY: &str =
    "SELECT COUNT(*) AS products, COALESCE(SUM(quantity), 0)::BIGINT AS units FROM inventory";

/// A relational target seeded from a SQL script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlSeedConfig {
    pub database: DatabaseConfig,
    /// Script path, relative to the data directory unless absolute
    pub script: PathBuf,
    /// Query run after the script whose rows are logged as a summary
    #[serde(default)]
    pub summary_query: Option<String>,
}

impl SqlSeedConfig {
    /// Auth service credentials (MySQL)
    pub fn auth_defaults() -> Self {
        Self {
            database: DatabaseConfig::new(DatabaseEngine::Mysql, 3307, "users_db"),
            script: PathBuf::from("mysql-auth-seed.sql"),
            summary_query: Some(AUTH_SUMMARY.to_string()),
        }
    }

    /// Order-product service (PostgreSQL)
    pub fn orders_defaults() -> Self {
        Self {
            database: DatabaseConfig::new(DatabaseEngine::Postgres, 5432, "order_product_db"),
            script: PathBuf::from("postgres-order-product-seed.sql"),
            summary_query: None,
        }
    }

    /// Inventory service (PostgreSQL)
    pub fn inventory_defaults() -> Self {
        Self {
            database: DatabaseConfig::new(DatabaseEngine::Postgres, 5434, "inventory_db"),
            script: PathBuf::from("postgres-inventory-seed.sql"),
            summary_query: Some(INVENTORY_SUMMARY.to_string()),
        }
    }

    pub(crate) fn from_env(env: &EnvReader<'_>, prefix: &str, defaults: Self) -> Result<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env(env, prefix, defaults.database)?,
            ..defaults
        })
    }
}

/// The users collection loaded into the key-value store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersSeedConfig {
    #[serde(default)]
    pub dynamodb: DynamoDbConfig,
    /// Fixture document, relative to the data directory unless absolute
    #[serde(default = "default_users_fixture")]
    pub fixture: PathBuf,
    /// Top-level array inside the fixture document
    #[serde(default = "default_users_collection")]
    pub collection: String,
    /// Fields copied into each item; empty copies every field
    #[serde(default = "default_users_fields")]
    pub fields: Vec<String>,
    /// Partition key of the table
    #[serde(default = "default_key_field")]
    pub key_field: String,
    #[serde(default = "default_batch_size")]
    pub max_batch_size: usize,
}

impl Default for UsersSeedConfig {
    fn default() -> Self {
        Self {
            dynamodb: DynamoDbConfig::default(),
            fixture: default_users_fixture(),
            collection: default_users_collection(),
            fields: default_users_fields(),
            key_field: default_key_field(),
            max_batch_size: default_batch_size(),
        }
    }
}

impl UsersSeedConfig {
    pub(crate) fn from_env(env: &EnvReader<'_>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            dynamodb: DynamoDbConfig::from_env(env),
            max_batch_size: env.parse("SEED_BATCH_SIZE", defaults.max_batch_size)?,
            ..defaults
        })
    }
}

fn default_users_fixture() -> PathBuf {
    PathBuf::from("master-data.json")
}

fn default_users_collection() -> String {
    "users".to_string()
}

fn default_users_fields() -> Vec<String> {
    ["id", "name", "email", "role", "avatar"]
        .iter()
        .map(|f| f.to_string())
        .collect()
}

fn default_key_field() -> String {
    "id".to_string()
}
