//! Configuration management for the seeder
//!
//! A single [`SeedConfig`] is built once at process start, from the
//! environment or a YAML file, and passed by reference to every store
//! constructor. Nothing below this module reads the environment.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, SeedError};
use models::env::EnvReader;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration struct for the seeder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Directory holding the fixture documents and SQL scripts
    pub data_dir: PathBuf,
    /// Auth service MySQL database
    pub auth: SqlSeedConfig,
    /// Order-product service PostgreSQL database
    pub orders: SqlSeedConfig,
    /// Inventory service PostgreSQL database
    pub inventory: SqlSeedConfig,
    /// Users table in the key-value store
    pub users: UsersSeedConfig,
    /// Users-service infrastructure stack
    pub stack: StackConfig,
    pub logging: LoggingConfig,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            auth: SqlSeedConfig::auth_defaults(),
            orders: SqlSeedConfig::orders_defaults(),
            inventory: SqlSeedConfig::inventory_defaults(),
            users: UsersSeedConfig::default(),
            stack: StackConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SeedConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvReader::new(&lookup);
        let config = Self {
            data_dir: env
                .get("SEED_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            auth: SqlSeedConfig::from_env(&env, "MYSQL", SqlSeedConfig::auth_defaults())?,
            orders: SqlSeedConfig::from_env(
                &env,
                "POSTGRES_ORDER",
                SqlSeedConfig::orders_defaults(),
            )?,
            inventory: SqlSeedConfig::from_env(
                &env,
                "POSTGRES_INVENTORY",
                SqlSeedConfig::inventory_defaults(),
            )?,
            users: UsersSeedConfig::from_env(&env)?,
            stack: StackConfig::from_env(&env),
            logging: LoggingConfig::from_env(&env),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SeedError::config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| SeedError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// File when given, environment otherwise
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path).await,
            None => Self::from_env(),
        }
    }

    /// Resolve a fixture path against the data directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        let sections: [(&str, &dyn Validate); 6] = [
            ("auth", &self.auth),
            ("orders", &self.orders),
            ("inventory", &self.inventory),
            ("users", &self.users),
            ("stack", &self.stack),
            ("logging", &self.logging),
        ];
        for (name, section) in sections {
            section
                .validate()
                .map_err(|e| SeedError::config(format!("{} config error: {}", name, e)))?;
        }

        debug!("Configuration validation completed");
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("seeds")
}
