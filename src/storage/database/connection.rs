use crate::config::{DatabaseConfig, DatabaseEngine};
use crate::utils::error::{Result, SeedError};
use sea_orm::*;
use std::time::Duration;
use tracing::{debug, info};

/// Pooled connection to one seed target
#[derive(Debug, Clone)]
pub struct SeedDatabase {
    db: DatabaseConnection,
    engine: DatabaseEngine,
}

impl SeedDatabase {
    /// Open the pool described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = config.connection_url()?;

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let db = Database::connect(opt)
            .await
            .map_err(SeedError::Database)?;

        info!(
            "Connected to {} ({})",
            config.engine.label(),
            config.display_target()
        );
        Ok(Self {
            db,
            engine: config.engine,
        })
    }

    pub fn engine(&self) -> DatabaseEngine {
        self.engine
    }

    /// Backend used to render statements
    pub fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the pool; clones of this handle are closed with it
    pub async fn close(&self) -> Result<()> {
        debug!("Closing {} connection pool", self.engine.label());
        self.db.clone().close().await.map_err(SeedError::Database)
    }
}
