//! Relational database configuration

use super::env::EnvReader;
use super::{default_connection_timeout, default_host, default_max_connections, default_user};
use crate::utils::error::{Result, SeedError};
use serde::{Deserialize, Serialize};
use url::Url;

/// Relational engine behind a seed target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    Mysql,
    Postgres,
    Sqlite,
}

impl DatabaseEngine {
    /// URL scheme understood by the driver
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }

    /// Human readable engine name used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mysql => "MySQL",
            Self::Postgres => "PostgreSQL",
            Self::Sqlite => "SQLite",
        }
    }

    /// Whether `url` uses a scheme this engine accepts
    pub fn accepts_url(&self, url: &str) -> bool {
        match self {
            Self::Mysql => url.starts_with("mysql://"),
            Self::Postgres => url.starts_with("postgres://") || url.starts_with("postgresql://"),
            Self::Sqlite => url.starts_with("sqlite:"),
        }
    }

    /// Engine implied by the scheme of `url`
    pub fn detect(url: &str) -> Option<Self> {
        [Self::Mysql, Self::Postgres, Self::Sqlite]
            .into_iter()
            .find(|engine| engine.accepts_url(url))
    }
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub engine: DatabaseEngine,
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub database: String,
    /// Full connection URL; overrides host/port/credentials when set
    #[serde(default)]
    pub url: Option<String>,
    /// Maximum connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

impl DatabaseConfig {
    /// Configuration with the local development defaults for `engine`
    pub fn new(engine: DatabaseEngine, port: u16, database: &str) -> Self {
        Self {
            engine,
            host: default_host(),
            port,
            user: default_user(),
            password: "root".to_string(),
            database: database.to_string(),
            url: None,
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
        }
    }

    /// Configuration pointing at an explicit connection URL
    pub fn from_url(engine: DatabaseEngine, url: &str) -> Self {
        let mut config = Self::new(engine, 0, "");
        config.url = Some(url.to_string());
        config
    }

    /// Read `{prefix}_HOST`, `_PORT`, `_USER`, `_PASSWORD` and `_DATABASE`
    /// on top of `defaults`
    pub(crate) fn from_env(env: &EnvReader<'_>, prefix: &str, defaults: Self) -> Result<Self> {
        let key = |suffix: &str| format!("{}_{}", prefix, suffix);
        Ok(Self {
            host: env.string(&key("HOST"), &defaults.host),
            port: env.parse(&key("PORT"), defaults.port)?,
            user: env.string(&key("USER"), &defaults.user),
            password: env.string(&key("PASSWORD"), &defaults.password),
            database: env.string(&key("DATABASE"), &defaults.database),
            ..defaults
        })
    }

    /// Connection URL handed to the driver, with credentials percent-encoded
    pub fn connection_url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        if self.engine == DatabaseEngine::Sqlite {
            return Err(SeedError::config("SQLite targets need an explicit url"));
        }

        let mut url = Url::parse(&format!(
            "{}://{}:{}/{}",
            self.engine.scheme(),
            self.host,
            self.port,
            self.database
        ))
        .map_err(|e| SeedError::config(format!("Invalid database address: {}", e)))?;

        url.set_username(&self.user)
            .map_err(|_| SeedError::config("Database user cannot be set on this URL"))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|_| SeedError::config("Database password cannot be set on this URL"))?;
        }
        Ok(url.to_string())
    }

    /// `host:port/database`, or the URL without credentials
    pub fn display_target(&self) -> String {
        match &self.url {
            Some(raw) => match Url::parse(raw) {
                Ok(mut url) => {
                    let _ = url.set_password(None);
                    url.to_string()
                }
                Err(_) => raw.clone(),
            },
            None => format!("{}:{}/{}", self.host, self.port, self.database),
        }
    }
}
