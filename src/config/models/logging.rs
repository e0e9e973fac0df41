//! Logging configuration

use super::env::EnvReader;
use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level or filter directive, e.g. `info` or `db_seeds=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    pub(crate) fn from_env(env: &EnvReader<'_>) -> Self {
        Self {
            level: env.string("LOG_LEVEL", &default_log_level()),
            json: env
                .get("LOG_FORMAT")
                .is_some_and(|format| format.eq_ignore_ascii_case("json")),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
