//! Key-value store configuration

use super::default_region;
use super::env::EnvReader;
use serde::{Deserialize, Serialize};

/// Local DynamoDB endpoint used when no override is set
pub const DEFAULT_DYNAMODB_ENDPOINT: &str = "http://localhost:8000";

/// DynamoDB configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamoDbConfig {
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint override (DynamoDB Local, LocalStack); `None` targets AWS
    #[serde(default)]
    pub endpoint: Option<String>,
    pub table_name: String,
    /// Per-operation timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for DynamoDbConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: Some(DEFAULT_DYNAMODB_ENDPOINT.to_string()),
            table_name: "users-service-db".to_string(),
            timeout_ms: None,
        }
    }
}

impl DynamoDbConfig {
    pub(crate) fn from_env(env: &EnvReader<'_>) -> Self {
        let defaults = Self::default();
        Self {
            region: env
                .first(&["REGION", "AWS_REGION"])
                .unwrap_or(defaults.region),
            endpoint: env.get("DYNAMODB_ENDPOINT").or(defaults.endpoint),
            table_name: env.string("USERS_TABLE", &defaults.table_name),
            timeout_ms: defaults.timeout_ms,
        }
    }

    /// Whether requests go to a local emulator with static credentials
    pub fn is_local(&self) -> bool {
        self.endpoint.is_some()
    }
}
