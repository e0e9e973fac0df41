//! Storage configuration validators
//!
//! Validation for DatabaseConfig, DynamoDbConfig and the seed targets built on them.

use super::trait_def::Validate;
use crate::config::models::*;
use crate::core::seed::MAX_BATCH_SIZE;
use tracing::debug;

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.url {
            if !self.engine.accepts_url(url) {
                return Err(format!(
                    "Database URL does not match engine {}",
                    self.engine.label()
                ));
            }
        } else {
            if self.host.is_empty() {
                return Err("Database host cannot be empty".to_string());
            }
            if self.port == 0 {
                return Err("Database port must be greater than 0".to_string());
            }
            if self.database.is_empty() {
                return Err("Database name cannot be empty".to_string());
            }
            if self.user.is_empty() {
                return Err("Database user cannot be empty".to_string());
            }
        }

        if self.max_connections == 0 {
            return Err("Database max connections must be greater than 0".to_string());
        }

        if self.max_connections > 1000 {
            return Err("Database max connections should not exceed 1000".to_string());
        }

        if self.connection_timeout == 0 {
            return Err("Database connection timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for SqlSeedConfig {
    fn validate(&self) -> Result<(), String> {
        self.database.validate()?;

        if self.script.as_os_str().is_empty() {
            return Err("Seed script path cannot be empty".to_string());
        }

        if let Some(query) = &self.summary_query {
            if query.trim().is_empty() {
                return Err("Summary query cannot be blank".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for DynamoDbConfig {
    fn validate(&self) -> Result<(), String> {
        if self.region.is_empty() {
            return Err("DynamoDB region cannot be empty".to_string());
        }

        validate_table_name(&self.table_name)?;

        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err("DynamoDB endpoint must start with http:// or https://".to_string());
            }
        }

        if self.timeout_ms == Some(0) {
            return Err("DynamoDB timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for UsersSeedConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating users seed configuration");

        self.dynamodb.validate()?;

        if self.max_batch_size == 0 || self.max_batch_size > MAX_BATCH_SIZE {
            return Err(format!(
                "Batch size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, self.max_batch_size
            ));
        }

        if self.key_field.is_empty() {
            return Err("Key field cannot be empty".to_string());
        }

        if !self.fields.is_empty() && !self.fields.contains(&self.key_field) {
            return Err(format!(
                "Projected fields must include the key field '{}'",
                self.key_field
            ));
        }

        if self.collection.is_empty() {
            return Err("Fixture collection cannot be empty".to_string());
        }

        Ok(())
    }
}

/// DynamoDB table naming rules: 3-255 characters of `[A-Za-z0-9_.-]`
pub(super) fn validate_table_name(name: &str) -> Result<(), String> {
    if name.len() < 3 || name.len() > 255 {
        return Err(format!(
            "Table name '{}' must be between 3 and 255 characters",
            name
        ));
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(format!(
            "Table name '{}' contains invalid character '{}'",
            name, c
        ));
    }

    Ok(())
}
