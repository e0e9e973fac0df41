//! Stack and logging configuration validators

use super::trait_def::Validate;
use crate::config::models::*;

impl Validate for StackConfig {
    fn validate(&self) -> Result<(), String> {
        if self.stage.is_empty() {
            return Err("Stage cannot be empty".to_string());
        }

        if !self
            .stage
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(format!(
                "Stage '{}' may only contain letters, digits and '-'",
                self.stage
            ));
        }

        if let Some(account) = &self.account {
            if account.len() != 12 || !account.chars().all(|c| c.is_ascii_digit()) {
                return Err(format!("Account '{}' must be a 12 digit id", account));
            }
        }

        if self.region.is_empty() {
            return Err("Region cannot be empty".to_string());
        }

        if self.stack_name.is_empty() {
            return Err("Stack name cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}
