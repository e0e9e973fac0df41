//! Infrastructure stack configuration

use super::env::EnvReader;
use super::{default_region, default_stage};
use serde::{Deserialize, Serialize};

/// Settings for the users-service stack definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackConfig {
    /// Deployment stage, suffixed onto every physical resource name
    #[serde(default = "default_stage")]
    pub stage: String,
    /// Target account, if pinned
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_stack_name")]
    pub stack_name: String,
    /// Value of the `Project` tag
    #[serde(default = "default_project")]
    pub project: String,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stage: default_stage(),
            account: None,
            region: default_region(),
            stack_name: default_stack_name(),
            project: default_project(),
        }
    }
}

impl StackConfig {
    pub(crate) fn from_env(env: &EnvReader<'_>) -> Self {
        let defaults = Self::default();
        Self {
            stage: env.string("STAGE", &defaults.stage),
            account: env.first(&["CDK_DEFAULT_ACCOUNT", "AWS_ACCOUNT_ID"]),
            region: env
                .first(&["CDK_DEFAULT_REGION", "AWS_REGION"])
                .unwrap_or(defaults.region),
            ..defaults
        }
    }

    pub fn is_production(&self) -> bool {
        self.stage == "prod"
    }
}

fn default_stack_name() -> String {
    "UsersServiceStack".to_string()
}

fn default_project() -> String {
    "EcommerceMicroservices".to_string()
}
