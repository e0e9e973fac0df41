use super::marshal::record_to_item;
use crate::config::DynamoDbConfig;
use crate::core::seed::Batch;
use crate::storage::{BatchStore, StoreError};
use crate::utils::error::{Result, SeedError};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::types::{PutRequest, WriteRequest};
use aws_smithy_types::timeout::TimeoutConfig;
use std::time::Duration;
use tracing::{debug, info, warn};

/// DynamoDB table accepting `BatchWriteItem` requests
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
    name: String,
}

impl DynamoDbStore {
    /// Build a client for `config`.
    ///
    /// An explicit endpoint means a local emulator, which is given static
    /// credentials so no AWS profile is needed.
    pub async fn connect(config: &DynamoDbConfig) -> Result<Self> {
        if config.table_name.trim().is_empty() {
            return Err(SeedError::config("DynamoDB table name cannot be empty"));
        }

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.endpoint {
            builder = builder
                .endpoint_url(endpoint)
                .credentials_provider(Credentials::new("local", "local", None, None, "static"));
        }
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_millis(timeout_ms))
                    .build(),
            );
        }

        info!(
            "DynamoDB client ready: table={}, region={}, endpoint={}",
            config.table_name,
            config.region,
            config.endpoint.as_deref().unwrap_or("aws")
        );
        Ok(Self::from_client(
            Client::from_conf(builder.build()),
            config.table_name.clone(),
        ))
    }

    /// Wrap an existing client
    pub fn from_client(client: Client, table_name: impl Into<String>) -> Self {
        let table_name = table_name.into();
        Self {
            name: format!("DynamoDB table {}", table_name),
            client,
            table_name,
        }
    }
}

#[async_trait]
impl BatchStore for DynamoDbStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn submit(&self, batch: &Batch<'_>) -> std::result::Result<(), StoreError> {
        let requests = batch
            .records()
            .iter()
            .map(|record| {
                let put = PutRequest::builder()
                    .set_item(Some(record_to_item(record)))
                    .build()
                    .map_err(|e| StoreError::Rejected(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<std::result::Result<Vec<_>, StoreError>>()?;

        let output = self
            .client
            .batch_write_item()
            .request_items(&self.table_name, requests)
            .send()
            .await
            .map_err(classify)?;

        // Unprocessed items are throttled writes, not refusals
        let unprocessed: usize = output
            .unprocessed_items()
            .map(|items| items.values().map(Vec::len).sum())
            .unwrap_or(0);
        if unprocessed > 0 {
            warn!(
                "Batch {}: {} items left unprocessed by {}",
                batch.number(),
                unprocessed,
                self.table_name
            );
        } else {
            debug!("Batch {} written to {}", batch.number(), self.table_name);
        }
        Ok(())
    }
}

fn classify<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::ConstructionFailure(_) => StoreError::Configuration(message),
        SdkError::ServiceError(_) => StoreError::Rejected(message),
        _ => StoreError::Transport(message),
    }
}
