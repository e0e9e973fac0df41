//! The users-service stack

use super::resources::*;
use crate::config::StackConfig;
use crate::utils::error::{Result, SeedError};
use std::collections::HashSet;
use std::time::Duration;

const DAY: u64 = 24 * 60 * 60;
const MIN_RETENTION: Duration = Duration::from_secs(60);
const MAX_RETENTION: Duration = Duration::from_secs(14 * DAY);
const MAX_VISIBILITY: Duration = Duration::from_secs(12 * 60 * 60);

/// A complete stack: resources, outputs and stack-level tags
#[derive(Debug, Clone, PartialEq)]
pub struct StackDefinition {
    pub name: String,
    pub description: String,
    pub stage: String,
    pub account: Option<String>,
    pub region: String,
    pub tags: Tags,
    pub resources: Vec<Resource>,
    pub outputs: Vec<OutputSpec>,
}

impl StackDefinition {
    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.logical_id() == logical_id)
    }

    pub fn table(&self, logical_id: &str) -> Option<&TableSpec> {
        match self.resource(logical_id) {
            Some(Resource::Table(table)) => Some(table),
            _ => None,
        }
    }

    pub fn queue(&self, logical_id: &str) -> Option<&QueueSpec> {
        match self.resource(logical_id) {
            Some(Resource::Queue(queue)) => Some(queue),
            _ => None,
        }
    }

    /// Check the definition is internally consistent
    pub fn validate(&self) -> Result<()> {
        if self.stage.trim().is_empty() {
            return Err(SeedError::validation("stack stage cannot be empty"));
        }

        let mut ids = HashSet::new();
        for id in self
            .resources
            .iter()
            .map(Resource::logical_id)
            .chain(self.outputs.iter().map(|o| o.logical_id.as_str()))
        {
            if id.is_empty() {
                return Err(SeedError::validation("logical id cannot be empty"));
            }
            if !ids.insert(id) {
                return Err(SeedError::validation(format!(
                    "duplicate logical id '{}'",
                    id
                )));
            }
        }

        for resource in &self.resources {
            match resource {
                Resource::Queue(queue) => self.validate_queue(queue)?,
                Resource::Table(table) => validate_table(table)?,
            }
        }

        for output in &self.outputs {
            if self.resource(output.value.target()).is_none() {
                return Err(SeedError::validation(format!(
                    "output '{}' references unknown resource '{}'",
                    output.logical_id,
                    output.value.target()
                )));
            }
        }

        Ok(())
    }

    fn validate_queue(&self, queue: &QueueSpec) -> Result<()> {
        if !(MIN_RETENTION..=MAX_RETENTION).contains(&queue.retention) {
            return Err(SeedError::validation(format!(
                "queue '{}' retention must be between 60 seconds and 14 days",
                queue.logical_id
            )));
        }

        if queue
            .visibility_timeout
            .is_some_and(|visibility| visibility > MAX_VISIBILITY)
        {
            return Err(SeedError::validation(format!(
                "queue '{}' visibility timeout cannot exceed 12 hours",
                queue.logical_id
            )));
        }

        if let Some(dead_letter) = &queue.dead_letter {
            if !(1..=1000).contains(&dead_letter.max_receive_count) {
                return Err(SeedError::validation(format!(
                    "queue '{}' max receive count must be between 1 and 1000",
                    queue.logical_id
                )));
            }
            if dead_letter.queue == queue.logical_id {
                return Err(SeedError::validation(format!(
                    "queue '{}' cannot be its own dead-letter queue",
                    queue.logical_id
                )));
            }
            if self.queue(&dead_letter.queue).is_none() {
                return Err(SeedError::validation(format!(
                    "queue '{}' dead-letter target '{}' is not a queue in this stack",
                    queue.logical_id, dead_letter.queue
                )));
            }
        }

        Ok(())
    }
}

fn validate_table(table: &TableSpec) -> Result<()> {
    if table.partition_key.name.is_empty() {
        return Err(SeedError::validation(format!(
            "table '{}' needs a partition key",
            table.logical_id
        )));
    }

    let mut names = HashSet::new();
    for index in &table.indexes {
        if !names.insert(index.name.as_str()) {
            return Err(SeedError::validation(format!(
                "table '{}' declares index '{}' twice",
                table.logical_id, index.name
            )));
        }
    }

    Ok(())
}

/// Users-service infrastructure for `config.stage`
pub fn users_service_stack(config: &StackConfig) -> StackDefinition {
    let stage = config.stage.as_str();
    let prod = config.is_production();

    let dlq = QueueSpec {
        logical_id: "UserCreatedDLQ".to_string(),
        queue_name: format!("user-created-dlq-{}", stage),
        visibility_timeout: None,
        retention: Duration::from_secs(14 * DAY),
        encryption: QueueEncryption::SqsManaged,
        dead_letter: None,
        tags: service_tags("users-service", "messaging"),
    };

    let queue = QueueSpec {
        logical_id: "UserCreatedQueue".to_string(),
        queue_name: format!("user-created-queue-{}", stage),
        visibility_timeout: Some(Duration::from_secs(30)),
        retention: Duration::from_secs(4 * DAY),
        encryption: QueueEncryption::SqsManaged,
        dead_letter: Some(DeadLetterSpec {
            queue: dlq.logical_id.clone(),
            max_receive_count: 3,
        }),
        tags: service_tags("users-service", "messaging"),
    };

    let table = TableSpec {
        logical_id: "UsersTable".to_string(),
        table_name: format!("users-service-db-{}", stage),
        partition_key: KeySpec::string("id"),
        billing: BillingMode::PayPerRequest,
        encryption: TableEncryption::AwsManaged,
        point_in_time_recovery: prod,
        deletion_protection: prod,
        removal: if prod {
            RemovalPolicy::Retain
        } else {
            RemovalPolicy::Destroy
        },
        indexes: vec![IndexSpec {
            name: "EmailIndex".to_string(),
            partition_key: KeySpec::string("email"),
            projection: Projection::All,
        }],
        tags: service_tags("users-service", "database"),
    };

    let outputs = vec![
        output(
            "UsersTableName",
            OutputValue::Ref(table.logical_id.clone()),
            "Name of the users DynamoDB table",
            stage,
        ),
        output(
            "UsersTableArn",
            OutputValue::GetAtt(table.logical_id.clone(), "Arn".to_string()),
            "ARN of the users DynamoDB table",
            stage,
        ),
        output(
            "UserCreatedQueueUrl",
            OutputValue::Ref(queue.logical_id.clone()),
            "URL of the UserCreated SQS queue",
            stage,
        ),
        output(
            "UserCreatedQueueArn",
            OutputValue::GetAtt(queue.logical_id.clone(), "Arn".to_string()),
            "ARN of the UserCreated SQS queue",
            stage,
        ),
        output(
            "UserCreatedDLQUrl",
            OutputValue::Ref(dlq.logical_id.clone()),
            "URL of the UserCreated dead-letter queue",
            stage,
        ),
    ];

    let tags = Tags::from([
        ("Project".to_string(), config.project.clone()),
        ("ManagedBy".to_string(), "AWS-CDK".to_string()),
        ("Environment".to_string(), stage.to_string()),
    ]);

    StackDefinition {
        name: config.stack_name.clone(),
        description: "Infrastructure for serverless users service - DynamoDB + SQS".to_string(),
        stage: stage.to_string(),
        account: config.account.clone(),
        region: config.region.clone(),
        tags,
        resources: vec![
            Resource::Queue(dlq),
            Resource::Queue(queue),
            Resource::Table(table),
        ],
        outputs,
    }
}

fn output(id: &str, value: OutputValue, description: &str, stage: &str) -> OutputSpec {
    OutputSpec {
        logical_id: id.to_string(),
        value,
        description: description.to_string(),
        export_name: Some(format!("{}-{}", id, stage)),
    }
}
