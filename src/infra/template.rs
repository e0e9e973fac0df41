//! CloudFormation rendering

use super::resources::*;
use super::stack::StackDefinition;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// A synthesized CloudFormation template
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    pub description: String,
    pub resources: BTreeMap<String, Value>,
    pub outputs: BTreeMap<String, Value>,
}

impl Template {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Validate `stack` and render it. Stack tags are applied to every resource,
/// with resource tags taking precedence.
pub fn synthesize(stack: &StackDefinition) -> Result<Template> {
    stack.validate()?;

    let resources = stack
        .resources
        .iter()
        .map(|resource| {
            let mut tags = stack.tags.clone();
            tags.extend(resource.tags().clone());
            (resource.logical_id().to_string(), render_resource(resource, &tags))
        })
        .collect();

    let outputs = stack
        .outputs
        .iter()
        .map(|output| (output.logical_id.clone(), render_output(output)))
        .collect();

    Ok(Template {
        format_version: "2010-09-09".to_string(),
        description: stack.description.clone(),
        resources,
        outputs,
    })
}

fn render_resource(resource: &Resource, tags: &Tags) -> Value {
    let (properties, removal) = match resource {
        Resource::Queue(queue) => (queue_properties(queue, tags), RemovalPolicy::Destroy),
        Resource::Table(table) => (table_properties(table, tags), table.removal),
    };

    json!({
        "Type": resource.cfn_type(),
        "Properties": properties,
        "UpdateReplacePolicy": removal.as_cfn(),
        "DeletionPolicy": removal.as_cfn(),
    })
}

fn queue_properties(queue: &QueueSpec, tags: &Tags) -> Value {
    let mut props = Map::new();
    props.insert("QueueName".into(), json!(queue.queue_name));
    if let Some(visibility) = queue.visibility_timeout {
        props.insert("VisibilityTimeout".into(), json!(visibility.as_secs()));
    }
    props.insert(
        "MessageRetentionPeriod".into(),
        json!(queue.retention.as_secs()),
    );
    if queue.encryption == QueueEncryption::SqsManaged {
        props.insert("SqsManagedSseEnabled".into(), json!(true));
    }
    if let Some(dead_letter) = &queue.dead_letter {
        props.insert(
            "RedrivePolicy".into(),
            json!({
                "deadLetterTargetArn": get_att(&dead_letter.queue, "Arn"),
                "maxReceiveCount": dead_letter.max_receive_count,
            }),
        );
    }
    props.insert("Tags".into(), render_tags(tags));
    Value::Object(props)
}

fn table_properties(table: &TableSpec, tags: &Tags) -> Value {
    let mut attributes = BTreeMap::new();
    attributes.insert(&table.partition_key.name, table.partition_key.kind);
    for index in &table.indexes {
        attributes.insert(&index.partition_key.name, index.partition_key.kind);
    }

    let mut props = Map::new();
    props.insert("TableName".into(), json!(table.table_name));
    props.insert(
        "KeySchema".into(),
        json!([{ "AttributeName": table.partition_key.name, "KeyType": "HASH" }]),
    );
    props.insert(
        "AttributeDefinitions".into(),
        Value::Array(
            attributes
                .into_iter()
                .map(|(name, kind)| json!({ "AttributeName": name, "AttributeType": kind.code() }))
                .collect(),
        ),
    );

    match table.billing {
        BillingMode::PayPerRequest => {
            props.insert("BillingMode".into(), json!("PAY_PER_REQUEST"));
        }
        BillingMode::Provisioned { read, write } => {
            props.insert(
                "ProvisionedThroughput".into(),
                json!({ "ReadCapacityUnits": read, "WriteCapacityUnits": write }),
            );
        }
    }

    if table.encryption == TableEncryption::AwsManaged {
        props.insert(
            "SSESpecification".into(),
            json!({ "SSEEnabled": true, "SSEType": "KMS" }),
        );
    }
    props.insert(
        "PointInTimeRecoverySpecification".into(),
        json!({ "PointInTimeRecoveryEnabled": table.point_in_time_recovery }),
    );
    props.insert(
        "DeletionProtectionEnabled".into(),
        json!(table.deletion_protection),
    );

    if !table.indexes.is_empty() {
        let indexes: Vec<Value> = table
            .indexes
            .iter()
            .map(|index| {
                json!({
                    "IndexName": index.name,
                    "KeySchema": [{ "AttributeName": index.partition_key.name, "KeyType": "HASH" }],
                    "Projection": { "ProjectionType": index.projection.as_cfn() },
                })
            })
            .collect();
        props.insert("GlobalSecondaryIndexes".into(), Value::Array(indexes));
    }

    props.insert("Tags".into(), render_tags(tags));
    Value::Object(props)
}

fn render_output(output: &OutputSpec) -> Value {
    let value = match &output.value {
        OutputValue::Ref(id) => json!({ "Ref": id }),
        OutputValue::GetAtt(id, attribute) => get_att(id, attribute),
    };

    let mut rendered = json!({
        "Description": output.description,
        "Value": value,
    });
    if let Some(export) = &output.export_name {
        rendered["Export"] = json!({ "Name": export });
    }
    rendered
}

fn get_att(id: &str, attribute: &str) -> Value {
    json!({ "Fn::GetAtt": [id, attribute] })
}

fn render_tags(tags: &Tags) -> Value {
    Value::Array(
        tags.iter()
            .map(|(key, value)| json!({ "Key": key, "Value": value }))
            .collect(),
    )
}
