//! Resource declarations

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Tags keyed by name; iteration order is the key order
pub type Tags = BTreeMap<String, String>;

/// Server-side encryption of a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueueEncryption {
    SqsManaged,
    Unencrypted,
}

/// Redrive target for messages that keep failing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadLetterSpec {
    /// Logical id of the dead-letter queue
    pub queue: String,
    pub max_receive_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueSpec {
    pub logical_id: String,
    pub queue_name: String,
    pub visibility_timeout: Option<Duration>,
    pub retention: Duration,
    pub encryption: QueueEncryption,
    pub dead_letter: Option<DeadLetterSpec>,
    pub tags: Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeType {
    String,
    Number,
    Binary,
}

impl AttributeType {
    /// DynamoDB scalar type code
    pub fn code(&self) -> &'static str {
        match self {
            Self::String => "S",
            Self::Number => "N",
            Self::Binary => "B",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeySpec {
    pub name: String,
    pub kind: AttributeType,
}

impl KeySpec {
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeType::String,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BillingMode {
    PayPerRequest,
    Provisioned { read: u32, write: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableEncryption {
    /// Key owned by DynamoDB
    Default,
    /// AWS managed KMS key
    AwsManaged,
}

/// What happens to the physical resource when the stack lets go of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RemovalPolicy {
    Retain,
    Destroy,
}

impl RemovalPolicy {
    pub fn as_cfn(&self) -> &'static str {
        match self {
            Self::Retain => "Retain",
            Self::Destroy => "Delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Projection {
    All,
    KeysOnly,
}

impl Projection {
    pub fn as_cfn(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::KeysOnly => "KEYS_ONLY",
        }
    }
}

/// Global secondary index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSpec {
    pub name: String,
    pub partition_key: KeySpec,
    pub projection: Projection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    pub logical_id: String,
    pub table_name: String,
    pub partition_key: KeySpec,
    pub billing: BillingMode,
    pub encryption: TableEncryption,
    pub point_in_time_recovery: bool,
    pub deletion_protection: bool,
    pub removal: RemovalPolicy,
    pub indexes: Vec<IndexSpec>,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Resource {
    Queue(QueueSpec),
    Table(TableSpec),
}

impl Resource {
    pub fn logical_id(&self) -> &str {
        match self {
            Self::Queue(queue) => &queue.logical_id,
            Self::Table(table) => &table.logical_id,
        }
    }

    pub fn tags(&self) -> &Tags {
        match self {
            Self::Queue(queue) => &queue.tags,
            Self::Table(table) => &table.tags,
        }
    }

    pub fn cfn_type(&self) -> &'static str {
        match self {
            Self::Queue(_) => "AWS::SQS::Queue",
            Self::Table(_) => "AWS::DynamoDB::Table",
        }
    }
}

/// Value of a stack output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OutputValue {
    /// The resource's primary identifier (table name, queue URL)
    Ref(String),
    /// A named attribute of a resource
    GetAtt(String, String),
}

impl OutputValue {
    /// Logical id this value points at
    pub fn target(&self) -> &str {
        match self {
            Self::Ref(id) | Self::GetAtt(id, _) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSpec {
    pub logical_id: String,
    pub value: OutputValue,
    pub description: String,
    pub export_name: Option<String>,
}

/// Tags every resource in a service carries
pub(crate) fn service_tags(service: &str, resource_type: &str) -> Tags {
    Tags::from([
        ("Service".to_string(), service.to_string()),
        ("ResourceType".to_string(), resource_type.to_string()),
    ])
}
