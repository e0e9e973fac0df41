//! Seed data model: records, batches, outcomes and run summaries

use crate::utils::error::{Result, SeedError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// `BatchWriteItem` accepts at most 25 put requests per call
pub const MAX_BATCH_SIZE: usize = 25;

/// One fixture row: field name to scalar value, immutable once read
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Build a record, rejecting values that are not strings, numbers or null
    pub fn new(fields: Map<String, Value>) -> Result<Self> {
        if let Some((name, value)) = fields
            .iter()
            .find(|(_, value)| !matches!(value, Value::String(_) | Value::Number(_) | Value::Null))
        {
            return Err(SeedError::malformed(format!(
                "field '{}' has unsupported {} value; only strings, numbers and null are supported",
                name,
                value_kind(value)
            )));
        }
        Ok(Self(fields))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String value of `field`, used as the record key
    pub fn key(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A bounded, ordered slice of records submitted in one request
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    index: usize,
    records: &'a [Record],
}

impl<'a> Batch<'a> {
    pub fn new(index: usize, records: &'a [Record]) -> Self {
        Self { index, records }
    }

    /// Zero-based position in submission order
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based position, as shown to operators
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn records(&self) -> &'a [Record] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Result of submitting one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum WriteOutcome {
    Success,
    Failure(String),
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Outcomes of a load, in submission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total_records: usize,
    /// Batches the input was partitioned into
    pub total_batches: usize,
    /// One entry per submitted batch
    pub outcomes: Vec<WriteOutcome>,
}

impl RunSummary {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Index and reason of the first failed batch
    pub fn first_failure(&self) -> Option<(usize, &str)> {
        self.outcomes
            .iter()
            .enumerate()
            .find_map(|(index, outcome)| match outcome {
                WriteOutcome::Failure(reason) => Some((index, reason.as_str())),
                WriteOutcome::Success => None,
            })
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records in {} batches ({} attempted, {} succeeded)",
            self.total_records,
            self.total_batches,
            self.attempted(),
            self.succeeded()
        )
    }
}

/// Final state of a load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "disposition", rename_all = "snake_case")]
pub enum RunDisposition {
    Succeeded,
    Failed { batch_index: usize, reason: String },
}

/// Summary plus disposition, as handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub summary: RunSummary,
    pub disposition: RunDisposition,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.disposition == RunDisposition::Succeeded
    }

    /// Process exit status: 0 on full success, 1 otherwise
    pub fn exit_status(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }

    /// The summary on success, the first failure as the terminal error otherwise
    pub fn into_result(self) -> Result<RunSummary> {
        match self.disposition {
            RunDisposition::Succeeded => Ok(self.summary),
            RunDisposition::Failed {
                batch_index,
                reason,
            } => Err(SeedError::BatchFailed {
                index: batch_index,
                reason,
            }),
        }
    }
}
