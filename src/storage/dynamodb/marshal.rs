use crate::core::seed::Record;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::Value;
use std::collections::HashMap;

/// Convert a record into a DynamoDB item
pub fn record_to_item(record: &Record) -> HashMap<String, AttributeValue> {
    record
        .fields()
        .map(|(name, value)| (name.clone(), attribute(value)))
        .collect()
}

fn attribute(value: &Value) -> AttributeValue {
    match value {
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        // Records only carry scalars, anything else is stored as NULL
        _ => AttributeValue::Null(true),
    }
}
