use crate::error::SourceError;
use crate::model::{FieldValue, Row};
use serde_json::Value;
use std::io::Read;

/// Read a JSON array of objects. Key order within each object is kept.
pub fn read_json<Rd: Read>(reader: Rd) -> Result<Vec<Row>, SourceError> {
    let document: Value = serde_json::from_reader(reader)?;

    let items = match document {
        Value::Array(items) => items,
        other => {
            return Err(SourceError::NotAnArray {
                found: kind(&other),
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => Ok(object
                .iter()
                .map(|(k, v)| (k.clone(), FieldValue::from(v)))
                .collect()),
            _ => Err(SourceError::NotAnObject { index }),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
