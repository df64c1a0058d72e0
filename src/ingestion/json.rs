//! JSON record loading.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single JSON object, loaded as one record
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Objects keep their key order and nested values as they are. No coercion is applied: a JSON
//! string stays a string even when it looks like a number or a date.

use std::fs;
use std::path::Path;

use crate::error::{CrudError, CrudResult};
use crate::types::{Record, RecordSet, Value};

/// Load JSON records from a file.
pub fn ingest_json_from_path(path: impl AsRef<Path>) -> CrudResult<RecordSet> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text)
}

/// Load JSON records from an in-memory string.
pub fn ingest_json_from_str(input: &str) -> CrudResult<RecordSet> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(RecordSet::default());
    }

    // A single document first, then NDJSON.
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => records_from_values(items),
            serde_json::Value::Object(_) => records_from_values(vec![v]),
            _ => Err(CrudError::MalformedRecords {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| CrudError::MalformedRecords {
                message: format!("invalid ndjson at line {}: {}", i + 1, e),
            })?;
            values.push(v);
        }
        records_from_values(values)
    }
}

fn records_from_values(values: Vec<serde_json::Value>) -> CrudResult<RecordSet> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx0, v)| match Value::from(v) {
            Value::Object(fields) => Ok(Record::from(fields)),
            _ => Err(CrudError::MalformedRecords {
                message: format!("row {} is not a json object", idx0 + 1),
            }),
        })
        .collect::<CrudResult<Vec<_>>>()
        .map(RecordSet::from)
}
