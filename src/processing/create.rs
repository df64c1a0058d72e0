//! Record insertion.

use serde::{Deserialize, Serialize};

use crate::error::{CrudError, CrudResult};
use crate::types::{Record, RecordSet, Value};

/// Where new records go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    /// After the existing records.
    #[default]
    Append,
    /// Before the existing records.
    Prepend,
}

impl InsertPosition {
    /// `"append"` appends; any other selector prepends.
    pub fn from_selector(s: &str) -> Self {
        if s == "append" { Self::Append } else { Self::Prepend }
    }
}

/// Turn a Create payload into the records it describes.
///
/// The payload may be:
///
/// - a JSON string, which is parsed first
/// - an object wrapped as `{"json": {...}}` (only unwrapped when the payload was not a string)
/// - a single object → one record
/// - an array of objects → one record per element
///
/// Empty payloads (`null`, `false`, `0`, `""`) and anything that is not an object or array of
/// objects are rejected.
pub fn parse_payload(payload: &serde_json::Value) -> CrudResult<Vec<Record>> {
    let data = match payload {
        serde_json::Value::String(text) => match serde_json::from_str::<serde_json::Value>(text) {
            Ok(parsed) => parsed,
            Err(_) => payload.clone(),
        },
        serde_json::Value::Object(map) => match map.get("json") {
            Some(inner) => inner.clone(),
            None => payload.clone(),
        },
        other => other.clone(),
    };

    match data {
        serde_json::Value::Object(map) => Ok(vec![object_record(map)]),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::Object(map) => Ok(object_record(map)),
                _ => Err(CrudError::unparseable_payload()),
            })
            .collect(),
        _ => Err(CrudError::unparseable_payload()),
    }
}

fn object_record(map: serde_json::Map<String, serde_json::Value>) -> Record {
    Record::from_pairs(map.into_iter().map(|(k, v)| (k, Value::from(v))))
}

/// Insert the records described by `payload` at `position`.
///
/// Nothing is inserted if the payload is rejected.
pub fn create(records: RecordSet, payload: &serde_json::Value, position: InsertPosition) -> CrudResult<RecordSet> {
    let new_records = parse_payload(payload)?;
    let mut out = Vec::with_capacity(records.len() + new_records.len());
    match position {
        InsertPosition::Append => {
            out.extend(records);
            out.extend(new_records);
        }
        InsertPosition::Prepend => {
            out.extend(new_records);
            out.extend(records);
        }
    }
    Ok(RecordSet::new(out))
}
