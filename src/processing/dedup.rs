//! Duplicate removal.

use std::collections::HashSet;

use crate::coercion::join_values;
use crate::types::{Record, RecordSet};

/// Keep the first record for each distinct key, preserving order.
///
/// With a non-empty comma-separated `unique_fields`, the key is those fields' rendered values
/// joined with `|` (missing and null values render empty, so they collide). With an empty list
/// the key is the record's full JSON serialization, which is sensitive to field order.
pub fn remove_duplicates(records: RecordSet, unique_fields: &str) -> RecordSet {
    let fields: Option<Vec<&str>> = if unique_fields.is_empty() {
        None
    } else {
        Some(unique_fields.split(',').map(str::trim).collect())
    };

    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(dedup_key(record, fields.as_deref())))
        .collect()
}

fn dedup_key(record: &Record, fields: Option<&[&str]>) -> String {
    match fields {
        Some(fields) => join_values(fields.iter().map(|f| record.get(f)), "|"),
        None => record.to_json_string(),
    }
}
