//! Aggregate statistics over a numeric field, optionally grouped.

use indexmap::IndexMap;

use crate::coercion::{display_string, is_falsy, to_number};
use crate::types::{Record, RecordSet, Value};

/// `{count, sum, avg, min, max}` over a set of numbers.
///
/// Over an empty set `avg` is `0`, `min` is `+Infinity` and `max` is `-Infinity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub count: usize,
    pub sum: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl Aggregate {
    /// Aggregate `values`.
    pub fn from_values(values: &[f64]) -> Self {
        let sum: f64 = values.iter().sum();
        let count = values.len();
        Self {
            count,
            sum,
            avg: if count > 0 { sum / count as f64 } else { 0.0 },
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }

    fn into_record(self, group: Option<String>) -> Record {
        let mut out = Record::new();
        if let Some(group) = group {
            out.insert("group", Value::String(group));
        }
        out.insert("count", Value::Number(self.count as f64));
        out.insert("sum", Value::Number(self.sum));
        out.insert("avg", Value::Number(self.avg));
        out.insert("min", Value::Number(self.min));
        out.insert("max", Value::Number(self.max));
        out
    }
}

/// Numeric reading of a field for statistics: `Number(v)`, with `NaN` counted as `0`.
fn stat_value(record: &Record, field: &str) -> f64 {
    let n = to_number(record.get(field));
    if n.is_nan() { 0.0 } else { n }
}

/// Group label: the rendered value, or `"undefined"` for any falsy value.
fn group_key(record: &Record, field: &str) -> String {
    let value = record.get(field);
    if is_falsy(value) {
        "undefined".to_string()
    } else {
        display_string(value)
    }
}

/// Summarize `field` across `records`.
///
/// Without `group_by` the result is a single `{count, sum, avg, min, max}` record. With it,
/// one `{group, count, sum, avg, min, max}` record per distinct group, in order of first
/// appearance.
pub fn statistics(records: &RecordSet, field: &str, group_by: Option<&str>) -> RecordSet {
    match group_by.filter(|g| !g.is_empty()) {
        None => {
            let values: Vec<f64> = records.iter().map(|r| stat_value(r, field)).collect();
            RecordSet::new(vec![Aggregate::from_values(&values).into_record(None)])
        }
        Some(group_field) => {
            let mut groups: IndexMap<String, Vec<f64>> = IndexMap::new();
            for record in records.iter() {
                groups
                    .entry(group_key(record, group_field))
                    .or_default()
                    .push(stat_value(record, field));
            }
            groups
                .into_iter()
                .map(|(group, values)| Aggregate::from_values(&values).into_record(Some(group)))
                .collect()
        }
    }
}
