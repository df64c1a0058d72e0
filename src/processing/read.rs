//! Read modes other than filtering: sort, search, limit and positional cell reads.
//!
//! Every function here returns a fresh [`RecordSet`]; the input is never modified.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::coercion::display_string;
use crate::range::parse_indices;
use crate::types::{Record, RecordSet, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `"asc"` sorts ascending; any other selector sorts descending.
    pub fn from_selector(s: &str) -> Self {
        if s == "asc" { Self::Asc } else { Self::Desc }
    }
}

/// Stable sort by `field`.
///
/// Two numbers compare numerically. Every other pairing compares the rendered values with
/// [`locale_compare`], so a missing field sorts as the text `undefined`.
pub fn sort(records: &RecordSet, field: &str, order: SortOrder) -> RecordSet {
    let mut out = records.records.clone();
    out.sort_by(|a, b| {
        let ord = compare_field(a.get(field), b.get(field));
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    RecordSet::new(out)
}

fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => locale_compare(&display_string(a), &display_string(b)),
    }
}

/// Case-folding string comparison.
///
/// Strings are ordered by their lower-cased characters first; only when those are equal does
/// case decide, with lowercase ahead of uppercase (`"a" < "A" < "b"`).
///
/// Everything else, punctuation and CJK text included, orders by code point, so `"_"` sorts
/// before letters and `"~"` after them where a `zh-TW` collator would differ.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(a).cmp(&folded(b)).then_with(|| {
        a.chars()
            .map(|c| (c.is_uppercase(), c))
            .cmp(b.chars().map(|c| (c.is_uppercase(), c)))
    })
}

/// Keyword search.
///
/// With a non-empty `field`, keeps records whose rendered `field` contains `term`. Otherwise a
/// record is kept if any of its values contains `term`.
pub fn search(records: &RecordSet, field: &str, term: &str, case_sensitive: bool) -> RecordSet {
    let fold = |s: String| if case_sensitive { s } else { s.to_lowercase() };
    let needle = fold(term.to_owned());

    records.filter_records(|record| {
        if field.is_empty() {
            record
                .values()
                .any(|v| fold(display_string(Some(v))).contains(needle.as_str()))
        } else {
            fold(display_string(record.get(field))).contains(needle.as_str())
        }
    })
}

/// Records in `[offset, offset + limit)`.
///
/// Bounds follow `Array.prototype.slice`: negative values count back from the end and
/// everything is clamped to the sequence, so the result is at worst empty.
pub fn limit(records: &RecordSet, limit: i64, offset: i64) -> RecordSet {
    let len = records.len() as i64;
    let clamp = |i: i64| if i < 0 { (len + i).max(0) } else { i.min(len) };
    let start = clamp(offset);
    let end = clamp(offset.saturating_add(limit));
    if start >= end {
        return RecordSet::default();
    }
    RecordSet::new(records.records[start as usize..end as usize].to_vec())
}

/// Read the records at the positions in `row_spec`.
///
/// `field_names` is a comma-separated projection list; blank entries are ignored and a list
/// with no names returns whole records. Listed fields a record lacks are simply left out.
pub fn read_cells(records: &RecordSet, row_spec: &str, field_names: &str) -> RecordSet {
    let positions = parse_indices(row_spec, records.len());
    let names: Vec<&str> = field_names
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    positions
        .into_iter()
        .map(|i| &records.records[i])
        .map(|record| {
            if names.is_empty() {
                record.clone()
            } else {
                project(record, &names)
            }
        })
        .collect()
}

fn project(record: &Record, names: &[&str]) -> Record {
    let mut out = Record::new();
    for &name in names {
        if let Some(v) = record.get(name) {
            out.insert(name, v.clone());
        }
    }
    out
}
