//! Record deletion by condition or by position.

use std::collections::HashSet;

use crate::condition::ConditionGroup;
use crate::error::CrudResult;
use crate::range::parse_indices;
use crate::types::RecordSet;

/// Remove every record matching `group`.
///
/// An empty group deletes nothing. Otherwise condition fields are validated first, and a
/// missing field aborts before anything is removed.
pub fn delete_by_condition(records: RecordSet, group: &ConditionGroup) -> CrudResult<RecordSet> {
    if group.is_empty() {
        return Ok(records);
    }
    group.validate_fields(&records)?;
    Ok(records.into_iter().filter(|r| !group.matches(r)).collect())
}

/// Remove the records at the positions selected by `row_spec`.
pub fn delete_rows(records: RecordSet, row_spec: &str) -> RecordSet {
    let doomed: HashSet<usize> = parse_indices(row_spec, records.len()).into_iter().collect();
    records
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !doomed.contains(i))
        .map(|(_, r)| r)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{delete_by_condition, delete_rows};
    use crate::condition::{Condition, ConditionGroup, ConditionLogic, Operator};
    use crate::error::CrudError;
    use crate::types::{Record, RecordSet, Value};

    fn named(names: &[&str]) -> RecordSet {
        names.iter().map(|n| Record::from_pairs([("name", *n)])).collect()
    }

    fn names(rs: &RecordSet) -> Vec<&str> {
        rs.iter().filter_map(|r| r.get("name").and_then(Value::as_str)).collect()
    }

    #[test]
    fn delete_matching_records() {
        let rs = named(&["張三", "李四", "王五"]);
        let group = ConditionGroup::new(
            vec![Condition::new("name", Operator::Equals, "李四")],
            ConditionLogic::And,
            false,
        );
        let out = delete_by_condition(rs, &group).unwrap();
        assert_eq!(names(&out), vec!["張三", "王五"]);
    }

    #[test]
    fn delete_case_insensitive_and_or() {
        let rs = named(&["John", "jane", "Bob"]);
        let group = ConditionGroup::new(
            vec![
                Condition::new("name", Operator::Equals, "JOHN"),
                Condition::new("name", Operator::StartsWith, "J"),
            ],
            ConditionLogic::Or,
            false,
        );
        assert_eq!(names(&delete_by_condition(rs.clone(), &group).unwrap()), vec!["Bob"]);

        let sensitive = ConditionGroup { case_sensitive: true, ..group };
        assert_eq!(names(&delete_by_condition(rs, &sensitive).unwrap()), vec!["jane", "Bob"]);
    }

    #[test]
    fn empty_group_deletes_nothing_and_skips_validation() {
        let rs = named(&["a", "b"]);
        assert_eq!(delete_by_condition(rs.clone(), &ConditionGroup::default()).unwrap(), rs);
    }

    #[test]
    fn missing_field_is_an_error() {
        let rs = named(&["a"]);
        let group = ConditionGroup::new(
            vec![Condition::unary("ghost", Operator::IsEmpty)],
            ConditionLogic::And,
            false,
        );
        assert!(matches!(
            delete_by_condition(rs, &group),
            Err(CrudError::MissingConditionField { field }) if field == "ghost"
        ));
    }

    #[test]
    fn delete_rows_by_index_selection() {
        let rs = named(&["張三", "李四", "王五", "趙六", "錢七"]);
        assert_eq!(names(&delete_rows(rs.clone(), "1")), vec!["張三", "王五", "趙六", "錢七"]);
        assert_eq!(names(&delete_rows(rs.clone(), "1-3")), vec!["張三", "錢七"]);
        assert_eq!(names(&delete_rows(rs.clone(), "0,2,4")), vec!["李四", "趙六"]);
        assert_eq!(names(&delete_rows(rs.clone(), "0-1,3")), vec!["王五", "錢七"]);
        assert_eq!(delete_rows(rs.clone(), "9,abc"), rs);
    }
}
