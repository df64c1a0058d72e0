//! In-place record updates.

use serde::{Deserialize, Serialize};

use crate::coercion::coerce;
use crate::condition::ConditionGroup;
use crate::error::CrudResult;
use crate::range::parse_indices;
use crate::types::RecordSet;

/// One `name = value` assignment. `value` is coerced (see [`coerce`]) when applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl FieldUpdate {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Apply `updates` to every record matching `group`.
///
/// Condition fields are validated against the whole set first, so a missing field leaves
/// `records` untouched. An empty group matches (and updates) every record.
pub fn update_by_condition(
    records: &mut RecordSet,
    group: &ConditionGroup,
    updates: &[FieldUpdate],
) -> CrudResult<usize> {
    group.validate_fields(records)?;

    let mut updated = 0;
    for record in records.records.iter_mut() {
        if !group.matches(record) {
            continue;
        }
        for update in updates {
            record.insert(update.name.clone(), coerce(&update.value));
        }
        updated += 1;
    }
    Ok(updated)
}

/// Set `field` to the coerced `value` on every record selected by `row_spec`.
///
/// Returns the number of records touched.
pub fn update_cells(records: &mut RecordSet, row_spec: &str, field: &str, value: &str) -> usize {
    let positions = parse_indices(row_spec, records.len());
    for &i in &positions {
        records.records[i].insert(field, coerce(value));
    }
    positions.len()
}

#[cfg(test)]
mod tests {
    use super::{update_by_condition, update_cells, FieldUpdate};
    use crate::condition::{Condition, ConditionGroup, ConditionLogic, Operator};
    use crate::error::CrudError;
    use crate::types::{Record, RecordSet, Value};

    fn staff() -> RecordSet {
        RecordSet::new(vec![
            Record::from_pairs([
                ("name", Value::string("張三")),
                ("department", Value::string("技術部")),
                ("salary", Value::Number(50000.0)),
            ]),
            Record::from_pairs([
                ("name", Value::string("李四")),
                ("department", Value::string("行銷部")),
                ("salary", Value::Number(45000.0)),
            ]),
            Record::from_pairs([
                ("name", Value::string("王五")),
                ("department", Value::string("行政部")),
                ("salary", Value::Number(55000.0)),
            ]),
        ])
    }

    fn dept_equals(dept: &str) -> ConditionGroup {
        ConditionGroup::new(
            vec![Condition::new("department", Operator::Equals, dept)],
            ConditionLogic::And,
            false,
        )
    }

    #[test]
    fn update_matching_records_with_coerced_values() {
        let mut rs = staff();
        let n = update_by_condition(
            &mut rs,
            &dept_equals("技術部"),
            &[FieldUpdate::new("salary", "60000"), FieldUpdate::new("bonus", "true")],
        )
        .unwrap();
        assert_eq!(n, 1);
        assert_eq!(rs.records[0].get("salary"), Some(&Value::Number(60000.0)));
        assert_eq!(rs.records[0].get("bonus"), Some(&Value::Bool(true)));
        assert_eq!(rs.records[1].get("salary"), Some(&Value::Number(45000.0)));
        assert!(!rs.records[1].contains_key("bonus"));
    }

    #[test]
    fn empty_conditions_update_every_record() {
        let mut rs = staff();
        let n = update_by_condition(&mut rs, &ConditionGroup::default(), &[FieldUpdate::new("flag", "null")]).unwrap();
        assert_eq!(n, 3);
        assert!(rs.iter().all(|r| r.get("flag") == Some(&Value::Null)));
    }

    #[test]
    fn missing_condition_field_fails_without_mutation() {
        let mut rs = staff();
        let before = rs.clone();
        let group = ConditionGroup::new(
            vec![Condition::new("nonExistentField", Operator::Equals, "x")],
            ConditionLogic::And,
            false,
        );
        let err = update_by_condition(&mut rs, &group, &[FieldUpdate::new("salary", "1")]).unwrap_err();
        assert!(matches!(err, CrudError::MissingConditionField { .. }));
        assert_eq!(rs, before);
    }

    #[test]
    fn update_cells_touches_selected_rows_only() {
        let mut rs = staff();
        assert_eq!(update_cells(&mut rs, "0-1", "department", "研發部"), 2);
        assert_eq!(rs.records[0].get("department"), Some(&Value::string("研發部")));
        assert_eq!(rs.records[1].get("department"), Some(&Value::string("研發部")));
        assert_eq!(rs.records[2].get("department"), Some(&Value::string("行政部")));

        assert_eq!(update_cells(&mut rs, "2", "salary", "60000"), 1);
        assert_eq!(rs.records[2].get("salary"), Some(&Value::Number(60000.0)));

        assert_eq!(update_cells(&mut rs, "7,x", "salary", "1"), 0);
    }

    #[test]
    fn assignment_coerces_but_comparison_does_not() {
        let mut rs = RecordSet::new(vec![Record::from_pairs([("code", "15")])]);
        // the stored string "15" still compares equal to the operand "15"
        let group = ConditionGroup::new(
            vec![Condition::new("code", Operator::Equals, "15")],
            ConditionLogic::And,
            true,
        );
        update_by_condition(&mut rs, &group, &[FieldUpdate::new("code", "15")]).unwrap();
        assert_eq!(rs.records[0].get("code"), Some(&Value::Number(15.0)));

        update_cells(&mut rs, "0", "id", "001-ABC");
        assert_eq!(rs.records[0].get("id"), Some(&Value::string("001-ABC")));
    }
}
