//! Condition evaluation shared by filter, update and delete.
//!
//! A [`ConditionGroup`] is an ordered list of [`Condition`]s, a [`ConditionLogic`] combining
//! them, and a case-sensitivity flag. Text operators compare the rendered field value (see
//! [`crate::coercion::display_string`]) against the raw operand; ordering operators compare
//! both sides as numbers and are `false` whenever either side is `NaN`.

use serde::{Deserialize, Serialize};

use crate::coercion::{display_string, is_falsy, to_number};
use crate::error::{CrudError, CrudResult};
use crate::types::{Record, RecordSet, Value};

/// Comparison operator of a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
    /// Any operator name not listed above. Never matches.
    #[serde(other)]
    Unknown,
}

impl Operator {
    /// Unary operators ignore the operand.
    pub fn is_unary(self) -> bool {
        matches!(self, Self::IsEmpty | Self::IsNotEmpty)
    }
}

/// How the results of several conditions combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionLogic {
    /// Every condition must hold.
    #[default]
    And,
    /// At least one condition must hold.
    Or,
}

impl ConditionLogic {
    /// `"and"` selects AND; any other selector falls back to OR.
    pub fn from_selector(s: &str) -> Self {
        if s == "and" { Self::And } else { Self::Or }
    }
}

/// A single comparison of one record field against an operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Field name looked up on each record.
    #[serde(default)]
    pub field: String,
    /// Comparison operator.
    #[serde(default = "default_operator")]
    pub operator: Operator,
    /// Raw operand text. Absent for unary operators, in which case it renders as `undefined`.
    #[serde(default, rename = "value")]
    pub operand: Option<String>,
}

fn default_operator() -> Operator {
    Operator::Equals
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, operand: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            operand: Some(operand.into()),
        }
    }

    /// A condition without operand, for [`Operator::IsEmpty`] / [`Operator::IsNotEmpty`].
    pub fn unary(field: impl Into<String>, operator: Operator) -> Self {
        Self {
            field: field.into(),
            operator,
            operand: None,
        }
    }

    /// Evaluate this condition against one record.
    pub fn matches(&self, record: &Record, case_sensitive: bool) -> bool {
        let value = record.get(&self.field);

        match self.operator {
            Operator::Equals => {
                let (v, o) = self.text_pair(value, case_sensitive);
                v == o
            }
            Operator::NotEquals => {
                let (v, o) = self.text_pair(value, case_sensitive);
                v != o
            }
            Operator::Contains => {
                let (v, o) = self.text_pair(value, case_sensitive);
                v.contains(o.as_str())
            }
            Operator::NotContains => {
                let (v, o) = self.text_pair(value, case_sensitive);
                !v.contains(o.as_str())
            }
            Operator::StartsWith => {
                let (v, o) = self.text_pair(value, case_sensitive);
                v.starts_with(o.as_str())
            }
            Operator::EndsWith => {
                let (v, o) = self.text_pair(value, case_sensitive);
                v.ends_with(o.as_str())
            }
            Operator::GreaterThan => {
                let (v, o) = self.number_pair(value);
                v > o
            }
            Operator::GreaterOrEqual => {
                let (v, o) = self.number_pair(value);
                v >= o
            }
            Operator::LessThan => {
                let (v, o) = self.number_pair(value);
                v < o
            }
            Operator::LessOrEqual => {
                let (v, o) = self.number_pair(value);
                v <= o
            }
            Operator::IsEmpty => is_falsy(value),
            Operator::IsNotEmpty => !is_falsy(value),
            Operator::Unknown => false,
        }
    }

    fn operand_value(&self) -> Option<Value> {
        self.operand.as_deref().map(Value::from)
    }

    fn text_pair(&self, value: Option<&Value>, case_sensitive: bool) -> (String, String) {
        let v = display_string(value);
        let o = display_string(self.operand_value().as_ref());
        if case_sensitive {
            (v, o)
        } else {
            (v.to_lowercase(), o.to_lowercase())
        }
    }

    // f64 comparisons are already false for NaN on either side.
    fn number_pair(&self, value: Option<&Value>) -> (f64, f64) {
        (to_number(value), to_number(self.operand_value().as_ref()))
    }
}

/// Conditions combined with a [`ConditionLogic`] under one case-sensitivity policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub logic: ConditionLogic,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl ConditionGroup {
    pub fn new(conditions: Vec<Condition>, logic: ConditionLogic, case_sensitive: bool) -> Self {
        Self {
            conditions,
            logic,
            case_sensitive,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluate the group against a record. An empty group matches every record.
    pub fn matches(&self, record: &Record) -> bool {
        if self.conditions.is_empty() {
            return true;
        }
        let mut results = self
            .conditions
            .iter()
            .map(|c| c.matches(record, self.case_sensitive));
        match self.logic {
            ConditionLogic::And => results.all(|r| r),
            ConditionLogic::Or => results.any(|r| r),
        }
    }

    /// Fail unless every condition field is a key of at least one record.
    ///
    /// Runs before update/delete touch anything, so a failure never leaves partial changes.
    pub fn validate_fields(&self, records: &RecordSet) -> CrudResult<()> {
        match self.conditions.iter().find(|c| !records.has_field(&c.field)) {
            Some(missing) => Err(CrudError::MissingConditionField {
                field: missing.field.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Condition, ConditionGroup, ConditionLogic, Operator};
    use crate::error::CrudError;
    use crate::types::{Record, RecordSet, Value};

    fn person(name: &str, status: &str, age: f64) -> Record {
        Record::from_pairs([
            ("name", Value::string(name)),
            ("status", Value::string(status)),
            ("age", Value::Number(age)),
        ])
    }

    #[test]
    fn equals_respects_case_flag() {
        let c = Condition::new("status", Operator::Equals, "active");
        for status in ["Active", "active", "ACTIVE"] {
            assert!(c.matches(&person("a", status, 1.0), false));
        }
        assert!(c.matches(&person("a", "active", 1.0), true));
        assert!(!c.matches(&person("a", "Active", 1.0), true));
    }

    #[test]
    fn text_operators_use_rendered_values() {
        let r = person("John Smith", "x", 30.0);
        assert!(Condition::new("name", Operator::Contains, "smith").matches(&r, false));
        assert!(!Condition::new("name", Operator::Contains, "smith").matches(&r, true));
        assert!(Condition::new("name", Operator::NotContains, "Jane").matches(&r, false));
        assert!(Condition::new("name", Operator::StartsWith, "john").matches(&r, false));
        assert!(Condition::new("name", Operator::EndsWith, "Smith").matches(&r, true));
        assert!(Condition::new("age", Operator::Equals, "30").matches(&r, true));
        assert!(Condition::new("age", Operator::NotEquals, "30.5").matches(&r, true));
    }

    #[test]
    fn absent_field_and_absent_operand_render_as_undefined() {
        let r = person("a", "b", 1.0);
        assert!(Condition::new("missing", Operator::Equals, "undefined").matches(&r, true));
        assert!(Condition::unary("name", Operator::Equals).matches(
            &Record::from_pairs([("name", "undefined")]),
            true
        ));
        let nulls = Record::from_pairs([("v", Value::Null)]);
        assert!(Condition::new("v", Operator::Equals, "NULL").matches(&nulls, false));
    }

    #[test]
    fn numeric_operators_coerce_both_sides() {
        let r = person("a", "b", 30.0);
        assert!(Condition::new("age", Operator::GreaterThan, "29").matches(&r, false));
        assert!(Condition::new("age", Operator::GreaterOrEqual, " 30 ").matches(&r, false));
        assert!(Condition::new("age", Operator::LessThan, "30.5").matches(&r, false));
        assert!(Condition::new("age", Operator::LessOrEqual, "30").matches(&r, false));
        // NaN on either side is never ordered
        assert!(!Condition::new("age", Operator::GreaterThan, "abc").matches(&r, false));
        assert!(!Condition::new("name", Operator::LessThan, "100").matches(&r, false));
        assert!(!Condition::new("missing", Operator::LessOrEqual, "0").matches(&r, false));
        // numeric strings on the record side are converted too
        let s = Record::from_pairs([("price", "75")]);
        assert!(Condition::new("price", Operator::GreaterThan, "8").matches(&s, false));
    }

    #[test]
    fn empty_checks_use_falsiness() {
        let r = Record::from_pairs([
            ("zero", Value::Number(0.0)),
            ("no", Value::Bool(false)),
            ("blank", Value::string("")),
            ("nil", Value::Null),
            ("list", Value::Array(vec![])),
            ("text", Value::string("x")),
        ]);
        for field in ["zero", "no", "blank", "nil", "missing"] {
            assert!(Condition::unary(field, Operator::IsEmpty).matches(&r, false), "{field}");
            assert!(!Condition::unary(field, Operator::IsNotEmpty).matches(&r, false), "{field}");
        }
        for field in ["list", "text"] {
            assert!(!Condition::unary(field, Operator::IsEmpty).matches(&r, false), "{field}");
            assert!(Condition::unary(field, Operator::IsNotEmpty).matches(&r, false), "{field}");
        }
    }

    #[test]
    fn group_logic_and_or_and_empty() {
        let r = person("Bob", "active", 40.0);
        let yes = Condition::new("status", Operator::Equals, "active");
        let no = Condition::new("name", Operator::Equals, "Alice");

        let and = ConditionGroup::new(vec![yes.clone(), no.clone()], ConditionLogic::And, false);
        let or = ConditionGroup::new(vec![yes, no], ConditionLogic::Or, false);
        assert!(!and.matches(&r));
        assert!(or.matches(&r));
        assert!(ConditionGroup::default().matches(&r));
    }

    #[test]
    fn logic_selector_falls_back_to_or() {
        assert_eq!(ConditionLogic::from_selector("and"), ConditionLogic::And);
        assert_eq!(ConditionLogic::from_selector("or"), ConditionLogic::Or);
        assert_eq!(ConditionLogic::from_selector("AND"), ConditionLogic::Or);
    }

    #[test]
    fn validate_fields_names_the_missing_field() {
        let rs = RecordSet::new(vec![person("a", "b", 1.0), Record::from_pairs([("extra", 1i64)])]);
        let ok = ConditionGroup::new(
            vec![Condition::unary("extra", Operator::IsEmpty)],
            ConditionLogic::And,
            false,
        );
        assert!(ok.validate_fields(&rs).is_ok());

        let bad = ConditionGroup::new(
            vec![
                Condition::new("name", Operator::Equals, "a"),
                Condition::new("nonExistentField", Operator::Equals, "x"),
            ],
            ConditionLogic::And,
            false,
        );
        let err = bad.validate_fields(&rs).unwrap_err();
        assert!(matches!(err, CrudError::MissingConditionField { ref field } if field == "nonExistentField"));
        assert!(err.to_string().contains("\"nonExistentField\" does not exist"));
    }

    #[test]
    fn conditions_deserialize_from_host_shape() {
        let c: Condition =
            serde_json::from_str(r#"{"field":"age","operator":"greaterOrEqual","value":"18"}"#).unwrap();
        assert_eq!(c, Condition::new("age", Operator::GreaterOrEqual, "18"));
        let u: Condition = serde_json::from_str(r#"{"field":"note","operator":"isEmpty"}"#).unwrap();
        assert!(u.operator.is_unary());
        assert_eq!(u.operand, None);
    }

    #[test]
    fn unknown_operator_never_matches() {
        let c: Condition =
            serde_json::from_str(r#"{"field":"name","operator":"regex","value":".*"}"#).unwrap();
        assert_eq!(c.operator, Operator::Unknown);
        assert!(!c.matches(&person("a", "b", 1.0), false));

        // only that condition is false; the rest of the group still counts
        let or = ConditionGroup::new(
            vec![c.clone(), Condition::new("name", Operator::Equals, "a")],
            ConditionLogic::Or,
            false,
        );
        assert!(or.matches(&person("a", "b", 1.0)));
        let and = ConditionGroup { logic: ConditionLogic::And, ..or };
        assert!(!and.matches(&person("a", "b", 1.0)));
    }
}
