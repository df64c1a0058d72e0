//! Host parameter bundles.
//!
//! A host passes one flat bundle of named parameters per invocation, as JSON with camelCase
//! keys. Every parameter is optional and defaults to what the host form shows initially.
//! [`OperationParams::into_request`] resolves the bundle into a typed [`Request`] for the
//! selected operation, ignoring parameters that belong to other operations.
//!
//! ```rust
//! use record_query::params::{OperationParams, Request, ReadRequest};
//!
//! let params = OperationParams::from_json_str(
//!     r#"{"operation":"read","readMode":"limit","limit":5,"offset":2}"#,
//! ).unwrap();
//! assert_eq!(
//!     params.into_request().unwrap(),
//!     Request::Read(ReadRequest::Limit { limit: 5, offset: 2 }),
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::condition::{Condition, ConditionGroup, ConditionLogic};
use crate::error::{CrudError, CrudResult};
use crate::processing::{FieldUpdate, InsertPosition, SortOrder};

/// Top-level operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    RemoveDuplicates,
    Statistics,
}

impl Operation {
    /// Resolve a selector string such as `"removeDuplicates"`.
    pub fn from_selector(s: &str) -> CrudResult<Self> {
        match s {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "removeDuplicates" => Ok(Self::RemoveDuplicates),
            "statistics" => Ok(Self::Statistics),
            other => Err(CrudError::UnsupportedOperation {
                operation: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::RemoveDuplicates => "removeDuplicates",
            Self::Statistics => "statistics",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The host's `{ "conditions": [...] }` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionCollection {
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// The host's `{ "fields": [...] }` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldCollection {
    #[serde(default)]
    pub fields: Vec<FieldUpdate>,
}

/// Flat parameter bundle for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OperationParams {
    pub operation: String,

    // create
    pub data_to_add: serde_json::Value,
    pub position: String,

    // read
    pub read_mode: String,
    pub read_row_index: String,
    pub read_field_names: String,
    pub filter_conditions: ConditionCollection,
    pub condition_logic: String,
    pub filter_case_sensitive: bool,
    pub sort_field: String,
    pub sort_order: String,
    pub search_field: String,
    pub search_value: String,
    pub case_sensitive: bool,
    pub limit: i64,
    pub offset: i64,

    // update
    pub update_mode: String,
    pub row_index: String,
    pub cell_field_name: String,
    pub cell_value: String,
    pub update_conditions: ConditionCollection,
    pub update_condition_logic: String,
    pub update_case_sensitive: bool,
    pub fields_to_update: FieldCollection,

    // delete
    pub delete_mode: String,
    pub delete_row_index: String,
    pub delete_conditions: ConditionCollection,
    pub delete_condition_logic: String,
    pub delete_case_sensitive: bool,

    // removeDuplicates
    pub unique_fields: String,

    // statistics
    pub stats_field: String,
    pub group_by_field: String,
}

impl Default for OperationParams {
    fn default() -> Self {
        Self {
            operation: "read".to_string(),
            data_to_add: serde_json::Value::String("{\n  \"field1\": \"value1\"\n}".to_string()),
            position: "append".to_string(),
            read_mode: "filter".to_string(),
            read_row_index: "0".to_string(),
            read_field_names: String::new(),
            filter_conditions: ConditionCollection::default(),
            condition_logic: "and".to_string(),
            filter_case_sensitive: false,
            sort_field: String::new(),
            sort_order: "asc".to_string(),
            search_field: String::new(),
            search_value: String::new(),
            case_sensitive: false,
            limit: 10,
            offset: 0,
            update_mode: "condition".to_string(),
            row_index: "0".to_string(),
            cell_field_name: String::new(),
            cell_value: String::new(),
            update_conditions: ConditionCollection::default(),
            update_condition_logic: "and".to_string(),
            update_case_sensitive: false,
            fields_to_update: FieldCollection::default(),
            delete_mode: "condition".to_string(),
            delete_row_index: "0".to_string(),
            delete_conditions: ConditionCollection::default(),
            delete_condition_logic: "and".to_string(),
            delete_case_sensitive: false,
            unique_fields: String::new(),
            stats_field: String::new(),
            group_by_field: String::new(),
        }
    }
}

/// A resolved read mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadRequest {
    Filter(ConditionGroup),
    Sort { field: String, order: SortOrder },
    Search { field: String, term: String, case_sensitive: bool },
    Limit { limit: i64, offset: i64 },
    Cell { row_index: String, field_names: String },
    /// Unrecognized read mode: records are returned unchanged.
    PassThrough,
}

/// A resolved update mode.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateRequest {
    Condition { group: ConditionGroup, updates: Vec<FieldUpdate> },
    Cell { row_index: String, field: String, value: String },
}

/// A resolved delete mode.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteRequest {
    Condition(ConditionGroup),
    RowIndex(String),
}

/// A fully typed operation with only the parameters it uses.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Create { payload: serde_json::Value, position: InsertPosition },
    Read(ReadRequest),
    Update(UpdateRequest),
    Delete(DeleteRequest),
    RemoveDuplicates { unique_fields: String },
    Statistics { field: String, group_by: Option<String> },
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Create { .. } => Operation::Create,
            Self::Read(_) => Operation::Read,
            Self::Update(_) => Operation::Update,
            Self::Delete(_) => Operation::Delete,
            Self::RemoveDuplicates { .. } => Operation::RemoveDuplicates,
            Self::Statistics { .. } => Operation::Statistics,
        }
    }
}

impl OperationParams {
    /// Decode a JSON parameter bundle. Missing keys take their defaults.
    pub fn from_json_str(input: &str) -> CrudResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Resolve the bundle into a typed [`Request`].
    ///
    /// Fails only for an unknown operation selector. Mode selectors fall back the way the host
    /// form does: `position` other than `append` prepends, `updateMode` other than `cell` and
    /// `deleteMode` other than `rowIndex` are condition based, and an unknown `readMode` passes
    /// records through.
    pub fn into_request(self) -> CrudResult<Request> {
        let request = match Operation::from_selector(&self.operation)? {
            Operation::Create => Request::Create {
                position: InsertPosition::from_selector(&self.position),
                payload: self.data_to_add,
            },
            Operation::Read => Request::Read(match self.read_mode.as_str() {
                "filter" => ReadRequest::Filter(group(
                    self.filter_conditions,
                    &self.condition_logic,
                    self.filter_case_sensitive,
                )),
                "sort" => ReadRequest::Sort {
                    order: SortOrder::from_selector(&self.sort_order),
                    field: self.sort_field,
                },
                "search" => ReadRequest::Search {
                    field: self.search_field,
                    term: self.search_value,
                    case_sensitive: self.case_sensitive,
                },
                "limit" => ReadRequest::Limit {
                    limit: self.limit,
                    offset: self.offset,
                },
                "cell" => ReadRequest::Cell {
                    row_index: self.read_row_index,
                    field_names: self.read_field_names,
                },
                _ => ReadRequest::PassThrough,
            }),
            Operation::Update => Request::Update(if self.update_mode == "cell" {
                UpdateRequest::Cell {
                    row_index: self.row_index,
                    field: self.cell_field_name,
                    value: self.cell_value,
                }
            } else {
                UpdateRequest::Condition {
                    group: group(
                        self.update_conditions,
                        &self.update_condition_logic,
                        self.update_case_sensitive,
                    ),
                    updates: self.fields_to_update.fields,
                }
            }),
            Operation::Delete => Request::Delete(if self.delete_mode == "rowIndex" {
                DeleteRequest::RowIndex(self.delete_row_index)
            } else {
                DeleteRequest::Condition(group(
                    self.delete_conditions,
                    &self.delete_condition_logic,
                    self.delete_case_sensitive,
                ))
            }),
            Operation::RemoveDuplicates => Request::RemoveDuplicates {
                unique_fields: self.unique_fields,
            },
            Operation::Statistics => Request::Statistics {
                field: self.stats_field,
                group_by: Some(self.group_by_field).filter(|g| !g.is_empty()),
            },
        };
        Ok(request)
    }
}

fn group(collection: ConditionCollection, logic: &str, case_sensitive: bool) -> ConditionGroup {
    ConditionGroup::new(
        collection.conditions,
        ConditionLogic::from_selector(logic),
        case_sensitive,
    )
}
