//! Record-set operations.
//!
//! Each operation is a free function from a [`crate::types::RecordSet`] plus its parameters to
//! a new record set (or, for updates, an in-place change). They compose the shared building
//! blocks: [`crate::condition`] for predicates, [`crate::range`] for positions and
//! [`crate::coercion`] for assigned values.
//!
//! - [`create()`]: insert records parsed from a JSON payload
//! - [`filter()`], [`sort()`], [`search()`], [`limit()`], [`read_cells()`]: read modes
//! - [`update_by_condition()`], [`update_cells()`]: in-place updates
//! - [`delete_by_condition()`], [`delete_rows()`]: deletion
//! - [`remove_duplicates()`]: first-wins deduplication
//! - [`statistics()`]: count/sum/avg/min/max, optionally grouped
//!
//! ## Example: filter → update → statistics
//!
//! ```rust
//! use record_query::condition::{Condition, ConditionGroup, ConditionLogic, Operator};
//! use record_query::processing::{filter, statistics, update_by_condition, FieldUpdate};
//! use record_query::types::{Record, RecordSet, Value};
//!
//! let mut staff = RecordSet::new(vec![
//!     Record::from_pairs([("name", Value::string("Ada")), ("team", Value::string("core"))]),
//!     Record::from_pairs([("name", Value::string("Grace")), ("team", Value::string("infra"))]),
//! ]);
//!
//! let core = ConditionGroup::new(
//!     vec![Condition::new("team", Operator::Equals, "CORE")],
//!     ConditionLogic::And,
//!     false,
//! );
//! assert_eq!(filter(&staff, &core).len(), 1);
//!
//! // "5000" is stored as a number.
//! update_by_condition(&mut staff, &ConditionGroup::default(), &[FieldUpdate::new("salary", "5000")]).unwrap();
//! assert_eq!(staff.records[0].get("salary"), Some(&Value::Number(5000.0)));
//!
//! let summary = statistics(&staff, "salary", None);
//! assert_eq!(summary.records[0].get("sum"), Some(&Value::Number(10000.0)));
//! ```

pub mod create;
pub mod dedup;
pub mod delete;
pub mod filter;
pub mod read;
pub mod statistics;
pub mod update;

pub use create::{create, parse_payload, InsertPosition};
pub use dedup::remove_duplicates;
pub use delete::{delete_by_condition, delete_rows};
pub use filter::filter;
pub use read::{limit, locale_compare, read_cells, search, sort, SortOrder};
pub use statistics::{statistics, Aggregate};
pub use update::{update_by_condition, update_cells, FieldUpdate};
