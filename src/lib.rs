//! `record-query` is a small in-memory query and mutation engine for loosely typed records.
//!
//! A record is an insertion-ordered map from field name to a dynamically typed
//! [`types::Value`]. Given an ordered [`types::RecordSet`], an operation selector and a flat
//! parameter bundle, the engine returns the resulting record set or an [`OperationError`].
//!
//! The primary entrypoint is [`execution::execute`] (or an [`execution::ExecutionEngine`] when
//! you want observer hooks and metrics), driven by a [`params::OperationParams`] bundle.
//!
//! ## Operations
//!
//! - **create**: insert records parsed from a JSON payload, appended or prepended
//! - **read**: `filter` by conditions, `sort`, keyword `search`, `limit`/offset, `cell` reads
//! - **update**: set fields on records matching conditions, or at row positions
//! - **delete**: remove records matching conditions, or at row positions
//! - **removeDuplicates**: keep the first record per key
//! - **statistics**: `count/sum/avg/min/max` over a field, optionally grouped
//!
//! Configured values written by update are coerced (`"15"` is stored as a number, `"true"` as
//! a boolean, ISO strings as dates), while condition operands are always compared in their
//! raw textual form. See [`coercion`].
//!
//! ## Quick example: run an operation from a parameter bundle
//!
//! ```rust
//! use record_query::execution::execute;
//! use record_query::ingestion::json::ingest_json_from_str;
//! use record_query::params::OperationParams;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = ingest_json_from_str(
//!     r#"[
//!         {"name": "張三", "department": "技術部", "salary": 50000},
//!         {"name": "李四", "department": "行銷部", "salary": 45000},
//!         {"name": "王五", "department": "技術部", "salary": 55000}
//!     ]"#,
//! )?;
//!
//! let params = OperationParams::from_json_str(
//!     r#"{
//!         "operation": "read",
//!         "readMode": "filter",
//!         "filterConditions": {"conditions": [
//!             {"field": "department", "operator": "equals", "value": "技術部"}
//!         ]}
//!     }"#,
//! )?;
//!
//! let out = execute(records, &params)?;
//! assert_eq!(out.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Loading records from files
//!
//! ```no_run
//! use record_query::ingestion::{ingest_from_path, IngestionOptions};
//!
//! # fn main() -> Result<(), record_query::CrudError> {
//! // Auto-detects by extension (.json/.ndjson/.csv).
//! let records = ingest_from_path("people.csv", &IngestionOptions::default())?;
//! println!("records={}", records.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: values, records and record sets
//! - [`coercion`]: assignment coercion and JS-style rendering for comparisons
//! - [`condition`]: conditions, operators and condition groups
//! - [`range`]: row index selections such as `0-2,5`
//! - [`processing`]: the record-set operations as free functions
//! - [`params`]: host parameter bundles and typed requests
//! - [`execution`]: dispatch, observer hooks and metrics
//! - [`ingestion`]: JSON/NDJSON/CSV record loading
//! - [`error`]: error types

pub mod coercion;
pub mod condition;
pub mod error;
pub mod execution;
pub mod ingestion;
pub mod params;
pub mod processing;
pub mod range;
pub mod types;

pub use error::{CrudError, CrudResult, OperationError};
pub use execution::{execute, ExecutionEngine};
