//! Record loading.
//!
//! The operations in [`crate::processing`] take records that are already in memory. This
//! module materializes them from files:
//!
//! - [`ingest_from_path`] (from [`unified`]) picks the format by file extension, or by
//!   [`IngestionOptions::format`]
//! - [`json`] loads arrays, single objects and NDJSON, keeping JSON types
//! - [`csv`] loads header-keyed rows, optionally coercing cells into typed values

pub mod csv;
pub mod json;
pub mod unified;

pub use unified::{ingest_from_path, IngestionFormat, IngestionOptions};
