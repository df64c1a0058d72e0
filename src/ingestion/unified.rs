//! Unified record loading entrypoint.
//!
//! Most callers should use [`ingest_from_path`], which loads a file into an in-memory
//! [`crate::types::RecordSet`].
//!
//! - If [`IngestionOptions::format`] is `None`, the format is inferred from the file extension.
//! - Outcomes are logged through `tracing` (`INFO` on success, `WARN` on failure).

use std::path::Path;

use crate::error::{CrudError, CrudResult};
use crate::types::RecordSet;

use super::{csv, json};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array, single object, or NDJSON.
    Json,
}

impl IngestionFormat {
    /// Parse an input format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options controlling unified loading.
///
/// Use [`Default`] for common cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<IngestionFormat>,
    /// CSV only: run every cell through value coercion instead of keeping strings.
    pub coerce_values: bool,
}

/// Load records from `path`.
///
/// # Examples
///
/// ## JSON (auto-detect by extension)
///
/// ```no_run
/// use record_query::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), record_query::CrudError> {
/// let records = ingest_from_path("people.json", &IngestionOptions::default())?;
/// println!("records={}", records.len());
/// # Ok(())
/// # }
/// ```
///
/// ## CSV with typed cells, format forced
///
/// ```no_run
/// use record_query::ingestion::{ingest_from_path, IngestionFormat, IngestionOptions};
///
/// # fn main() -> Result<(), record_query::CrudError> {
/// let opts = IngestionOptions {
///     format: Some(IngestionFormat::Csv),
///     coerce_values: true,
/// };
///
/// // Useful when a file has no extension or you want to override inference.
/// let records = ingest_from_path("export_without_extension", &opts)?;
/// println!("records={}", records.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> CrudResult<RecordSet> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let result = match fmt {
        IngestionFormat::Csv => csv::ingest_csv_from_path(path, options.coerce_values),
        IngestionFormat::Json => json::ingest_json_from_path(path),
    };

    match &result {
        Ok(records) => tracing::info!(path = %path.display(), format = ?fmt, records = records.len(), "loaded records"),
        Err(e) => tracing::warn!(path = %path.display(), format = ?fmt, error = %e, "failed to load records"),
    }

    result
}

fn infer_format_from_path(path: &Path) -> CrudResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CrudError::MalformedRecords {
            message: format!("cannot infer format: path has no extension ({})", path.display()),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| CrudError::MalformedRecords {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}
