use thiserror::Error;

/// Convenience result type for record operations.
pub type CrudResult<T> = Result<T, CrudError>;

/// Error type returned by record operations and record loading.
///
/// Only a handful of situations are errors at all: malformed positions, search terms and
/// non-numeric statistics degrade to empty or zero results instead.
#[derive(Debug, Error)]
pub enum CrudError {
    /// The Create payload was missing, unparseable or empty.
    #[error("{message}")]
    InvalidInput { message: String },

    /// A condition references a field that no input record has (update/delete by condition).
    #[error(
        "Condition field \"{field}\" does not exist in any of the input items. Please check your condition field names."
    )]
    MissingConditionField { field: String },

    /// The operation selector is not one of the supported operations.
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    /// Loaded input could not be turned into records.
    #[error("malformed records: {message}")]
    MalformedRecords { message: String },

    /// A parameter bundle could not be decoded.
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] serde_json::Error),

    /// Underlying I/O error while loading records.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error while loading records.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl CrudError {
    pub(crate) fn unparseable_payload() -> Self {
        Self::InvalidInput {
            message: "Unable to parse data to add. Please ensure JSON format is correct.".to_string(),
        }
    }
}

/// A failed operation: which operation ran, and why it failed.
#[derive(Debug, Error)]
#[error("{operation}: {source}")]
pub struct OperationError {
    /// Operation selector as supplied by the caller (e.g. `update`).
    pub operation: String,
    #[source]
    pub source: CrudError,
}

impl OperationError {
    pub fn new(operation: impl Into<String>, source: CrudError) -> Self {
        Self {
            operation: operation.into(),
            source,
        }
    }

    /// The underlying message, without the operation prefix.
    pub fn message(&self) -> String {
        self.source.to_string()
    }
}
