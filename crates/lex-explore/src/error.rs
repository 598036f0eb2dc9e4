//! Error types for the exploration helpers.
//!
//! Every public operation returns [`Result`]. Composite reports (see
//! [`crate::types::DisplayReport`]) capture step failures instead of
//! returning them, so a caller can tell partial success from total failure.
//!
//! Errors serialize as `{ code, message }` so they can travel inside JSON
//! reports.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for dataset exploration.
#[derive(Error, Debug)]
pub enum ExploreError {
    /// No dataset was supplied at construction.
    #[error("No data loaded")]
    NoDataLoaded,

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Column cannot be interpreted as numbers.
    #[error("Column '{column}' has non-numeric dtype {dtype}")]
    NotNumeric { column: String, dtype: String },

    /// Histogram range cannot be derived from the values.
    #[error("Autodetected range of [{min}, {max}] is not finite for column '{column}'")]
    NonFiniteRange { column: String, min: f64, max: f64 },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ExploreError>,
    },
}

impl ExploreError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ExploreError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, suitable for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoDataLoaded => "NO_DATA_LOADED",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::NotNumeric { .. } => "NOT_NUMERIC",
            Self::NonFiniteRange { .. } => "NON_FINITE_RANGE",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is a missing-column lookup failure.
    pub fn is_column_not_found(&self) -> bool {
        match self {
            Self::ColumnNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_column_not_found(),
            _ => false,
        }
    }
}

impl From<crate::config::ConfigValidationError> for ExploreError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        ExploreError::InvalidConfig(err.to_string())
    }
}

impl Serialize for ExploreError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ExploreError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for exploration operations.
pub type Result<T> = std::result::Result<T, ExploreError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ExploreError::Polars(e).with_context(context))
    }
}
