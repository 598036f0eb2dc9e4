//! Configuration for the exploration helpers.
//!
//! The dataset-specific constants (expected distinct count, postal-code
//! column names and width) live here instead of being baked into the
//! reporters. Use [`ExploreConfig::builder()`] for a validated config, or
//! [`ExploreConfig::from_json_file`] to load one from disk.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of distinct values a fully populated identifier column holds.
pub const DEFAULT_EXPECTED_CARDINALITY: usize = 10_000;

/// Default number of histogram bins.
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Default width of a postal code.
pub const DEFAULT_ZIP_WIDTH: usize = 5;

/// Default number of row bands in the null-value matrix.
pub const DEFAULT_NULL_MATRIX_ROWS: usize = 40;

/// Configuration for an [`crate::Analyzer`] and its [`crate::StatsReporter`].
///
/// # Example
///
/// ```rust,ignore
/// use lex_explore::config::ExploreConfig;
///
/// let config = ExploreConfig::builder()
///     .expected_cardinality(891)
///     .histogram_bins(10)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreConfig {
    /// Distinct-value count that marks a column as completely filled.
    /// Default: 10000
    pub expected_cardinality: usize,

    /// Number of equal-width bins per histogram.
    /// Default: 20
    pub histogram_bins: usize,

    /// Column inspected by the postal-code check.
    /// Default: "Zip"
    pub zip_check_column: String,

    /// Column padded by the postal-code fix.
    /// Default: "zip_code"
    pub zip_fix_column: String,

    /// Expected postal-code width in characters.
    /// Default: 5
    pub zip_width: usize,

    /// Maximum number of row bands drawn in the null-value matrix.
    /// Default: 40
    pub null_matrix_rows: usize,

    /// Whether reports are printed to stdout as they are produced.
    /// Default: true
    pub echo: bool,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            expected_cardinality: DEFAULT_EXPECTED_CARDINALITY,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            zip_check_column: "Zip".to_string(),
            zip_fix_column: "zip_code".to_string(),
            zip_width: DEFAULT_ZIP_WIDTH,
            null_matrix_rows: DEFAULT_NULL_MATRIX_ROWS,
            echo: true,
        }
    }
}

impl ExploreConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ExploreConfigBuilder {
        ExploreConfigBuilder::default()
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ExploreConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::ZeroValue("histogram_bins"));
        }
        if self.zip_width == 0 {
            return Err(ConfigValidationError::ZeroValue("zip_width"));
        }
        if self.null_matrix_rows == 0 {
            return Err(ConfigValidationError::ZeroValue("null_matrix_rows"));
        }
        if self.zip_check_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName("zip_check_column"));
        }
        if self.zip_fix_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName("zip_fix_column"));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{0}': must be at least 1")]
    ZeroValue(&'static str),

    #[error("Invalid value for '{0}': column name must not be empty")]
    EmptyColumnName(&'static str),
}

/// Builder for [`ExploreConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ExploreConfigBuilder {
    base: Option<ExploreConfig>,
    expected_cardinality: Option<usize>,
    histogram_bins: Option<usize>,
    zip_check_column: Option<String>,
    zip_fix_column: Option<String>,
    zip_width: Option<usize>,
    null_matrix_rows: Option<usize>,
    echo: Option<bool>,
}

impl ExploreConfigBuilder {
    /// Start from an existing configuration instead of the defaults.
    pub fn base(mut self, config: ExploreConfig) -> Self {
        self.base = Some(config);
        self
    }

    /// Set the distinct count a fully populated column is expected to have.
    pub fn expected_cardinality(mut self, count: usize) -> Self {
        self.expected_cardinality = Some(count);
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the column checked by the postal-code validator.
    pub fn zip_check_column(mut self, column: impl Into<String>) -> Self {
        self.zip_check_column = Some(column.into());
        self
    }

    /// Set the column padded by the postal-code fixer.
    pub fn zip_fix_column(mut self, column: impl Into<String>) -> Self {
        self.zip_fix_column = Some(column.into());
        self
    }

    /// Set the expected postal-code width.
    pub fn zip_width(mut self, width: usize) -> Self {
        self.zip_width = Some(width);
        self
    }

    /// Set the maximum number of row bands in the null-value matrix.
    pub fn null_matrix_rows(mut self, rows: usize) -> Self {
        self.null_matrix_rows = Some(rows);
        self
    }

    /// Enable or disable printing reports to stdout.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = Some(echo);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ExploreConfig` or an error if validation fails.
    pub fn build(self) -> Result<ExploreConfig, ConfigValidationError> {
        let base = self.base.unwrap_or_default();
        let config = ExploreConfig {
            expected_cardinality: self
                .expected_cardinality
                .unwrap_or(base.expected_cardinality),
            histogram_bins: self.histogram_bins.unwrap_or(base.histogram_bins),
            zip_check_column: self.zip_check_column.unwrap_or(base.zip_check_column),
            zip_fix_column: self.zip_fix_column.unwrap_or(base.zip_fix_column),
            zip_width: self.zip_width.unwrap_or(base.zip_width),
            null_matrix_rows: self.null_matrix_rows.unwrap_or(base.null_matrix_rows),
            echo: self.echo.unwrap_or(base.echo),
        };

        config.validate()?;
        Ok(config)
    }
}
