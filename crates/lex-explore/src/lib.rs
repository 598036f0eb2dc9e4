//! Exploratory Data Analysis Helpers
//!
//! A small Polars-backed toolkit for a first look at a tabular dataset.
//!
//! # Overview
//!
//! - **Null scan**: which columns have missing values, in column order
//! - **Boolean detection**: columns restricted to yes/no, Yes/No or 0/1
//! - **Display report**: dataset info, duplicate rows, a null-value matrix,
//!   boolean columns and histograms of the columns with nulls
//! - **Category dispatch**: value counts for text columns, descriptive
//!   statistics for numeric ones
//! - **Column reporters**: value counts, describe, unique values, distinct-count
//!   checks and postal-code helpers
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_explore::{Analyzer, ExploreConfig};
//!
//! let mut analyzer = Analyzer::from_path("customers.csv", ExploreConfig::default())?;
//!
//! let report = analyzer.identify()?;
//! if let Some(failure) = &report.display.failure {
//!     eprintln!("report stopped at {}: {}", failure.step, failure.message);
//! }
//!
//! analyzer.determine_category_assignment(&["State", "Income"])?;
//! ```
//!
//! # Column Reporters
//!
//! [`StatsReporter`] works on any borrowed frame and accepts one column,
//! several, or none:
//!
//! ```rust,ignore
//! use lex_explore::{Selection, StatsReporter};
//!
//! let reporter = StatsReporter::default();
//! reporter.describe_variable(&df, "Income")?;
//! reporter.verify_value_counts(&df, ["State", "Gender"])?;
//! reporter.display_unique_values(&df, Selection::None)?; // prints a notice
//! ```

pub mod analyzer;
pub mod charts;
pub mod config;
pub mod error;
pub mod loader;
pub mod reporter;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analyzer::Analyzer;
pub use charts::{Histogram, HistogramChart, NullMatrix, SkipReason, SkippedColumn};
pub use config::{ConfigValidationError, ExploreConfig, ExploreConfigBuilder};
pub use error::{ExploreError, Result as ExploreResult, ResultExt};
pub use loader::{load_csv, read_csv_str};
pub use reporter::StatsReporter;
pub use types::{
    CardinalityCheck, CategoricalDescription, ColumnAssignment, ColumnInfo, DatasetInfo,
    Description, DisplayReport, DuplicateSummary, InspectionReport, NumericDescription, ReportStep,
    Selection, StepFailure, UniqueValues, ValueCount, ValueCounts, ZipIssue,
};
pub use utils::{
    BooleanVocabulary, ColumnKind, DtypeCategory, get_dtype_category, is_numeric_dtype,
};
