//! Dataset inspection: null scan, boolean detection, display report and the
//! dtype-driven category dispatcher.

use crate::charts::{Histogram, HistogramChart, NullMatrix, SkipReason, SkippedColumn};
use crate::config::ExploreConfig;
use crate::error::{ExploreError, Result, ResultExt};
use crate::loader::load_csv;
use crate::reporter::StatsReporter;
use crate::types::{
    ColumnAssignment, ColumnInfo, DatasetInfo, DisplayReport, DuplicateSummary, InspectionReport,
    ReportStep, Selection, StepFailure, ZipIssue,
};
use crate::utils::{
    ColumnKind, column_series, is_boolean_series, is_numeric_dtype, missing_count, numeric_values,
};
use polars::prelude::*;
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, error, info, warn};

pub const USAGE_NOTICE: &str =
    "Please provide a DataFrame or a path to a CSV file when creating an Analyzer.";

const SECTION_BANNER: &str = " \n\n\n\n\n ********************************************* \n ********************************************* \n ";

/// Owns a dataset and reports on its nulls, booleans and distributions.
pub struct Analyzer {
    df: DataFrame,
    config: ExploreConfig,
    reporter: StatsReporter,
    has_null: Vec<String>,
    boolean_columns: Vec<String>,
}

impl Analyzer {
    /// Wrap an in-memory frame.
    pub fn from_frame(df: DataFrame, config: ExploreConfig) -> Result<Self> {
        config.validate()?;
        info!("Analyzer created over dataset {:?}", df.shape());
        Ok(Self {
            reporter: StatsReporter::new(&config),
            df,
            config,
            has_null: Vec::new(),
            boolean_columns: Vec::new(),
        })
    }

    /// Load a CSV file eagerly and wrap it.
    pub fn from_path(path: impl AsRef<Path>, config: ExploreConfig) -> Result<Self> {
        let path = path.as_ref();
        let df = load_csv(path).context(format!("Loading {}", path.display()))?;
        Self::from_frame(df, config)
    }

    /// Build from whichever source is given; a path wins over a frame.
    ///
    /// With neither, prints a usage notice and returns
    /// [`ExploreError::NoDataLoaded`].
    pub fn from_source(
        path: Option<&Path>,
        df: Option<DataFrame>,
        config: ExploreConfig,
    ) -> Result<Self> {
        match (path, df) {
            (Some(path), _) => Self::from_path(path, config),
            (None, Some(df)) => Self::from_frame(df, config),
            (None, None) => {
                warn!("No dataset supplied");
                if config.echo {
                    println!("{}", USAGE_NOTICE);
                }
                Err(ExploreError::NoDataLoaded)
            }
        }
    }

    pub fn dataset(&self) -> &DataFrame {
        &self.df
    }

    pub fn config(&self) -> &ExploreConfig {
        &self.config
    }

    pub fn reporter(&self) -> &StatsReporter {
        &self.reporter
    }

    /// Columns found by the last [`Self::find_columns_with_nulls`].
    pub fn has_null(&self) -> &[String] {
        &self.has_null
    }

    /// Columns found by the last [`Self::detect_boolean_columns`].
    pub fn boolean_columns(&self) -> &[String] {
        &self.boolean_columns
    }

    fn emit(&self, text: impl Display) {
        if self.config.echo {
            println!("{}", text);
        }
    }

    /// Null scan followed by the display report.
    pub fn identify(&mut self) -> Result<InspectionReport> {
        let has_null = self.find_columns_with_nulls()?.to_vec();
        let display = self.display_info();
        Ok(InspectionReport { has_null, display })
    }

    /// Recompute the has-null set: every column with at least one missing
    /// value (null, or NaN in a float column), in column order.
    pub fn find_columns_with_nulls(&mut self) -> Result<&[String]> {
        let mut found = Vec::new();
        for column in self.df.get_columns() {
            if missing_count(column.as_materialized_series())? > 0 {
                found.push(column.name().to_string());
            }
        }
        self.has_null = found;
        debug!(columns = ?self.has_null, "Columns with nulls");
        Ok(&self.has_null)
    }

    /// Recompute the boolean-like set, in column order.
    pub fn detect_boolean_columns(&mut self) -> Result<&[String]> {
        let mut found = Vec::new();
        for column in self.df.get_columns() {
            if is_boolean_series(column.as_materialized_series())? {
                found.push(column.name().to_string());
            }
        }
        self.boolean_columns = found;
        debug!(columns = ?self.boolean_columns, "Boolean-like columns");
        Ok(&self.boolean_columns)
    }

    /// Check whether a column's non-missing values all come from one of
    /// yes/no, Yes/No or 0/1. A column with no values qualifies.
    pub fn is_boolean_column(&self, column: &str) -> Result<bool> {
        is_boolean_series(column_series(&self.df, column)?)
    }

    /// Print dataset info, duplicates, the null matrix, boolean columns and
    /// histograms.
    ///
    /// The first failing step ends the report; it is recorded in
    /// [`DisplayReport::failure`] and printed rather than returned.
    pub fn display_info(&mut self) -> DisplayReport {
        let mut report = DisplayReport::default();
        let mut step = ReportStep::DatasetInfo;

        if let Err(err) = self.run_display_steps(&mut report, &mut step) {
            error!(%step, "Display report aborted: {}", err);
            self.emit(format!("The following exception occurred: {}", err));
            report.failure = Some(StepFailure {
                step,
                message: err.to_string(),
            });
        }
        report
    }

    fn run_display_steps(
        &mut self,
        report: &mut DisplayReport,
        step: &mut ReportStep,
    ) -> Result<()> {
        *step = ReportStep::DatasetInfo;
        let info = self.dataset_info()?;
        self.emit("DataFrame Info:");
        self.emit(&info);
        report.info = Some(info);

        *step = ReportStep::Duplicates;
        let duplicates = self.duplicate_summary()?;
        self.emit("\n\n\n\n Analysis of the duplicated value counts:");
        self.emit(duplicates);
        report.duplicates = Some(duplicates);

        *step = ReportStep::NullMatrix;
        let matrix = NullMatrix::from_frame(&self.df, self.config.null_matrix_rows)?;
        self.emit("\n\n\n\n Chart depicting the null value distribution:");
        self.emit(&matrix);
        report.null_matrix = Some(matrix);

        *step = ReportStep::BooleanColumns;
        let booleans = self.detect_boolean_columns()?.to_vec();
        self.emit("\n\n\nThe following columns have boolean values:");
        for column in &booleans {
            self.emit(column);
        }
        self.emit("\n\n\n\n");
        report.boolean_columns = Some(booleans);

        *step = ReportStep::Histograms;
        let chart = self.plot_histogram()?;
        report.histograms = Some(chart);

        info!("Display report complete");
        Ok(())
    }

    /// Shape, non-null counts and dtypes. NaN counts as missing.
    pub fn dataset_info(&self) -> Result<DatasetInfo> {
        let rows = self.df.height();
        let mut columns = Vec::with_capacity(self.df.width());
        for column in self.df.get_columns() {
            columns.push(ColumnInfo {
                name: column.name().to_string(),
                non_null_count: rows - missing_count(column.as_materialized_series())?,
                dtype: column.dtype().to_string(),
            });
        }
        Ok(DatasetInfo {
            rows,
            columns,
            estimated_size_bytes: self.df.estimated_size(),
        })
    }

    /// Count rows identical to an earlier row.
    pub fn duplicate_summary(&self) -> Result<DuplicateSummary> {
        let unique_rows = self
            .df
            .unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?
            .height();
        Ok(DuplicateSummary {
            unique_rows,
            duplicate_rows: self.df.height() - unique_rows,
        })
    }

    /// One histogram per has-null column, skipping boolean-like and
    /// non-numeric columns.
    pub fn plot_histogram(&self) -> Result<HistogramChart> {
        let mut chart = HistogramChart::default();

        for column in &self.has_null {
            if self.boolean_columns.contains(column) {
                self.emit(format!(
                    "Skipping histogram for boolean column: {}, ***MISSING VALUES DETECTED***",
                    column
                ));
                chart.skipped.push(SkippedColumn {
                    column: column.clone(),
                    reason: SkipReason::BooleanLike,
                });
                continue;
            }

            let series = column_series(&self.df, column)?;
            if !is_numeric_dtype(series.dtype()) {
                warn!(column = %column, dtype = %series.dtype(), "Cannot bin non-numeric column");
                chart.skipped.push(SkippedColumn {
                    column: column.clone(),
                    reason: SkipReason::NonNumeric,
                });
                continue;
            }

            let values = numeric_values(series)?;
            chart.layers.push(Histogram::from_values(
                column.as_str(),
                &values,
                self.config.histogram_bins,
            )?);
        }

        if !chart.is_empty() {
            self.emit(&chart);
        }
        Ok(chart)
    }

    /// Summarize each column by dtype: text columns get a value-count tally,
    /// numeric columns descriptive statistics, anything else is only named.
    pub fn determine_category_assignment<S: AsRef<str>>(
        &self,
        columns: &[S],
    ) -> Result<Vec<ColumnAssignment>> {
        let mut assignments = Vec::with_capacity(columns.len());

        for column in columns {
            let column = column.as_ref();
            let dtype = column_series(&self.df, column)?.dtype().clone();
            self.emit(format!(
                "{} \n Now Processing {} dtype: {}",
                SECTION_BANNER, column, dtype
            ));

            let assignment = match ColumnKind::of(&dtype) {
                ColumnKind::Text => self
                    .reporter
                    .verify_value_counts(&self.df, Selection::from(column))?
                    .pop()
                    .map(ColumnAssignment::ValueCounts),
                ColumnKind::Numeric => self
                    .reporter
                    .describe_variable(&self.df, Selection::from(column))?
                    .pop()
                    .map(ColumnAssignment::Described),
                ColumnKind::Other(dtype) => {
                    debug!(column, %dtype, "No summary for dtype");
                    Some(ColumnAssignment::Skipped {
                        column: column.to_string(),
                        dtype: dtype.to_string(),
                    })
                }
            };
            assignments.extend(assignment);
        }

        Ok(assignments)
    }

    /// Report rows of the configured check column whose postal code has the
    /// wrong width.
    pub fn check_zip(&self) -> Result<Vec<ZipIssue>> {
        self.reporter.check_zip(&self.df, &self.config.zip_check_column)
    }

    /// Zero-pad the configured fix column in place.
    pub fn fix_zip(&mut self) -> Result<()> {
        let column = self.config.zip_fix_column.clone();
        self.reporter.fix_zip(&mut self.df, &column)
    }
}
