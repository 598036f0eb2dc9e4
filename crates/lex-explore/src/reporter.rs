//! Stateless column reporters.
//!
//! Each generic reporter accepts a [`Selection`]. With [`Selection::None`]
//! it prints a notice and returns an empty vector; otherwise it returns one
//! result per selected column, printing each as it goes when echo is on.

use crate::config::ExploreConfig;
use crate::error::Result;
use crate::types::{
    CardinalityCheck, CategoricalDescription, Description, NumericDescription, Selection,
    UniqueValues, ValueCount, ValueCounts, ZipIssue,
};
use crate::utils::{
    column_series, distinct_in_order, is_numeric_dtype, numeric_values, text_values,
};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

pub const NO_VARIABLE_NOTICE: &str = "No variable specified for analysis.";

/// Column-level summaries over a borrowed frame.
#[derive(Debug, Clone)]
pub struct StatsReporter {
    expected_cardinality: usize,
    zip_width: usize,
    echo: bool,
}

impl Default for StatsReporter {
    fn default() -> Self {
        Self::new(&ExploreConfig::default())
    }
}

impl StatsReporter {
    pub fn new(config: &ExploreConfig) -> Self {
        Self {
            expected_cardinality: config.expected_cardinality,
            zip_width: config.zip_width,
            echo: config.echo,
        }
    }

    pub fn expected_cardinality(&self) -> usize {
        self.expected_cardinality
    }

    fn emit(&self, text: impl std::fmt::Display) {
        if self.echo {
            println!("{}", text);
        }
    }

    /// Run `report` for every selected column, or print the notice.
    fn for_each_column<T>(
        &self,
        selection: Selection,
        mut report: impl FnMut(&str) -> Result<T>,
    ) -> Result<Vec<T>> {
        if selection.is_empty() {
            self.emit(NO_VARIABLE_NOTICE);
            return Ok(Vec::new());
        }
        selection.columns().into_iter().map(|c| report(c)).collect()
    }

    /// Compare each column's distinct non-missing count to the expected cardinality.
    pub fn verify_individual_counts(
        &self,
        df: &DataFrame,
        selection: impl Into<Selection>,
    ) -> Result<Vec<CardinalityCheck>> {
        self.for_each_column(selection.into(), |column| {
            let series = column_series(df, column)?;
            let distinct_count = series.drop_nulls().n_unique()?;
            let check = CardinalityCheck {
                column: column.to_string(),
                distinct_count,
                expected: self.expected_cardinality,
                filled: distinct_count == self.expected_cardinality,
            };
            self.emit(format!(
                "{} has {} rows. All values filled = {}",
                check.column, check.distinct_count, check.filled
            ));
            Ok(check)
        })
    }

    /// Tally occurrences of each distinct value.
    pub fn verify_value_counts(
        &self,
        df: &DataFrame,
        selection: impl Into<Selection>,
    ) -> Result<Vec<ValueCounts>> {
        self.for_each_column(selection.into(), |column| {
            let counts = value_counts(column_series(df, column)?)?;
            self.emit(format!(
                " Now analyzing variable: {} \n value_counts() returned:\n{} \n \n",
                column, counts
            ));
            Ok(counts)
        })
    }

    /// Descriptive statistics: moments and quartiles for numeric columns,
    /// count/unique/top/freq for everything else.
    pub fn describe_variable(
        &self,
        df: &DataFrame,
        selection: impl Into<Selection>,
    ) -> Result<Vec<Description>> {
        self.for_each_column(selection.into(), |column| {
            let description = describe(column_series(df, column)?)?;
            self.emit(format!(
                "Now analyzing variable: {} \n describe() returned:\n{} \n \n",
                column, description
            ));
            Ok(description)
        })
    }

    pub fn display_unique_values(
        &self,
        df: &DataFrame,
        selection: impl Into<Selection>,
    ) -> Result<Vec<UniqueValues>> {
        self.for_each_column(selection.into(), |column| {
            let unique = UniqueValues {
                column: column.to_string(),
                values: distinct_in_order(text_values(column_series(df, column)?)?),
            };
            self.emit(format!("{} has the following values: \n{}", column, unique));
            Ok(unique)
        })
    }

    /// Rows whose postal code is not exactly `zip_width` characters once
    /// coerced to text. Missing codes are reported too.
    pub fn check_zip(&self, df: &DataFrame, column: &str) -> Result<Vec<ZipIssue>> {
        let values = text_values(column_series(df, column)?)?;
        let issues: Vec<ZipIssue> = values
            .into_iter()
            .enumerate()
            .filter(|(_, value)| {
                value
                    .as_deref()
                    .is_none_or(|code| code.chars().count() != self.zip_width)
            })
            .map(|(row, value)| ZipIssue { row, value })
            .collect();

        info!(column, invalid = issues.len(), "Checked postal codes");
        let mut listing = format!(
            "The following rows do not have {} characters:",
            self.zip_width
        );
        for issue in &issues {
            listing.push_str(&format!(
                "\n{:<8}{}",
                issue.row,
                issue.value.as_deref().unwrap_or("nan")
            ));
        }
        self.emit(listing);
        Ok(issues)
    }

    /// Coerce a postal-code column to text and left-pad it with zeros to
    /// `zip_width`. Longer codes and missing values are left as they are; a
    /// leading sign stays in front of the padding.
    pub fn fix_zip(&self, df: &mut DataFrame, column: &str) -> Result<()> {
        let series = column_series(df, column)?;
        let name = series.name().clone();
        let padded: Vec<Option<String>> = text_values(series)?
            .into_iter()
            .map(|value| value.map(|code| zero_fill(&code, self.zip_width)))
            .collect();

        df.replace(column, Series::new(name, padded))?;
        debug!(column, width = self.zip_width, "Padded postal codes");
        Ok(())
    }
}

/// Left-pad `code` with zeros to `width` characters, after any leading sign.
fn zero_fill(code: &str, width: usize) -> String {
    let len = code.chars().count();
    if len >= width {
        return code.to_string();
    }

    let padding = "0".repeat(width - len);
    match code.chars().next() {
        Some(sign @ ('+' | '-')) => format!("{}{}{}", sign, padding, &code[1..]),
        _ => format!("{}{}", padding, code),
    }
}

/// Tally of distinct non-missing values, most frequent first; ties keep
/// first-occurrence order.
pub fn value_counts(series: &Series) -> Result<ValueCounts> {
    let mut entries: Vec<ValueCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for value in text_values(series)?.into_iter().flatten() {
        match index.get(&value) {
            Some(&pos) => entries[pos].count += 1,
            None => {
                index.insert(value.clone(), entries.len());
                entries.push(ValueCount { value, count: 1 });
            }
        }
    }
    // stable sort keeps first-occurrence order among equal counts
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    Ok(ValueCounts {
        column: series.name().to_string(),
        entries,
    })
}

/// Describe a column according to its dtype.
pub fn describe(series: &Series) -> Result<Description> {
    let column = series.name().to_string();

    if is_numeric_dtype(series.dtype()) {
        let mut values = numeric_values(series)?;
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = values.len();
        let mean = if count == 0 {
            f64::NAN
        } else {
            values.iter().sum::<f64>() / count as f64
        };
        let std = if count < 2 {
            f64::NAN
        } else {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count as f64 - 1.0);
            variance.sqrt()
        };

        return Ok(Description::Numeric(NumericDescription {
            column,
            count,
            mean,
            std,
            min: values.first().copied().unwrap_or(f64::NAN),
            q25: quantile_sorted(&values, 0.25),
            q50: quantile_sorted(&values, 0.5),
            q75: quantile_sorted(&values, 0.75),
            max: values.last().copied().unwrap_or(f64::NAN),
        }));
    }

    let counts = value_counts(series)?;
    let top = counts.entries.first();
    Ok(Description::Categorical(CategoricalDescription {
        column,
        count: counts.entries.iter().map(|e| e.count).sum(),
        unique: counts.entries.len(),
        top: top.map(|e| e.value.clone()),
        freq: top.map(|e| e.count).unwrap_or(0),
    }))
}

/// Linearly interpolated quantile of an ascending slice; NaN when empty.
fn quantile_sorted(values: &[f64], quantile: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let pos = quantile.clamp(0.0, 1.0) * (values.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return values[lower];
    }
    let weight = pos - lower as f64;
    values[lower] + (values[upper] - values[lower]) * weight
}
