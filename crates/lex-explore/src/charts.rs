//! Text charts: layered histograms and the null-value matrix.
//!
//! Each chart is plain data with a [`Display`] implementation, so the same
//! value can be printed to a terminal, serialized to JSON or asserted on.

use crate::error::{ExploreError, Result};
use crate::utils::missing_mask;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Widest bar drawn for the most populated bin.
const BAR_WIDTH: usize = 40;

pub const HISTOGRAM_TITLE: &str = "Histograms for Variables with Null Values";

// ============================================================================
// Histogram
// ============================================================================

/// Equal-width histogram over the non-missing values of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub column: String,
    /// `counts.len() + 1` bin edges, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning min..=max.
    ///
    /// The maximum falls into the last bin. A constant input spans
    /// `value - 0.5 ..= value + 0.5`, an empty input `0.0 ..= 1.0`.
    /// An infinite value makes the range unbinnable and is an error.
    pub fn from_values(column: impl Into<String>, values: &[f64], bins: usize) -> Result<Self> {
        let column = column.into();
        let bins = bins.max(1);
        let (min, max) = match values.iter().copied().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        }) {
            None => (0.0, 1.0),
            Some((lo, hi)) if (hi - lo).abs() < f64::EPSILON => (lo - 0.5, hi + 0.5),
            Some(range) => range,
        };
        if !min.is_finite() || !max.is_finite() {
            return Err(ExploreError::NonFiniteRange { column, min, max });
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for value in values {
            let index = (((value - min) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        let edges = (0..=bins).map(|idx| min + idx as f64 * width).collect();

        Ok(Self {
            column,
            edges,
            counts,
        })
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(start), Some(end)) => end - start,
            _ => 0.0,
        }
    }

    /// Number of values binned.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Why a has-null column did not get a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    BooleanLike,
    NonNumeric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedColumn {
    pub column: String,
    pub reason: SkipReason,
}

/// Histograms drawn on one shared chart, with a legend keyed by column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramChart {
    pub title: String,
    pub layers: Vec<Histogram>,
    pub skipped: Vec<SkippedColumn>,
}

impl Default for HistogramChart {
    fn default() -> Self {
        Self {
            title: HISTOGRAM_TITLE.to_string(),
            layers: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl HistogramChart {
    pub fn columns(&self) -> Vec<&str> {
        self.layers.iter().map(|h| h.column.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl fmt::Display for HistogramChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;
        if self.layers.is_empty() {
            return writeln!(f, "  (no histograms)");
        }

        writeln!(f, "Legend: {}", self.columns().join(", "))?;
        let peak = self
            .layers
            .iter()
            .flat_map(|h| h.counts.iter().copied())
            .max()
            .unwrap_or(0)
            .max(1);

        for histogram in &self.layers {
            writeln!(f)?;
            writeln!(f, "[{}]  Values -> Frequency", histogram.column)?;
            for (idx, count) in histogram.counts.iter().enumerate() {
                let bar = (count * BAR_WIDTH).div_ceil(peak);
                writeln!(
                    f,
                    "  {:>12.3} .. {:<12.3} |{:<width$}| {}",
                    histogram.edges[idx],
                    histogram.edges[idx + 1],
                    "#".repeat(bar),
                    count,
                    width = BAR_WIDTH
                )?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Null-Value Matrix
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullMatrixColumn {
    pub name: String,
    pub non_null: usize,
}

/// Missing-value pattern of a frame, with rows folded into bands.
///
/// `cells[band][column]` is true when every row of the band has a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullMatrix {
    pub rows: usize,
    pub band_size: usize,
    pub columns: Vec<NullMatrixColumn>,
    pub cells: Vec<Vec<bool>>,
}

impl NullMatrix {
    /// Build the matrix, folding rows so that at most `max_bands` bands remain.
    pub fn from_frame(df: &DataFrame, max_bands: usize) -> Result<Self> {
        let rows = df.height();
        let band_size = rows.div_ceil(max_bands.max(1)).max(1);
        let band_count = rows.div_ceil(band_size);

        let mut columns = Vec::with_capacity(df.width());
        let mut cells = vec![vec![true; df.width()]; band_count];

        for (col_idx, column) in df.get_columns().iter().enumerate() {
            let mask = missing_mask(column.as_materialized_series())?;
            let mut missing = 0;
            for (row, _) in mask.into_iter().enumerate().filter(|(_, m)| *m) {
                cells[row / band_size][col_idx] = false;
                missing += 1;
            }
            columns.push(NullMatrixColumn {
                name: column.name().to_string(),
                non_null: rows - missing,
            });
        }

        Ok(Self {
            rows,
            band_size,
            columns,
            cells,
        })
    }
}

impl fmt::Display for NullMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, column) in self.columns.iter().enumerate() {
            writeln!(
                f,
                "  {:>3}  {:<24} {}/{}",
                idx, column.name, column.non_null, self.rows
            )?;
        }
        writeln!(f)?;

        let header: String = (0..self.columns.len())
            .map(|idx| format!("{:>3}", idx))
            .collect();
        writeln!(f, "  rows      {}", header)?;
        for (band, cells) in self.cells.iter().enumerate() {
            let start = band * self.band_size;
            let line: String = cells
                .iter()
                .map(|present| if *present { "  #" } else { "  ." })
                .collect();
            writeln!(f, "  {:>8}  {}", start, line)?;
        }
        Ok(())
    }
}
