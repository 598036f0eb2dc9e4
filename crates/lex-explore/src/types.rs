use crate::charts::{HistogramChart, NullMatrix};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Column Selection
// ============================================================================

/// Which columns a reporter should look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected; reporters print a notice and do nothing else.
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl Selection {
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Selection::None => Vec::new(),
            Selection::One(column) => vec![column.as_str()],
            Selection::Many(columns) => columns.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::None)
    }
}

impl From<&str> for Selection {
    fn from(column: &str) -> Self {
        Selection::One(column.to_string())
    }
}

impl From<String> for Selection {
    fn from(column: String) -> Self {
        Selection::One(column)
    }
}

impl From<Vec<String>> for Selection {
    fn from(columns: Vec<String>) -> Self {
        if columns.is_empty() {
            Selection::None
        } else {
            Selection::Many(columns)
        }
    }
}

impl From<&[&str]> for Selection {
    fn from(columns: &[&str]) -> Self {
        columns
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .into()
    }
}

impl<const N: usize> From<[&str; N]> for Selection {
    fn from(columns: [&str; N]) -> Self {
        Selection::from(&columns[..])
    }
}

impl<T: Into<Selection>> From<Option<T>> for Selection {
    fn from(selection: Option<T>) -> Self {
        selection.map(Into::into).unwrap_or_default()
    }
}

// ============================================================================
// Dataset Overview
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null_count: usize,
    pub dtype: String,
}

/// Shape, per-column non-null counts and dtypes of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
    pub estimated_size_bytes: usize,
}

impl fmt::Display for DatasetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<DataFrame>")?;
        writeln!(
            f,
            "RangeIndex: {} entries, 0 to {}",
            self.rows,
            self.rows.saturating_sub(1)
        )?;
        writeln!(f, "Data columns (total {} columns):", self.columns.len())?;
        writeln!(f, " {:<4}{:<24}{:<16}{}", "#", "Column", "Non-Null Count", "Dtype")?;
        writeln!(f, " {:<4}{:<24}{:<16}{}", "---", "------", "--------------", "-----")?;
        for (idx, column) in self.columns.iter().enumerate() {
            writeln!(
                f,
                " {:<4}{:<24}{:<16}{}",
                idx,
                column.name,
                format!("{} non-null", column.non_null_count),
                column.dtype
            )?;
        }

        let mut dtype_counts: Vec<(&str, usize)> = Vec::new();
        for column in &self.columns {
            match dtype_counts.iter_mut().find(|(d, _)| *d == column.dtype) {
                Some((_, count)) => *count += 1,
                None => dtype_counts.push((column.dtype.as_str(), 1)),
            }
        }
        let dtypes: Vec<String> = dtype_counts
            .iter()
            .map(|(dtype, count)| format!("{}({})", dtype, count))
            .collect();
        writeln!(f, "dtypes: {}", dtypes.join(", "))?;
        write!(f, "memory usage: {} bytes", self.estimated_size_bytes)
    }
}

/// Duplicate-row breakdown: a row is a duplicate when an identical row
/// appears earlier in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateSummary {
    pub unique_rows: usize,
    pub duplicate_rows: usize,
}

impl fmt::Display for DuplicateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = vec![("False", self.unique_rows), ("True", self.duplicate_rows)];
        entries.retain(|(_, count)| *count > 0);
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        for (label, count) in entries {
            writeln!(f, "{:<8}{}", label, count)?;
        }
        Ok(())
    }
}

// ============================================================================
// Column Summaries
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Occurrences per distinct non-missing value, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCounts {
    pub column: String,
    pub entries: Vec<ValueCount>,
}

impl ValueCounts {
    pub fn count_of(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.value == value)
            .map(|e| e.count)
    }
}

impl fmt::Display for ValueCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.column)?;
        for entry in &self.entries {
            writeln!(f, "{:<24}{}", entry.value, entry.count)?;
        }
        write!(f, "Name: count, Length: {}", self.entries.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericDescription {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalDescription {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

/// Descriptive statistics, shaped by the column's dtype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Description {
    Numeric(NumericDescription),
    Categorical(CategoricalDescription),
}

impl Description {
    pub fn column(&self) -> &str {
        match self {
            Description::Numeric(d) => &d.column,
            Description::Categorical(d) => &d.column,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Description::Numeric(d) => d.count,
            Description::Categorical(d) => d.count,
        }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Description::Numeric(d) => {
                let rows = [
                    ("mean", d.mean),
                    ("std", d.std),
                    ("min", d.min),
                    ("25%", d.q25),
                    ("50%", d.q50),
                    ("75%", d.q75),
                    ("max", d.max),
                ];
                writeln!(f, "{:<8}{}", "count", d.count)?;
                for (label, value) in rows {
                    writeln!(f, "{:<8}{:.6}", label, value)?;
                }
                write!(f, "Name: {}", d.column)
            }
            Description::Categorical(d) => {
                writeln!(f, "{:<8}{}", "count", d.count)?;
                writeln!(f, "{:<8}{}", "unique", d.unique)?;
                writeln!(f, "{:<8}{}", "top", d.top.as_deref().unwrap_or("NaN"))?;
                writeln!(f, "{:<8}{}", "freq", d.freq)?;
                write!(f, "Name: {}", d.column)
            }
        }
    }
}

/// Distinct values in first-occurrence order; `None` marks missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueValues {
    pub column: String,
    pub values: Vec<Option<String>>,
}

impl fmt::Display for UniqueValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .values
            .iter()
            .map(|v| match v {
                Some(value) => format!("'{}'", value),
                None => "nan".to_string(),
            })
            .collect();
        write!(f, "[{}]", rendered.join(" "))
    }
}

/// Distinct-count completeness check for identifier-like columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardinalityCheck {
    pub column: String,
    pub distinct_count: usize,
    pub expected: usize,
    pub filled: bool,
}

/// A postal code whose text form has the wrong width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipIssue {
    pub row: usize,
    pub value: Option<String>,
}

/// What the category dispatcher did with one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnAssignment {
    /// Text column, tallied.
    ValueCounts(ValueCounts),
    /// Numeric column, described.
    Described(Description),
    /// Any other dtype: reported, not analyzed.
    Skipped { column: String, dtype: String },
}

impl ColumnAssignment {
    pub fn column(&self) -> &str {
        match self {
            ColumnAssignment::ValueCounts(counts) => &counts.column,
            ColumnAssignment::Described(description) => description.column(),
            ColumnAssignment::Skipped { column, .. } => column,
        }
    }
}

// ============================================================================
// Inspection Reports
// ============================================================================

/// Steps of the display report, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStep {
    DatasetInfo,
    Duplicates,
    NullMatrix,
    BooleanColumns,
    Histograms,
}

impl fmt::Display for ReportStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportStep::DatasetInfo => "dataset info",
            ReportStep::Duplicates => "duplicate rows",
            ReportStep::NullMatrix => "null-value matrix",
            ReportStep::BooleanColumns => "boolean columns",
            ReportStep::Histograms => "histograms",
        };
        f.write_str(name)
    }
}

/// The step that aborted a display report, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub step: ReportStep,
    pub message: String,
}

/// Output of [`crate::Analyzer::display_info`].
///
/// Steps run in [`ReportStep`] order; the first failure stops the rest and
/// is recorded in `failure`, leaving later fields `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayReport {
    pub info: Option<DatasetInfo>,
    pub duplicates: Option<DuplicateSummary>,
    pub null_matrix: Option<NullMatrix>,
    pub boolean_columns: Option<Vec<String>>,
    pub histograms: Option<HistogramChart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StepFailure>,
}

impl DisplayReport {
    /// True when every step ran.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Output of [`crate::Analyzer::identify`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectionReport {
    pub has_null: Vec<String>,
    pub display: DisplayReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_conversions() {
        assert_eq!(Selection::from("a"), Selection::One("a".to_string()));
        assert_eq!(
            Selection::from(["a", "b"]),
            Selection::Many(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(Selection::from(Vec::<String>::new()), Selection::None);
        assert_eq!(Selection::from(None::<&str>), Selection::None);
        assert_eq!(Selection::from(["a", "b"]).columns(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_summary_display_orders_by_count() {
        let summary = DuplicateSummary {
            unique_rows: 8,
            duplicate_rows: 2,
        };
        let rendered = summary.to_string();
        let false_pos = rendered.find("False").unwrap();
        let true_pos = rendered.find("True").unwrap();
        assert!(false_pos < true_pos);

        let clean = DuplicateSummary {
            unique_rows: 3,
            duplicate_rows: 0,
        };
        assert!(!clean.to_string().contains("True"));
    }

    #[test]
    fn test_unique_values_display() {
        let unique = UniqueValues {
            column: "city".to_string(),
            values: vec![Some("Oslo".to_string()), None],
        };
        assert_eq!(unique.to_string(), "['Oslo' nan]");
    }

    #[test]
    fn test_display_report_completeness() {
        let mut report = DisplayReport::default();
        assert!(report.is_complete());
        report.failure = Some(StepFailure {
            step: ReportStep::Histograms,
            message: "boom".to_string(),
        });
        assert!(!report.is_complete());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("Histograms"));
    }
}
