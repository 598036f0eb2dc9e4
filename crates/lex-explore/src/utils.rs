//! Shared helpers for dtype classification and value extraction.

use crate::error::{ExploreError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date or datetime types
    Datetime,
    /// Boolean type
    Boolean,
    /// String/text type
    String,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::String
    } else {
        DtypeCategory::Other
    }
}

/// How the category dispatcher treats a column.
///
/// Only text and numeric columns are summarized; everything else is
/// reported with its dtype and left alone.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    Text,
    Numeric,
    Other(DataType),
}

impl ColumnKind {
    pub fn of(dtype: &DataType) -> Self {
        match get_dtype_category(dtype) {
            DtypeCategory::String => ColumnKind::Text,
            DtypeCategory::Numeric => ColumnKind::Numeric,
            DtypeCategory::Datetime | DtypeCategory::Boolean | DtypeCategory::Other => {
                ColumnKind::Other(dtype.clone())
            }
        }
    }
}

// =============================================================================
// Column Access
// =============================================================================

/// Look up a column by name, mapping a miss to [`ExploreError::ColumnNotFound`].
pub fn column_series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    if df.get_column_index(name).is_none() {
        return Err(ExploreError::ColumnNotFound(name.to_string()));
    }
    Ok(df.column(name)?.as_materialized_series())
}

/// Non-missing values of a numeric Series as `f64`, NaN excluded.
pub fn numeric_values(series: &Series) -> Result<Vec<f64>> {
    if !is_numeric_dtype(series.dtype()) {
        return Err(ExploreError::NotNumeric {
            column: series.name().to_string(),
            dtype: series.dtype().to_string(),
        });
    }

    let floats = series.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

/// Per-row missing flags. A value is missing when it is null, or NaN in a
/// float column.
pub fn missing_mask(series: &Series) -> Result<Vec<bool>> {
    if matches!(series.dtype(), DataType::Float32 | DataType::Float64) {
        let floats = series.cast(&DataType::Float64)?;
        return Ok(floats
            .f64()?
            .into_iter()
            .map(|v| v.is_none_or(f64::is_nan))
            .collect());
    }

    let nulls = series.is_null();
    Ok(nulls.into_iter().map(|v| v.unwrap_or(false)).collect())
}

/// Number of missing values, counting NaN in float columns.
pub fn missing_count(series: &Series) -> Result<usize> {
    if !matches!(series.dtype(), DataType::Float32 | DataType::Float64) {
        return Ok(series.null_count());
    }
    Ok(missing_mask(series)?.into_iter().filter(|missing| *missing).count())
}

/// All values of a Series coerced to text, missing values as `None`.
pub fn text_values(series: &Series) -> Result<Vec<Option<String>>> {
    let text = series.cast(&DataType::String)?;
    Ok(text
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Distinct values in first-occurrence order. `None` stands for missing.
pub fn distinct_in_order(values: Vec<Option<String>>) -> Vec<Option<String>> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

// =============================================================================
// Boolean Detection
// =============================================================================

/// A recognized two-valued vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanVocabulary {
    /// "yes" / "no"
    LowerYesNo,
    /// "Yes" / "No"
    TitleYesNo,
    /// 0 / 1
    ZeroOne,
}

impl BooleanVocabulary {
    pub const TEXT: [BooleanVocabulary; 2] =
        [BooleanVocabulary::LowerYesNo, BooleanVocabulary::TitleYesNo];

    /// Check if a text value belongs to this vocabulary.
    pub fn contains_text(self, value: &str) -> bool {
        match self {
            BooleanVocabulary::LowerYesNo => value == "yes" || value == "no",
            BooleanVocabulary::TitleYesNo => value == "Yes" || value == "No",
            BooleanVocabulary::ZeroOne => false,
        }
    }

    /// Check if a numeric value belongs to this vocabulary.
    pub fn contains_number(self, value: f64) -> bool {
        matches!(self, BooleanVocabulary::ZeroOne) && (value == 0.0 || value == 1.0)
    }
}

/// Check whether every non-missing value of a Series lies in a single
/// [`BooleanVocabulary`].
///
/// A Series without any non-missing value is boolean-like. Native boolean
/// columns always are, since `true`/`false` are `1`/`0`.
pub fn is_boolean_series(series: &Series) -> Result<bool> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return Ok(true);
    }

    match get_dtype_category(series.dtype()) {
        DtypeCategory::Boolean => Ok(true),
        DtypeCategory::Numeric => Ok(numeric_values(&non_null)?
            .into_iter()
            .all(|v| BooleanVocabulary::ZeroOne.contains_number(v))),
        DtypeCategory::String => {
            let text = non_null.cast(&DataType::String)?;
            let values: Vec<&str> = text.str()?.into_iter().flatten().collect();
            Ok(BooleanVocabulary::TEXT
                .iter()
                .any(|vocab| values.iter().all(|v| vocab.contains_text(v))))
        }
        DtypeCategory::Datetime | DtypeCategory::Other => Ok(false),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_dtype_category() {
        assert_eq!(get_dtype_category(&DataType::Int64), DtypeCategory::Numeric);
        assert_eq!(get_dtype_category(&DataType::Date), DtypeCategory::Datetime);
        assert_eq!(
            get_dtype_category(&DataType::Boolean),
            DtypeCategory::Boolean
        );
        assert_eq!(get_dtype_category(&DataType::String), DtypeCategory::String);
    }

    #[test]
    fn test_column_kind() {
        assert_eq!(ColumnKind::of(&DataType::String), ColumnKind::Text);
        assert_eq!(ColumnKind::of(&DataType::Int32), ColumnKind::Numeric);
        assert_eq!(ColumnKind::of(&DataType::Float64), ColumnKind::Numeric);
        assert_eq!(
            ColumnKind::of(&DataType::Boolean),
            ColumnKind::Other(DataType::Boolean)
        );
    }

    #[test]
    fn test_column_series_missing_column() {
        let df = df!["a" => [1, 2]].unwrap();
        let err = column_series(&df, "b").unwrap_err();
        assert!(matches!(err, ExploreError::ColumnNotFound(name) if name == "b"));
    }

    #[test]
    fn test_numeric_values_skips_nulls() {
        let series = Series::new("x".into(), &[Some(1.0), None, Some(3.0)]);
        assert_eq!(numeric_values(&series).unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_missing_counts_nan_in_float_columns() {
        let floats = Series::new("x".into(), &[Some(1.0), Some(f64::NAN), None, Some(3.0)]);
        assert_eq!(missing_mask(&floats).unwrap(), vec![false, true, true, false]);
        assert_eq!(missing_count(&floats).unwrap(), 2);
        assert_eq!(numeric_values(&floats).unwrap(), vec![1.0, 3.0]);

        let text = Series::new("y".into(), &[Some("NaN"), None]);
        assert_eq!(missing_mask(&text).unwrap(), vec![false, true]);
        assert_eq!(missing_count(&text).unwrap(), 1);
    }

    #[test]
    fn test_numeric_values_rejects_text() {
        let series = Series::new("x".into(), &["a", "b"]);
        assert!(matches!(
            numeric_values(&series),
            Err(ExploreError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_distinct_in_order() {
        let values = vec![
            Some("b".to_string()),
            None,
            Some("a".to_string()),
            Some("b".to_string()),
            None,
        ];
        assert_eq!(
            distinct_in_order(values),
            vec![Some("b".to_string()), None, Some("a".to_string())]
        );
    }

    #[test]
    fn test_boolean_vocabularies() {
        let lower = Series::new("a".into(), &[Some("yes"), None, Some("no")]);
        let title = Series::new("b".into(), &["Yes", "Yes"]);
        let ints = Series::new("c".into(), &[0i64, 1, 1]);
        let floats = Series::new("d".into(), &[1.0f64, 0.0]);
        assert!(is_boolean_series(&lower).unwrap());
        assert!(is_boolean_series(&title).unwrap());
        assert!(is_boolean_series(&ints).unwrap());
        assert!(is_boolean_series(&floats).unwrap());
    }

    #[test]
    fn test_boolean_rejects_mixed_and_foreign() {
        let mixed_case = Series::new("a".into(), &["yes", "No"]);
        let foreign = Series::new("b".into(), &["yes", "maybe"]);
        let empty_string = Series::new("c".into(), &["no", ""]);
        let text_digits = Series::new("d".into(), &["0", "1"]);
        let two = Series::new("e".into(), &[0i64, 2]);
        assert!(!is_boolean_series(&mixed_case).unwrap());
        assert!(!is_boolean_series(&foreign).unwrap());
        assert!(!is_boolean_series(&empty_string).unwrap());
        assert!(!is_boolean_series(&text_digits).unwrap());
        assert!(!is_boolean_series(&two).unwrap());
    }

    #[test]
    fn test_boolean_all_missing_is_vacuously_true() {
        let series = Series::new("a".into(), &[None::<&str>, None]);
        assert!(is_boolean_series(&series).unwrap());
    }
}
