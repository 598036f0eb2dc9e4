//! CSV loading with fallback strategies.

use crate::error::{ExploreError, Result};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, error, info};

/// Rows scanned when inferring column dtypes.
const INFER_SCHEMA_ROWS: usize = 1000;

/// Cell contents read as missing, besides empty fields.
const NULL_MARKERS: [&str; 5] = ["NA", "N/A", "NaN", "nan", "null"];

fn null_values() -> Option<NullValues> {
    Some(NullValues::AllColumns(
        NULL_MARKERS.iter().map(|m| (*m).into()).collect(),
    ))
}

/// Load a delimited text file into a DataFrame.
///
/// Tries quoted parsing first, then unquoted, then a pre-cleaned copy of
/// the file content.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ExploreError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file not found: {}", path.display()),
        )));
    }
    info!("Loading dataset from: {}", path.display());

    // Strategy 1: Standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(null_values()),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Standard loading failed: {}", e),
    }

    // Strategy 2: Without quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(None)
                .with_null_values(null_values()),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Loading without quotes failed: {}", e),
    }

    // Strategy 3: Pre-clean content
    match std::fs::read_to_string(path) {
        Ok(content) => read_csv_str(&clean_csv_content(&content)),
        Err(e) => {
            error!("Could not read file: {}", e);
            Err(e.into())
        }
    }
}

/// Parse CSV text that is already in memory.
pub fn read_csv_str(content: &str) -> Result<DataFrame> {
    let cursor = Cursor::new(content.to_string());
    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_null_values(null_values()))
        .into_reader_with_file_handle(cursor)
        .finish()?;
    Ok(df)
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
