//! CLI entry point for the exploration helpers.

use anyhow::{Result, anyhow};
use clap::Parser;
use lex_explore::{Analyzer, ExploreConfig, Selection};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Exploratory data analysis for CSV datasets",
    long_about = "Loads a CSV file, reports columns with missing values, boolean-like columns,\n\
                  duplicate rows and histograms, and summarizes selected columns.\n\n\
                  EXAMPLES:\n  \
                  # Full inspection report\n  \
                  lex-explore -i customers.csv\n\n  \
                  # Summarize columns by dtype\n  \
                  lex-explore -i customers.csv --columns State,Income\n\n  \
                  # Check that an identifier column is complete\n  \
                  lex-explore -i customers.csv --cardinality UID --expected-cardinality 10000\n\n  \
                  # Machine-readable report\n  \
                  lex-explore -i customers.csv --json"
)]
struct Args {
    /// Path to the CSV file to inspect
    #[arg(short, long)]
    input: PathBuf,

    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Columns to summarize by dtype (text: value counts, numeric: describe)
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Columns to tally with value counts
    #[arg(long, value_delimiter = ',')]
    value_counts: Vec<String>,

    /// Columns to describe
    #[arg(long, value_delimiter = ',')]
    describe: Vec<String>,

    /// Columns whose unique values should be listed
    #[arg(long, value_delimiter = ',')]
    unique: Vec<String>,

    /// Columns whose distinct count is compared to the expected cardinality
    #[arg(long, value_delimiter = ',')]
    cardinality: Vec<String>,

    /// Report postal codes with the wrong width
    #[arg(long)]
    check_zip: bool,

    /// Zero-pad postal codes before any other reporting
    #[arg(long)]
    fix_zip: bool,

    /// Distinct count that marks a column as completely filled
    #[arg(long)]
    expected_cardinality: Option<usize>,

    /// Number of histogram bins
    #[arg(long)]
    histogram_bins: Option<usize>,

    /// Column inspected by --check-zip
    #[arg(long)]
    zip_check_column: Option<String>,

    /// Column padded by --fix-zip
    #[arg(long)]
    zip_fix_column: Option<String>,

    /// Expected postal-code width
    #[arg(long)]
    zip_width: Option<usize>,

    /// Maximum number of row bands in the null-value matrix
    #[arg(long)]
    matrix_rows: Option<usize>,

    /// Skip the full inspection report
    #[arg(long)]
    no_identify: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Print the inspection report as JSON and nothing else
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only carries JSON.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<ExploreConfig> {
    let base = match &args.config {
        Some(path) => ExploreConfig::from_json_file(path)?,
        None => ExploreConfig::default(),
    };

    let mut builder = ExploreConfig::builder().base(base).echo(!args.json);
    if let Some(count) = args.expected_cardinality {
        builder = builder.expected_cardinality(count);
    }
    if let Some(bins) = args.histogram_bins {
        builder = builder.histogram_bins(bins);
    }
    if let Some(ref column) = args.zip_check_column {
        builder = builder.zip_check_column(column);
    }
    if let Some(ref column) = args.zip_fix_column {
        builder = builder.zip_fix_column(column);
    }
    if let Some(width) = args.zip_width {
        builder = builder.zip_width(width);
    }
    if let Some(rows) = args.matrix_rows {
        builder = builder.null_matrix_rows(rows);
    }

    Ok(builder.build()?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input.display()));
    }

    let config = build_config(&args)?;
    let mut analyzer = Analyzer::from_path(&args.input, config)?;
    info!("Dataset loaded successfully: {:?}", analyzer.dataset().shape());

    if args.fix_zip {
        analyzer.fix_zip()?;
    }

    if args.json {
        let report = analyzer.identify()?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !args.no_identify {
        let report = analyzer.identify()?;
        if let Some(failure) = &report.display.failure {
            tracing::warn!("Report incomplete at step '{}'", failure.step);
        }
    }

    if args.check_zip {
        analyzer.check_zip()?;
    }

    if !args.columns.is_empty() {
        analyzer.determine_category_assignment(args.columns.as_slice())?;
    }

    let df = analyzer.dataset();
    let reporter = analyzer.reporter();
    if !args.value_counts.is_empty() {
        reporter.verify_value_counts(df, Selection::from(args.value_counts.clone()))?;
    }
    if !args.describe.is_empty() {
        reporter.describe_variable(df, Selection::from(args.describe.clone()))?;
    }
    if !args.unique.is_empty() {
        reporter.display_unique_values(df, Selection::from(args.unique.clone()))?;
    }
    if !args.cardinality.is_empty() {
        reporter.verify_individual_counts(df, Selection::from(args.cardinality.clone()))?;
    }

    Ok(())
}
