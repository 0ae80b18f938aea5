//! Command line configuration for the evaluation binary

use crate::data::{ColumnSpec, DEFAULT_DATE_COLUMN, DEFAULT_VALUE_COLUMN};
use crate::error::Result;
use crate::models::ModelKind;
use crate::utils::{parse_date, parse_period};
use chrono::{Duration, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

/// Evaluate a forecast of daily ICU admissions against recorded outcomes
#[derive(Debug, Clone, Parser)]
#[command(name = "evaluate_forecast")]
#[command(
    about = "Forecast daily admission counts and compare them with what happened",
    long_about = None
)]
pub struct Args {
    /// CSV file with a header row, one date column and one count column
    #[arg(short, long)]
    pub input: PathBuf,

    /// Name of the date column
    #[arg(long, default_value = DEFAULT_DATE_COLUMN)]
    pub date_column: String,

    /// Name of the count column
    #[arg(long, default_value = DEFAULT_VALUE_COLUMN)]
    pub value_column: String,

    /// First day to forecast (e.g. 2021-01-15)
    #[arg(short, long)]
    pub start: String,

    /// Span to forecast (e.g. "15 days", "10d", "2 weeks")
    #[arg(short, long, default_value = "15 days")]
    pub period: String,

    /// Forecasting engine
    #[arg(short, long, value_enum, default_value_t = ModelKind::Holt)]
    pub model: ModelKind,

    /// Level smoothing factor, between 0 and 1
    #[arg(long, default_value_t = 0.3)]
    pub alpha: f64,

    /// Trend smoothing factor for Holt, between 0 and 1
    #[arg(long, default_value_t = 0.05)]
    pub beta: f64,

    /// Directory the SVG charts are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Write the forecast next to the recorded outcomes as CSV
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print the evaluation summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated settings for one evaluation run
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub input: PathBuf,
    pub columns: ColumnSpec,
    pub prediction_start: NaiveDate,
    pub period: Duration,
    pub model: ModelKind,
    pub alpha: f64,
    pub beta: f64,
    pub output_dir: PathBuf,
    pub export: Option<PathBuf>,
}

impl Args {
    /// Parse the date and period strings into a validated configuration
    pub fn into_config(self) -> Result<EvaluationConfig> {
        let prediction_start = parse_date(&self.start)?;
        let period = parse_period(&self.period)?;

        Ok(EvaluationConfig {
            input: self.input,
            columns: ColumnSpec {
                date_column: self.date_column,
                value_column: self.value_column,
            },
            prediction_start,
            period,
            model: self.model,
            alpha: self.alpha,
            beta: self.beta,
            output_dir: self.output_dir,
            export: self.export,
        })
    }
}
