//! Error types for the admission_forecast crate

use chrono::NaiveDate;
use forecast_math::MathError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the admission_forecast crate
#[derive(Debug, Error)]
pub enum EvalError {
    /// Malformed input: missing columns, unparseable dates or counts
    #[error("Parse error: {0}")]
    Parse(String),

    /// The evaluation window ends after the last recorded outcome
    #[error("{}", infeasible_message(.prediction_end, .last_date))]
    WindowInfeasible {
        prediction_end: NaiveDate,
        last_date: Option<NaiveDate>,
    },

    /// The forecasting engine could not fit the training series
    #[error("Fit error: {0}")]
    Fit(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data needed for scoring a forecast
    #[error("Data error: {0}")]
    Data(String),

    /// Error from the chart rendering backend
    #[error("Render error: {0}")]
    Render(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error writing the comparison export
    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    /// Error serializing the evaluation summary
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn infeasible_message(prediction_end: &NaiveDate, last_date: &Option<NaiveDate>) -> String {
    match last_date {
        Some(last) => format!(
            "Window infeasible: prediction ends {} but the last recorded date is {}",
            prediction_end, last
        ),
        None => format!(
            "Window infeasible: prediction ends {} but the series has no records",
            prediction_end
        ),
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, EvalError>;

impl From<PolarsError> for EvalError {
    fn from(err: PolarsError) -> Self {
        EvalError::Parse(err.to_string())
    }
}

impl From<MathError> for EvalError {
    fn from(err: MathError) -> Self {
        EvalError::Fit(err.to_string())
    }
}
