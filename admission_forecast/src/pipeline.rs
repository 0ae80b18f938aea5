//! End-to-end evaluation: load, split, forecast, score and report

use crate::config::EvaluationConfig;
use crate::data::{DataLoader, Series};
use crate::error::Result;
use crate::metrics::{self, ComparisonRow, ForecastAccuracy};
use crate::models::Forecaster;
use crate::report::{Plotter, Reporter};
use crate::runner::{ForecastResult, ForecastRunner};
use crate::window::EvaluationWindow;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Dates covered by a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
    pub len: usize,
}

impl Period {
    /// Period covered by `series`
    pub fn of(series: &Series) -> Self {
        Self {
            first: series.first_date(),
            last: series.last_date(),
            len: series.len(),
        }
    }
}

/// Outcome of one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub model: String,
    pub prediction_start: NaiveDate,
    pub prediction_end: NaiveDate,
    pub forecast: Period,
    pub training: Period,
    pub full: Period,
    pub accuracy: Option<ForecastAccuracy>,
}

impl EvaluationSummary {
    fn new(
        window: &EvaluationWindow,
        result: &ForecastResult,
        accuracy: Option<ForecastAccuracy>,
    ) -> Self {
        Self {
            model: result.model().name().to_string(),
            prediction_start: window.prediction_start(),
            prediction_end: window.prediction_end(),
            forecast: Period::of(&result.as_series()),
            training: Period::of(window.training_series()),
            full: Period::of(window.full_series()),
            accuracy,
        }
    }
}

/// Evaluate `forecaster` on the series loaded from `config.input`
///
/// Stages run in order and the first failure aborts the run: nothing is
/// reported for a window that cannot be built or a model that cannot be fitted.
pub fn evaluate<P: Plotter, W: Write>(
    config: &EvaluationConfig,
    forecaster: &dyn Forecaster,
    reporter: &mut Reporter<P, W>,
) -> Result<EvaluationSummary> {
    let series = DataLoader::from_csv(&config.input, &config.columns)?;
    info!(records = series.len(), "loaded series");

    evaluate_series(series, config, forecaster, reporter)
}

/// Evaluate `forecaster` on an already loaded series
pub fn evaluate_series<P: Plotter, W: Write>(
    series: Series,
    config: &EvaluationConfig,
    forecaster: &dyn Forecaster,
    reporter: &mut Reporter<P, W>,
) -> Result<EvaluationSummary> {
    let window = EvaluationWindow::build(series, config.prediction_start, config.period)?;
    let result = ForecastRunner::new(forecaster).run(&window)?;

    let accuracy = match metrics::evaluate(&window, &result) {
        Ok(accuracy) => Some(accuracy),
        Err(err) => {
            warn!(error = %err, "forecast accuracy unavailable");
            None
        }
    };

    reporter.report(&window, &result, accuracy.as_ref())?;

    if let Some(path) = &config.export {
        export_comparison(path, &metrics::comparison_rows(&window, &result))?;
    }

    Ok(EvaluationSummary::new(&window, &result, accuracy))
}

/// Write comparison rows as CSV with a header
pub fn export_comparison<P: AsRef<Path>>(path: P, rows: &[ComparisonRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.as_ref().display(), rows = rows.len(), "exported comparison");
    Ok(())
}
