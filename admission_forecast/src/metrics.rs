//! Metrics for evaluating forecast accuracy against recorded outcomes

use crate::error::{EvalError, Result};
use crate::runner::ForecastResult;
use crate::window::EvaluationWindow;
use chrono::NaiveDate;
use serde::Serialize;

/// One day of the forecast next to its recorded outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Day of the forecast
    pub date: NaiveDate,
    /// Predicted count
    pub predicted: f64,
    /// Recorded count, if the day is present in the full series
    pub actual: Option<f64>,
}

/// Pair each forecast inside `[prediction_start, prediction_end)` with its outcome
pub fn comparison_rows(window: &EvaluationWindow, result: &ForecastResult) -> Vec<ComparisonRow> {
    result
        .predictions()
        .iter()
        .filter(|p| p.date >= window.prediction_start() && p.date < window.prediction_end())
        .map(|p| ComparisonRow {
            date: p.date,
            predicted: p.yhat,
            actual: window.full_series().value_on(p.date),
        })
        .collect()
}

/// Score the forecast against the recorded outcomes of the window
pub fn evaluate(window: &EvaluationWindow, result: &ForecastResult) -> Result<ForecastAccuracy> {
    let (forecast, actual): (Vec<f64>, Vec<f64>) = comparison_rows(window, result)
        .into_iter()
        .filter_map(|row| row.actual.map(|actual| (row.predicted, actual)))
        .unzip();

    if forecast.is_empty() {
        return Err(EvalError::Data(format!(
            "No recorded outcomes overlap the forecast between {} and {}",
            window.prediction_start(),
            window.prediction_end()
        )));
    }

    forecast_accuracy(&forecast, &actual)
}

/// Calculate accuracy metrics for a forecast vs actual values
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(EvalError::Data(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = forecast.len() as f64;

    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual.iter())
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let rmse = mse.sqrt();

    // Days with zero admissions have no defined percentage error
    let nonzero = actual.iter().filter(|&&a| a != 0.0).count();
    let mape = if nonzero > 0 {
        actual
            .iter()
            .zip(errors.iter())
            .filter(|(&a, _)| a != 0.0)
            .map(|(&a, &e)| (e.abs() / a.abs()) * 100.0)
            .sum::<f64>()
            / nonzero as f64
    } else {
        f64::NAN
    };

    let smape = actual
        .iter()
        .zip(forecast.iter())
        .map(|(&a, &f)| {
            let denominator = a.abs() + f.abs();
            if denominator == 0.0 {
                0.0
            } else {
                200.0 * (a - f).abs() / denominator
            }
        })
        .sum::<f64>()
        / n;

    Ok(ForecastAccuracy {
        points: forecast.len(),
        mae,
        mse,
        rmse,
        mape,
        smape,
    })
}

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastAccuracy {
    /// Number of days scored
    pub points: usize,
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error over days with non-zero outcomes
    pub mape: f64,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy ({} days):", self.points)?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        writeln!(f, "  SMAPE: {:.4}%", self.smape)?;
        Ok(())
    }
}
