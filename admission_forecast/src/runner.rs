//! Forecast runner: fits the training series and keeps the evaluation window

use crate::data::{Record, Series};
use crate::error::{EvalError, Result};
use crate::models::{ComponentSeries, FittedForecast, Forecaster, Prediction};
use crate::window::EvaluationWindow;
use chrono::NaiveDate;
use tracing::{debug, info};

/// Forecast for an evaluation window
#[derive(Debug)]
pub struct ForecastResult {
    predictions: Vec<Prediction>,
    periods: usize,
    model: Box<dyn FittedForecast>,
}

impl ForecastResult {
    /// Predictions dated on or after the prediction start, ascending by date
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// Number of days requested from the model
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// The fitted model behind the predictions
    pub fn model(&self) -> &dyn FittedForecast {
        self.model.as_ref()
    }

    /// Predictions as a series, for plotting and summaries
    pub fn as_series(&self) -> Series {
        Series::new(
            self.predictions
                .iter()
                .map(|p| Record::new(p.date, p.yhat))
                .collect(),
        )
    }

    /// Model components restricted to the forecast dates
    pub fn components(&self) -> Result<Vec<ComponentSeries>> {
        let (Some(first), Some(last)) = (
            self.predictions.first().map(|p| p.date),
            self.predictions.last().map(|p| p.date),
        ) else {
            return Ok(Vec::new());
        };
        let end = last.succ_opt().unwrap_or(NaiveDate::MAX);

        Ok(self
            .model
            .components(self.periods)?
            .into_iter()
            .map(|component| ComponentSeries {
                series: component.series.between(first, end),
                name: component.name,
            })
            .collect())
    }
}

/// Runs a forecaster over an evaluation window
#[derive(Debug)]
pub struct ForecastRunner<'a> {
    forecaster: &'a dyn Forecaster,
}

impl<'a> ForecastRunner<'a> {
    /// Create a runner delegating to `forecaster`
    pub fn new(forecaster: &'a dyn Forecaster) -> Self {
        Self { forecaster }
    }

    /// Fit the training series and predict the window
    ///
    /// The model sees only `window.training_series()`. It is asked for
    /// `duration` days past the end of the training data and every prediction
    /// dated before the prediction start is dropped. Fit errors propagate
    /// unchanged.
    pub fn run(&self, window: &EvaluationWindow) -> Result<ForecastResult> {
        let periods = usize::try_from(window.duration().num_days()).map_err(|_| {
            EvalError::InvalidParameter(format!(
                "Prediction period must be positive, got {} days",
                window.duration().num_days()
            ))
        })?;

        let model = self.forecaster.fit(window.training_series())?;
        let raw = model.predict(periods)?;
        let raw_len = raw.len();

        let start = window.prediction_start();
        let mut predictions: Vec<Prediction> =
            raw.into_iter().filter(|p| p.date >= start).collect();
        predictions.sort_by_key(|p| p.date);

        debug!(
            periods,
            raw = raw_len,
            kept = predictions.len(),
            "trimmed predictions to the evaluation window"
        );
        info!(model = model.name(), predictions = predictions.len(), "forecast complete");

        Ok(ForecastResult {
            predictions,
            periods,
            model,
        })
    }
}
