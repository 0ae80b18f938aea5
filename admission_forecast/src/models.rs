//! Forecasting collaborators for count series
//!
//! A [`Forecaster`] fits a training [`Series`] and hands back an opaque
//! [`FittedForecast`]. Predictions follow the future-frame convention of
//! the usual fit/predict engines: every training date with its in-sample
//! value, followed by one entry per requested day after the last training
//! date. Trimming to the evaluation window is the caller's job.

use crate::data::{Record, Series};
use crate::error::{EvalError, Result};
use crate::utils::future_dates;
use chrono::NaiveDate;
use clap::ValueEnum;
use forecast_math::{ExponentialSmoothing, ForecastModel, HoltLinear, LinearTrend, TrainedModel};
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

/// Predicted value for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Day the prediction is for
    pub date: NaiveDate,
    /// Predicted count
    pub yhat: f64,
}

/// A named, dated component of a fitted model
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSeries {
    /// Component name, e.g. `trend`
    pub name: String,
    /// Component values by date
    pub series: Series,
}

/// Fitted forecasting model
pub trait FittedForecast: Debug {
    /// Predict the training history plus `periods` days past its last date
    fn predict(&self, periods: usize) -> Result<Vec<Prediction>>;

    /// Decompose the fit over the same frame as [`FittedForecast::predict`]
    fn components(&self, periods: usize) -> Result<Vec<ComponentSeries>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecasting engine that can be fitted on a count series
pub trait Forecaster: Debug {
    /// Fit the engine on `training`
    ///
    /// Fails with [`EvalError::Fit`] when the series is empty or otherwise
    /// cannot be fitted.
    fn fit(&self, training: &Series) -> Result<Box<dyn FittedForecast>>;

    /// Name of the engine
    fn name(&self) -> &str;
}

/// Adapts a `forecast_math` engine to dated count series
#[derive(Debug, Clone)]
pub struct ModelForecaster<M> {
    model: M,
}

impl<M: ForecastModel> ModelForecaster<M> {
    /// Wrap an engine
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Get the wrapped engine
    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M> Forecaster for ModelForecaster<M>
where
    M: ForecastModel,
    M::Trained: 'static,
{
    fn fit(&self, training: &Series) -> Result<Box<dyn FittedForecast>> {
        if training.is_empty() {
            return Err(EvalError::Fit(format!(
                "{} cannot be fitted on an empty training series",
                self.model.name()
            )));
        }

        let trained = self.model.train(&training.values())?;
        debug!(model = self.model.name(), observations = training.len(), "fitted model");

        Ok(Box::new(FittedModel {
            trained,
            dates: training.dates(),
        }))
    }

    fn name(&self) -> &str {
        self.model.name()
    }
}

#[derive(Debug)]
struct FittedModel<T> {
    trained: T,
    dates: Vec<NaiveDate>,
}

impl<T: TrainedModel> FittedModel<T> {
    /// Training dates followed by `periods` future days
    fn frame(&self, periods: usize) -> Result<Vec<NaiveDate>> {
        let last = self.dates.last().copied().ok_or_else(|| {
            EvalError::Fit("Fitted model has no training dates".to_string())
        })?;

        let mut frame = self.dates.clone();
        frame.extend(future_dates(last, periods)?);
        Ok(frame)
    }
}

impl<T: TrainedModel> FittedForecast for FittedModel<T> {
    fn predict(&self, periods: usize) -> Result<Vec<Prediction>> {
        let frame = self.frame(periods)?;
        let values = self
            .trained
            .fitted()
            .iter()
            .copied()
            .chain(self.trained.forecast(periods));

        Ok(frame
            .into_iter()
            .zip(values)
            .map(|(date, yhat)| Prediction { date, yhat })
            .collect())
    }

    fn components(&self, periods: usize) -> Result<Vec<ComponentSeries>> {
        let frame = self.frame(periods)?;

        Ok(self
            .trained
            .components(periods)
            .into_iter()
            .map(|component| ComponentSeries {
                name: component.name.to_string(),
                series: Series::new(
                    frame
                        .iter()
                        .zip(component.values)
                        .map(|(&date, value)| Record::new(date, value))
                        .collect(),
                ),
            })
            .collect())
    }

    fn name(&self) -> &str {
        self.trained.name()
    }
}

/// Forecasting engines selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Holt's linear method (level and trend smoothing)
    #[default]
    Holt,
    /// Simple exponential smoothing
    Ses,
    /// Least squares linear trend
    Linear,
}

impl ModelKind {
    /// Build the engine with the given smoothing parameters
    ///
    /// `beta` only applies to [`ModelKind::Holt`]; `alpha` is ignored by
    /// [`ModelKind::Linear`].
    pub fn build(self, alpha: f64, beta: f64) -> Result<Box<dyn Forecaster>> {
        let invalid = |e: forecast_math::MathError| EvalError::InvalidParameter(e.to_string());

        Ok(match self {
            ModelKind::Holt => Box::new(ModelForecaster::new(
                HoltLinear::new(alpha, beta).map_err(invalid)?,
            )),
            ModelKind::Ses => Box::new(ModelForecaster::new(
                ExponentialSmoothing::new(alpha).map_err(invalid)?,
            )),
            ModelKind::Linear => Box::new(ModelForecaster::new(LinearTrend::new())),
        })
    }
}
