//! Evaluation window: the split between training data and the period to forecast

use crate::data::Series;
use crate::error::{EvalError, Result};
use crate::utils::shift_date;
use chrono::{Duration, NaiveDate};
use tracing::debug;

/// Split point and horizon of a forecast evaluation
///
/// Constructed only through [`EvaluationWindow::build`], which rejects
/// windows without recorded outcomes to compare against. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationWindow {
    prediction_start: NaiveDate,
    prediction_end: NaiveDate,
    duration: Duration,
    training_series: Series,
    full_series: Series,
}

impl EvaluationWindow {
    /// Build a window forecasting `duration` from `prediction_start`
    ///
    /// The training series holds every record strictly before
    /// `prediction_start`. Fails with [`EvalError::WindowInfeasible`] when
    /// `prediction_start + duration` is after the last date of `full_series`.
    /// `duration` must be a positive number of whole days. An empty training
    /// series is accepted here; fitting it fails later.
    pub fn build(
        full_series: Series,
        prediction_start: NaiveDate,
        duration: Duration,
    ) -> Result<Self> {
        let days = duration.num_days();
        if days < 1 || duration != Duration::days(days) {
            return Err(EvalError::InvalidParameter(format!(
                "Prediction period must be a positive number of whole days, got {}",
                duration
            )));
        }

        let prediction_end = shift_date(prediction_start, duration)?;
        let last_date = full_series.last_date();

        match last_date {
            Some(last) if prediction_end <= last => {}
            _ => {
                return Err(EvalError::WindowInfeasible {
                    prediction_end,
                    last_date,
                })
            }
        }

        let training_series = full_series.before(prediction_start);
        debug!(
            %prediction_start,
            %prediction_end,
            training = training_series.len(),
            full = full_series.len(),
            "built evaluation window"
        );

        Ok(Self {
            prediction_start,
            prediction_end,
            duration,
            training_series,
            full_series,
        })
    }

    /// First day to be forecast
    pub fn prediction_start(&self) -> NaiveDate {
        self.prediction_start
    }

    /// `prediction_start + duration`
    pub fn prediction_end(&self) -> NaiveDate {
        self.prediction_end
    }

    /// Span of days to forecast
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Records strictly before the prediction start
    pub fn training_series(&self) -> &Series {
        &self.training_series
    }

    /// The complete series, holding the recorded outcomes
    pub fn full_series(&self) -> &Series {
        &self.full_series
    }

    /// Display band `[prediction_start - duration, prediction_start + duration)`
    pub fn display_band(&self) -> Result<(NaiveDate, NaiveDate)> {
        Ok((
            shift_date(self.prediction_start, -self.duration)?,
            self.prediction_end,
        ))
    }
}
