//! # Forecast Math
//!
//! Forecasting engines for daily count series.
//! Every engine is fitted on a plain slice of observations and can then
//! produce in-sample values, out-of-sample forecasts and the named
//! components behind them. Dates are the caller's concern.

use std::fmt::Debug;
use thiserror::Error;

pub mod forecasting;

pub use crate::forecasting::{ExponentialSmoothing, HoltLinear, LinearTrend};

/// Errors that can occur while fitting a forecasting engine
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// A named series underlying a fitted model, spanning the training
/// observations followed by the forecast horizon
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Component name, e.g. `trend` or `level`
    pub name: &'static str,
    /// One value per training observation, then one per forecast step
    pub values: Vec<f64>,
}

/// Forecasting engine that can be fitted on a series of observations
pub trait ForecastModel: Debug + Clone {
    /// The type of fitted model produced
    type Trained: TrainedModel;

    /// Fit the engine on the observations, oldest first
    fn train(&self, values: &[f64]) -> Result<Self::Trained>;

    /// Name of the engine, including its parameters
    fn name(&self) -> &str;
}

/// Fitted forecasting engine
pub trait TrainedModel: Debug {
    /// One-step-ahead in-sample values, one per training observation
    fn fitted(&self) -> &[f64];

    /// Forecast `horizon` steps past the last training observation
    fn forecast(&self, horizon: usize) -> Vec<f64>;

    /// Decompose the fit into named components covering history plus `horizon`
    fn components(&self, horizon: usize) -> Vec<Component>;

    /// Name of the engine that produced this fit
    fn name(&self) -> &str;
}

/// Reject series that are too short or contain non-finite values
pub(crate) fn validate_observations(values: &[f64], min_len: usize, model: &str) -> Result<()> {
    if values.len() < min_len {
        return Err(MathError::InsufficientData(format!(
            "{} needs at least {} observations, got {}",
            model,
            min_len,
            values.len()
        )));
    }

    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(format!(
            "Observation {} is not a finite number",
            index
        )));
    }

    Ok(())
}

/// Validate a smoothing parameter in the open interval (0, 1)
pub(crate) fn validate_smoothing(name: &str, value: f64) -> Result<()> {
    if value <= 0.0 || value >= 1.0 || value.is_nan() {
        return Err(MathError::InvalidInput(format!(
            "{} must be between 0 and 1 (exclusive)",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_observations() {
        assert!(validate_observations(&[1.0, 2.0], 2, "test").is_ok());
        assert!(matches!(
            validate_observations(&[], 1, "test"),
            Err(MathError::InsufficientData(_))
        ));
        assert!(matches!(
            validate_observations(&[1.0, f64::NAN], 1, "test"),
            Err(MathError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_smoothing() {
        assert!(validate_smoothing("Alpha", 0.5).is_ok());
        assert!(validate_smoothing("Alpha", 0.0).is_err());
        assert!(validate_smoothing("Alpha", 1.0).is_err());
        assert!(validate_smoothing("Alpha", f64::NAN).is_err());
    }
}
