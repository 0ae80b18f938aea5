//! Forecasting engines for time series prediction
//!
//! Contains implementations of:
//! - Linear trend (least squares on the observation index)
//! - Simple exponential smoothing
//! - Holt's linear method (double exponential smoothing)

use crate::{
    validate_observations, validate_smoothing, Component, ForecastModel, MathError, Result,
    TrainedModel,
};

/// Least squares straight line through the observations
#[derive(Debug, Clone)]
pub struct LinearTrend {
    name: String,
}

/// Fitted linear trend
#[derive(Debug, Clone)]
pub struct TrainedLinearTrend {
    name: String,
    slope: f64,
    intercept: f64,
    fitted: Vec<f64>,
}

impl LinearTrend {
    /// Create a new linear trend engine
    pub fn new() -> Self {
        Self {
            name: "Linear Trend".to_string(),
        }
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedLinearTrend;

    fn train(&self, values: &[f64]) -> Result<Self::Trained> {
        validate_observations(values, 2, &self.name)?;

        let n = values.len() as f64;
        let x_mean = (n - 1.0) / 2.0;
        let y_mean = values.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (i, &y) in values.iter().enumerate() {
            let x = i as f64;
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(MathError::CalculationError(format!(
                "{} fit overflowed (slope {}, intercept {})",
                self.name, slope, intercept
            )));
        }
        let fitted = (0..values.len())
            .map(|i| intercept + slope * i as f64)
            .collect();

        Ok(TrainedLinearTrend {
            name: self.name.clone(),
            slope,
            intercept,
            fitted,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedLinearTrend {
    /// Get the fitted slope per observation
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Get the fitted value at the first observation
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl TrainedModel for TrainedLinearTrend {
    fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    fn forecast(&self, horizon: usize) -> Vec<f64> {
        let last = self.fitted.len() - 1;
        (1..=horizon)
            .map(|step| self.intercept + self.slope * (last + step) as f64)
            .collect()
    }

    fn components(&self, horizon: usize) -> Vec<Component> {
        let mut trend = self.fitted.clone();
        trend.extend(self.forecast(horizon));
        vec![Component {
            name: "trend",
            values: trend,
        }]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Simple exponential smoothing
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    name: String,
    alpha: f64,
}

/// Fitted simple exponential smoothing
#[derive(Debug, Clone)]
pub struct TrainedExponentialSmoothing {
    name: String,
    /// Level after each observation
    levels: Vec<f64>,
    fitted: Vec<f64>,
}

impl ExponentialSmoothing {
    /// Create a new exponential smoothing engine with the given alpha (smoothing factor)
    pub fn new(alpha: f64) -> Result<Self> {
        validate_smoothing("Alpha", alpha)?;

        Ok(Self {
            name: format!("Exponential Smoothing (alpha={})", alpha),
            alpha,
        })
    }

    /// Get the alpha value
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl ForecastModel for ExponentialSmoothing {
    type Trained = TrainedExponentialSmoothing;

    fn train(&self, values: &[f64]) -> Result<Self::Trained> {
        validate_observations(values, 1, &self.name)?;

        let mut level = values[0];
        let mut levels = Vec::with_capacity(values.len());
        let mut fitted = Vec::with_capacity(values.len());

        // The first observation seeds the level, so it is its own prediction
        fitted.push(level);
        levels.push(level);

        for &value in &values[1..] {
            fitted.push(level);
            level = self.alpha * value + (1.0 - self.alpha) * level;
            levels.push(level);
        }

        Ok(TrainedExponentialSmoothing {
            name: self.name.clone(),
            levels,
            fitted,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedExponentialSmoothing {
    /// Get the level after the last observation
    pub fn level(&self) -> f64 {
        self.levels[self.levels.len() - 1]
    }
}

impl TrainedModel for TrainedExponentialSmoothing {
    fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    fn forecast(&self, horizon: usize) -> Vec<f64> {
        // The forecast of simple exponential smoothing is flat at the last level
        vec![self.level(); horizon]
    }

    fn components(&self, horizon: usize) -> Vec<Component> {
        let mut level = self.levels.clone();
        level.extend(self.forecast(horizon));
        vec![Component {
            name: "level",
            values: level,
        }]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Holt's linear method: exponential smoothing of both level and trend
#[derive(Debug, Clone)]
pub struct HoltLinear {
    name: String,
    alpha: f64,
    beta: f64,
}

/// Fitted Holt's linear method
#[derive(Debug, Clone)]
pub struct TrainedHoltLinear {
    name: String,
    levels: Vec<f64>,
    trends: Vec<f64>,
    fitted: Vec<f64>,
}

impl HoltLinear {
    /// Create a new Holt engine with level smoothing `alpha` and trend smoothing `beta`
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        validate_smoothing("Alpha", alpha)?;
        validate_smoothing("Beta", beta)?;

        Ok(Self {
            name: format!("Holt Linear (alpha={}, beta={})", alpha, beta),
            alpha,
            beta,
        })
    }

    /// Get the level smoothing factor
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Get the trend smoothing factor
    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl ForecastModel for HoltLinear {
    type Trained = TrainedHoltLinear;

    fn train(&self, values: &[f64]) -> Result<Self::Trained> {
        validate_observations(values, 2, &self.name)?;

        let mut level = values[0];
        let mut trend = values[1] - values[0];

        let mut levels = Vec::with_capacity(values.len());
        let mut trends = Vec::with_capacity(values.len());
        let mut fitted = Vec::with_capacity(values.len());

        fitted.push(level);
        levels.push(level);
        trends.push(trend);

        for &value in &values[1..] {
            fitted.push(level + trend);

            let new_level = self.alpha * value + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (new_level - level) + (1.0 - self.beta) * trend;
            level = new_level;

            levels.push(level);
            trends.push(trend);
        }

        Ok(TrainedHoltLinear {
            name: self.name.clone(),
            levels,
            trends,
            fitted,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedHoltLinear {
    /// Get the level after the last observation
    pub fn level(&self) -> f64 {
        self.levels[self.levels.len() - 1]
    }

    /// Get the trend after the last observation
    pub fn trend(&self) -> f64 {
        self.trends[self.trends.len() - 1]
    }
}

impl TrainedModel for TrainedHoltLinear {
    fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    fn forecast(&self, horizon: usize) -> Vec<f64> {
        let (level, trend) = (self.level(), self.trend());
        (1..=horizon)
            .map(|step| level + step as f64 * trend)
            .collect()
    }

    fn components(&self, horizon: usize) -> Vec<Component> {
        let mut path = self.levels.clone();
        path.extend(self.forecast(horizon));

        let mut slope = self.trends.clone();
        slope.extend(std::iter::repeat(self.trend()).take(horizon));

        vec![
            Component {
                name: "trend",
                values: path,
            },
            Component {
                name: "slope",
                values: slope,
            },
        ]
    }

    fn name(&self) -> &str {
        &self.name
    }
}
