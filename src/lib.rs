//! # Admission Forecast Workspace
//!
//! Umbrella crate re-exporting the workspace members:
//!
//! - [`admission_forecast`]: loading, evaluation windows, forecast runs and reports
//! - [`forecast_math`]: the forecasting engines
//!
//! ## Example
//!
//! ```
//! use admission_forecast_workspace::forecast_math::{ForecastModel, LinearTrend, TrainedModel};
//!
//! let trained = LinearTrend::new().train(&[1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(trained.forecast(1).len(), 1);
//! ```

pub use admission_forecast;
pub use forecast_math;
