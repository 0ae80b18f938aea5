//! # Admission Forecast
//!
//! Evaluate forecasts of daily ICU admission counts against what was
//! actually recorded.
//!
//! ## Features
//!
//! - Loading of `(date, count)` series from CSV
//! - Evaluation windows that keep the period being forecast out of the training data
//! - Pluggable forecasting engines behind the [`Forecaster`] trait
//! - Accuracy metrics (MAE, RMSE, MAPE, SMAPE) against recorded outcomes
//! - Period summaries and SVG comparison charts
//!
//! ## Quick Start
//!
//! ```no_run
//! use admission_forecast::data::{ColumnSpec, DataLoader};
//! use admission_forecast::models::ModelKind;
//! use admission_forecast::{EvaluationWindow, ForecastRunner};
//! use chrono::{Duration, NaiveDate};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load data
//!     let series = DataLoader::from_csv("admissions.csv", &ColumnSpec::default())?;
//!
//!     // Hold out 15 days from 2021-01-15
//!     let start = NaiveDate::from_ymd_opt(2021, 1, 15).unwrap();
//!     let window = EvaluationWindow::build(series, start, Duration::days(15))?;
//!
//!     // Fit on the days before the start and forecast the window
//!     let forecaster = ModelKind::Holt.build(0.3, 0.05)?;
//!     let result = ForecastRunner::new(forecaster.as_ref()).run(&window)?;
//!
//!     for prediction in result.predictions() {
//!         println!("{}: {:.1}", prediction.date, prediction.yhat);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod runner;
pub mod utils;
pub mod window;

// Re-export commonly used types
pub use crate::data::{DataLoader, Record, Series};
pub use crate::error::{EvalError, Result};
pub use crate::models::{FittedForecast, Forecaster, Prediction};
pub use crate::report::{Plotter, Reporter};
pub use crate::runner::{ForecastResult, ForecastRunner};
pub use crate::window::EvaluationWindow;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
