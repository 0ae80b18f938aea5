#![allow(dead_code)]

use admission_forecast::error::{EvalError, Result};
use admission_forecast::models::{ComponentSeries, FittedForecast, Forecaster, Prediction};
use admission_forecast::report::{Chart, Plotter};
use admission_forecast::utils::future_dates;
use admission_forecast::{Record, Series};
use chrono::{Duration, NaiveDate};
use std::cell::RefCell;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `days` consecutive daily records from `start`, valued by `f(day index)`
pub fn daily_series(start: NaiveDate, days: i64, f: impl Fn(i64) -> f64) -> Series {
    Series::new(
        (0..days)
            .map(|i| Record::new(start + Duration::days(i), f(i)))
            .collect(),
    )
}

/// 2021-01-01 to 2021-02-01 inclusive
pub fn january_series() -> Series {
    daily_series(date(2021, 1, 1), 32, |i| 10.0 + (i % 7) as f64)
}

/// Forecaster predicting a constant, remembering what it was fitted on
#[derive(Debug)]
pub struct StubForecaster {
    pub value: f64,
    pub seen: RefCell<Option<Series>>,
}

impl StubForecaster {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            seen: RefCell::new(None),
        }
    }
}

#[derive(Debug)]
pub struct StubFit {
    dates: Vec<NaiveDate>,
    value: f64,
}

impl StubFit {
    fn frame(&self, periods: usize) -> Result<Vec<NaiveDate>> {
        let mut frame = self.dates.clone();
        frame.extend(future_dates(*self.dates.last().unwrap(), periods)?);
        Ok(frame)
    }
}

impl FittedForecast for StubFit {
    fn predict(&self, periods: usize) -> Result<Vec<Prediction>> {
        Ok(self
            .frame(periods)?
            .into_iter()
            .map(|date| Prediction {
                date,
                yhat: self.value,
            })
            .collect())
    }

    fn components(&self, periods: usize) -> Result<Vec<ComponentSeries>> {
        let frame = self.frame(periods)?;
        Ok(vec![ComponentSeries {
            name: "constant".to_string(),
            series: Series::new(
                frame
                    .into_iter()
                    .map(|date| Record::new(date, self.value))
                    .collect(),
            ),
        }])
    }

    fn name(&self) -> &str {
        "stub"
    }
}

impl Forecaster for StubForecaster {
    fn fit(&self, training: &Series) -> Result<Box<dyn FittedForecast>> {
        *self.seen.borrow_mut() = Some(training.clone());
        if training.is_empty() {
            return Err(EvalError::Fit("no observations".to_string()));
        }
        Ok(Box::new(StubFit {
            dates: training.dates(),
            value: self.value,
        }))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Forecaster that never fits
#[derive(Debug)]
pub struct FailingForecaster;

impl Forecaster for FailingForecaster {
    fn fit(&self, _training: &Series) -> Result<Box<dyn FittedForecast>> {
        Err(EvalError::Fit("degenerate training series".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Plotter keeping every chart it is asked to render
#[derive(Debug, Default)]
pub struct RecordingPlotter {
    pub charts: Vec<Chart>,
}

impl Plotter for RecordingPlotter {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}

/// Plotter whose every render fails
#[derive(Debug, Default)]
pub struct FailingPlotter;

impl Plotter for FailingPlotter {
    fn render(&mut self, _chart: &Chart) -> Result<()> {
        Err(EvalError::Render("disk full".to_string()))
    }
}

/// January series with no records from 2021-01-11 to 2021-01-14
pub fn gapped_january_series() -> Series {
    Series::new(
        january_series()
            .records()
            .iter()
            .filter(|r| r.date < date(2021, 1, 11) || r.date > date(2021, 1, 14))
            .copied()
            .collect(),
    )
}
