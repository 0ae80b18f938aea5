//! Reporting: period summaries, accuracy and comparison charts

use crate::data::Series;
use crate::error::Result;
use crate::metrics::ForecastAccuracy;
use crate::runner::ForecastResult;
use crate::window::EvaluationWindow;
use std::io::Write;
use tracing::{debug, info};

/// Name of the forecast vs outcome chart
pub const COMPARISON_CHART: &str = "forecast_comparison";
/// Prefix of the per-component decomposition charts
pub const COMPONENT_CHART_PREFIX: &str = "forecast_components_";

/// A labelled line of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub series: Series,
}

/// Overlay line chart handed to a [`Plotter`]
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// File stem or identifier of the chart
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub lines: Vec<LineSeries>,
}

/// Rendering backend for charts
pub trait Plotter {
    /// Render one chart
    fn render(&mut self, chart: &Chart) -> Result<()>;
}

impl<P: Plotter + ?Sized> Plotter for &mut P {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        (**self).render(chart)
    }
}

/// One line summary of the dates a series covers
pub fn period_line(label: &str, series: &Series) -> String {
    match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => format!("period of {}: {} to {}", label, first, last),
        _ => format!("period of {}: empty", label),
    }
}

/// Writes summaries to `out` and hands charts to `plotter`
#[derive(Debug)]
pub struct Reporter<P, W> {
    plotter: P,
    out: W,
}

impl<P: Plotter, W: Write> Reporter<P, W> {
    /// Create a reporter
    pub fn new(plotter: P, out: W) -> Self {
        Self { plotter, out }
    }

    /// Report an evaluation run
    ///
    /// Renders the comparison chart and one decomposition chart per model
    /// component, then prints the period of the forecast, the training series
    /// and the full series followed by the accuracy when available. Nothing is
    /// written to the output if a chart fails to render.
    pub fn report(
        &mut self,
        window: &EvaluationWindow,
        result: &ForecastResult,
        accuracy: Option<&ForecastAccuracy>,
    ) -> Result<()> {
        let mut charts = vec![comparison_chart(window, result)?];
        charts.extend(component_charts(result)?);

        for chart in &charts {
            self.plotter.render(chart)?;
            debug!(chart = %chart.name, "rendered chart");
        }

        writeln!(self.out, "{}", period_line("forecast", &result.as_series()))?;
        writeln!(self.out, "{}", period_line("training", window.training_series()))?;
        writeln!(self.out, "{}", period_line("full", window.full_series()))?;

        if let Some(accuracy) = accuracy {
            write!(self.out, "{}", accuracy)?;
        }
        self.out.flush()?;

        info!(charts = charts.len(), "report complete");
        Ok(())
    }

    /// Consume the reporter, returning the plotter and the output
    pub fn into_parts(self) -> (P, W) {
        (self.plotter, self.out)
    }
}

/// Forecast against training values and recorded outcomes around the prediction start
pub fn comparison_chart(window: &EvaluationWindow, result: &ForecastResult) -> Result<Chart> {
    let (band_start, band_end) = window.display_band()?;

    Ok(Chart {
        name: COMPARISON_CHART.to_string(),
        title: "New ICU admissions".to_string(),
        x_label: "Date".to_string(),
        y_label: "New admissions".to_string(),
        lines: vec![
            LineSeries {
                label: "forecast".to_string(),
                series: result.as_series(),
            },
            LineSeries {
                label: "actual".to_string(),
                series: window.full_series().between(band_start, band_end),
            },
            LineSeries {
                label: "training".to_string(),
                series: window.training_series().between(band_start, band_end),
            },
        ],
    })
}

/// One chart per fitted model component over the forecast dates
pub fn component_charts(result: &ForecastResult) -> Result<Vec<Chart>> {
    Ok(result
        .components()?
        .into_iter()
        .map(|component| Chart {
            name: format!("{}{}", COMPONENT_CHART_PREFIX, component.name),
            title: format!("{}: {}", result.model().name(), component.name),
            x_label: "Date".to_string(),
            y_label: component.name.clone(),
            lines: vec![LineSeries {
                label: component.name,
                series: component.series,
            }],
        })
        .collect())
}
