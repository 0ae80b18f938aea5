//! SVG chart rendering with plotters

use crate::error::{EvalError, Result};
use crate::report::{Chart, Plotter};
use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Writes each chart to `<output_dir>/<chart name>.svg`
#[derive(Debug, Clone)]
pub struct SvgPlotter {
    output_dir: PathBuf,
    size: (u32, u32),
    written: Vec<PathBuf>,
}

impl SvgPlotter {
    /// Create a plotter writing into `output_dir`, creating it if needed
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)?;

        Ok(Self {
            output_dir,
            size: (1200, 800),
            written: Vec::new(),
        })
    }

    /// Set the image size in pixels
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Paths of the charts written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

fn render_error<E: Display>(err: E) -> EvalError {
    EvalError::Render(err.to_string())
}

fn format_day(day: &i32) -> String {
    NaiveDate::from_num_days_from_ce_opt(*day)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Day and value ranges covering every point, padded so neither is empty
fn bounds(chart: &Chart) -> Option<((i32, i32), (f64, f64))> {
    let points = chart.lines.iter().flat_map(|line| line.series.records());

    let mut days: Option<(i32, i32)> = None;
    let mut values: Option<(f64, f64)> = None;
    for record in points {
        let day = record.date.num_days_from_ce();
        days = Some(days.map_or((day, day), |(lo, hi)| (lo.min(day), hi.max(day))));
        values = Some(values.map_or((record.value, record.value), |(lo, hi)| {
            (lo.min(record.value), hi.max(record.value))
        }));
    }

    let (first_day, last_day) = days?;
    let (low, high) = values?;
    let margin = if high > low { (high - low) * 0.05 } else { 1.0 };

    Some(((first_day, last_day + 1), (low - margin, high + margin)))
}

impl Plotter for SvgPlotter {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        let Some(((first_day, last_day), (low, high))) = bounds(chart) else {
            return Err(EvalError::Render(format!(
                "Chart '{}' has no points to draw",
                chart.name
            )));
        };

        let path = self.output_dir.join(format!("{}.svg", chart.name));
        {
            let root = SVGBackend::new(&path, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;

            let mut ctx = ChartBuilder::on(&root)
                .caption(&chart.title, ("sans-serif", 28))
                .margin(16)
                .x_label_area_size(48)
                .y_label_area_size(64)
                .build_cartesian_2d(first_day..last_day, low..high)
                .map_err(render_error)?;

            ctx.configure_mesh()
                .x_desc(chart.x_label.as_str())
                .y_desc(chart.y_label.as_str())
                .x_labels(8)
                .x_label_formatter(&format_day)
                .draw()
                .map_err(render_error)?;

            for (index, line) in chart.lines.iter().enumerate() {
                if line.series.is_empty() {
                    continue;
                }
                let color = Palette99::pick(index).to_rgba();
                let points = line
                    .series
                    .records()
                    .iter()
                    .map(|r| (r.date.num_days_from_ce(), r.value));

                ctx.draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .map_err(render_error)?
                    .label(line.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }

            ctx.configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(render_error)?;

            root.present().map_err(render_error)?;
        }

        tracing::info!(path = %path.display(), "wrote chart");
        self.written.push(path);
        Ok(())
    }
}
