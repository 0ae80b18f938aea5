mod common;

use admission_forecast::config::EvaluationConfig;
use admission_forecast::data::ColumnSpec;
use admission_forecast::models::ModelKind;
use admission_forecast::pipeline::{evaluate, EvaluationSummary};
use admission_forecast::plot::SvgPlotter;
use admission_forecast::report::{Chart, LineSeries, Plotter};
use admission_forecast::{EvalError, Reporter};
use chrono::{Duration, NaiveDate};
use common::{date, daily_series, FailingForecaster, FailingPlotter, RecordingPlotter};
use std::io::Write;
use std::path::Path;
use tempfile::{tempdir, NamedTempFile};

// Helper function to create a month of daily admissions
fn create_sample_data() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    writeln!(file, "ds,y").unwrap();
    let start = date(2021, 1, 1);
    for i in 0..32 {
        let day = start + Duration::days(i);
        let weekly = [3, 4, 5, 5, 4, 2, 1][(i % 7) as usize];
        writeln!(file, "{},{}", day, 20 + i / 2 + weekly).unwrap();
    }

    file
}

fn config(input: &Path, output_dir: &Path, start: NaiveDate, days: i64) -> EvaluationConfig {
    EvaluationConfig {
        input: input.to_path_buf(),
        columns: ColumnSpec::default(),
        prediction_start: start,
        period: Duration::days(days),
        model: ModelKind::Holt,
        alpha: 0.3,
        beta: 0.05,
        output_dir: output_dir.to_path_buf(),
        export: None,
    }
}

#[test]
fn test_full_evaluation_workflow() {
    let file = create_sample_data();
    let dir = tempdir().unwrap();
    let mut config = config(file.path(), dir.path(), date(2021, 1, 15), 10);
    config.export = Some(dir.path().join("comparison.csv"));

    let forecaster = config.model.build(config.alpha, config.beta).unwrap();
    let plotter = SvgPlotter::new(dir.path()).unwrap();
    let mut reporter = Reporter::new(plotter, Vec::new());

    let summary = evaluate(&config, forecaster.as_ref(), &mut reporter).unwrap();

    assert_eq!(summary.prediction_end, date(2021, 1, 25));
    assert_eq!(summary.training.len, 14);
    assert_eq!(summary.full.len, 32);
    assert_eq!(summary.forecast.first, Some(date(2021, 1, 15)));
    assert_eq!(summary.forecast.last, Some(date(2021, 1, 24)));
    assert_eq!(summary.accuracy.as_ref().unwrap().points, 10);

    let (plotter, out) = reporter.into_parts();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("period of training: 2021-01-01 to 2021-01-14"));

    assert_eq!(plotter.written().len(), 3);
    assert!(dir.path().join("forecast_comparison.svg").exists());
    assert!(dir.path().join("forecast_components_trend.svg").exists());
    assert!(dir.path().join("forecast_components_slope.svg").exists());

    let exported = std::fs::read_to_string(dir.path().join("comparison.csv")).unwrap();
    let mut lines = exported.lines();
    assert_eq!(lines.next(), Some("date,predicted,actual"));
    assert_eq!(lines.count(), 10);

    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"prediction_start\":\"2021-01-15\""));
}

#[test]
fn test_infeasible_window_fails_before_reporting() {
    let file = create_sample_data();
    let dir = tempdir().unwrap();
    let config = config(file.path(), dir.path(), date(2021, 1, 25), 10);

    let mut reporter = Reporter::new(RecordingPlotter::default(), Vec::new());
    let result = evaluate(&config, &FailingForecaster, &mut reporter);

    assert!(matches!(result, Err(EvalError::WindowInfeasible { .. })));
    let (plotter, out) = reporter.into_parts();
    assert!(plotter.charts.is_empty());
    assert!(out.is_empty());
}

#[test]
fn test_fit_error_fails_before_reporting() {
    let file = create_sample_data();
    let dir = tempdir().unwrap();
    let config = config(file.path(), dir.path(), date(2021, 1, 15), 10);

    let mut reporter = Reporter::new(RecordingPlotter::default(), Vec::new());
    let result = evaluate(&config, &FailingForecaster, &mut reporter);

    assert!(matches!(result, Err(EvalError::Fit(_))));
    let (plotter, out) = reporter.into_parts();
    assert!(plotter.charts.is_empty());
    assert!(out.is_empty());
}

#[test]
fn test_parse_error_for_missing_columns() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,count").unwrap();
    writeln!(file, "2021-01-01,4").unwrap();
    let dir = tempdir().unwrap();
    let config = config(file.path(), dir.path(), date(2021, 1, 1), 1);

    let mut reporter = Reporter::new(RecordingPlotter::default(), Vec::new());
    let result: Result<EvaluationSummary, EvalError> =
        evaluate(&config, &FailingForecaster, &mut reporter);

    assert!(matches!(result, Err(EvalError::Parse(_))));
}

#[test]
fn test_render_failure_leaves_no_output_or_export() {
    let file = create_sample_data();
    let dir = tempdir().unwrap();
    let export = dir.path().join("comparison.csv");
    let mut config = config(file.path(), dir.path(), date(2021, 1, 15), 10);
    config.export = Some(export.clone());

    let forecaster = config.model.build(config.alpha, config.beta).unwrap();
    let mut reporter = Reporter::new(FailingPlotter, Vec::new());
    let result = evaluate(&config, forecaster.as_ref(), &mut reporter);

    assert!(matches!(result, Err(EvalError::Render(_))));
    let (_, out) = reporter.into_parts();
    assert!(out.is_empty());
    assert!(!export.exists());
}

#[test]
fn test_svg_plotter_custom_size() {
    let dir = tempdir().unwrap();
    let mut plotter = SvgPlotter::new(dir.path()).unwrap().with_size(640, 480);
    let chart = Chart {
        name: "sized".to_string(),
        title: "Sized".to_string(),
        x_label: "Date".to_string(),
        y_label: "Value".to_string(),
        lines: vec![LineSeries {
            label: "line".to_string(),
            series: daily_series(date(2021, 1, 1), 5, |i| i as f64),
        }],
    };

    plotter.render(&chart).unwrap();

    assert_eq!(plotter.written(), &[dir.path().join("sized.svg")]);
    let svg = std::fs::read_to_string(dir.path().join("sized.svg")).unwrap();
    assert!(svg.contains("width=\"640\""));
    assert!(svg.contains("height=\"480\""));
}
