mod common;

use admission_forecast::models::{Forecaster, ModelForecaster, ModelKind};
use admission_forecast::{EvalError, Series};
use approx::assert_relative_eq;
use common::{daily_series, date};
use forecast_math::{ExponentialSmoothing, HoltLinear, LinearTrend};

#[test]
fn test_model_forecaster_predicts_history_and_future() {
    let training = daily_series(date(2021, 1, 1), 10, |i| 2.0 * i as f64);
    let forecaster = ModelForecaster::new(LinearTrend::new());

    let fitted = forecaster.fit(&training).unwrap();
    let predictions = fitted.predict(5).unwrap();

    assert_eq!(predictions.len(), 15);
    assert_eq!(predictions[0].date, date(2021, 1, 1));
    assert_eq!(predictions[9].date, date(2021, 1, 10));
    assert_eq!(predictions[10].date, date(2021, 1, 11));
    assert_eq!(predictions[14].date, date(2021, 1, 15));
    assert_relative_eq!(predictions[14].yhat, 28.0, epsilon = 1e-9);
}

#[test]
fn test_model_forecaster_components_are_dated() {
    let training = daily_series(date(2021, 1, 1), 8, |i| 5.0 + i as f64);
    let forecaster = ModelForecaster::new(HoltLinear::new(0.3, 0.1).unwrap());

    let fitted = forecaster.fit(&training).unwrap();
    let components = fitted.components(4).unwrap();

    assert_eq!(components.len(), 2);
    for component in &components {
        assert_eq!(component.series.len(), 12);
        assert_eq!(component.series.first_date(), Some(date(2021, 1, 1)));
        assert_eq!(component.series.last_date(), Some(date(2021, 1, 12)));
    }
}

#[test]
fn test_model_forecaster_empty_training_is_fit_error() {
    let forecaster = ModelForecaster::new(ExponentialSmoothing::new(0.5).unwrap());
    let result = forecaster.fit(&Series::default());
    assert!(matches!(result, Err(EvalError::Fit(_))));
}

#[test]
fn test_model_forecaster_too_short_for_trend_is_fit_error() {
    let training = daily_series(date(2021, 1, 1), 1, |_| 4.0);
    let forecaster = ModelForecaster::new(HoltLinear::new(0.3, 0.1).unwrap());
    assert!(matches!(forecaster.fit(&training), Err(EvalError::Fit(_))));
}

#[test]
fn test_model_kind_build() {
    for kind in [ModelKind::Holt, ModelKind::Ses, ModelKind::Linear] {
        let forecaster = kind.build(0.3, 0.05).unwrap();
        assert!(!forecaster.name().is_empty());
    }

    assert!(matches!(
        ModelKind::Ses.build(1.5, 0.05),
        Err(EvalError::InvalidParameter(_))
    ));
    assert!(matches!(
        ModelKind::Holt.build(0.3, 0.0),
        Err(EvalError::InvalidParameter(_))
    ));
    // Linear has no smoothing parameters
    assert!(ModelKind::Linear.build(1.5, 0.0).is_ok());
}
