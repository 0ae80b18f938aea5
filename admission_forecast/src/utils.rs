//! Utility functions for the admission_forecast crate

use crate::error::{EvalError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a calendar date, discarding any time of day
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(datetime.date());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.date_naive());
    }

    Err(EvalError::Parse(format!("Cannot parse '{}' as a date", text)))
}

/// Parse a span of days such as `15 days`, `15d`, `2 weeks` or a bare `15`
pub fn parse_period(text: &str) -> Result<Duration> {
    let text = text.trim().to_lowercase();
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '-' || c == '+'))
        .unwrap_or(text.len());
    let (amount, unit) = text.split_at(split);

    let amount: i64 = amount.parse().map_err(|_| {
        EvalError::InvalidParameter(format!("Cannot parse '{}' as a period", text))
    })?;

    let period = match unit.trim() {
        "" | "d" | "day" | "days" => Duration::try_days(amount),
        "w" | "week" | "weeks" => Duration::try_weeks(amount),
        other => {
            return Err(EvalError::InvalidParameter(format!(
                "Unsupported period unit: {}",
                other
            )))
        }
    };

    period.ok_or_else(|| EvalError::InvalidParameter(format!("Period out of range: {}", text)))
}

/// Consecutive daily dates following `last`
pub fn future_dates(last: NaiveDate, periods: usize) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(periods);
    let mut current = last;

    for _ in 0..periods {
        current = current.succ_opt().ok_or_else(|| {
            EvalError::InvalidParameter(format!("Date overflow after {}", current))
        })?;
        dates.push(current);
    }

    Ok(dates)
}

/// Add a span to a date, failing instead of overflowing
pub fn shift_date(date: NaiveDate, span: Duration) -> Result<NaiveDate> {
    date.checked_add_signed(span).ok_or_else(|| {
        EvalError::InvalidParameter(format!(
            "Date overflow shifting {} by {} days",
            date,
            span.num_days()
        ))
    })
}
