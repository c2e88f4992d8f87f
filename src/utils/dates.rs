// src/utils/dates.rs

//! Epoch-millisecond helpers: day windows and report date strings.

use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::ReportZone;

/// Date format used in every report row.
pub const REPORT_DATE_FORMAT: &str = "%m-%d-%Y";

/// Inclusive epoch-millisecond window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DateWindow {
    pub fn contains(&self, ms: i64) -> bool {
        self.start_ms <= ms && ms <= self.end_ms
    }
}

impl ReportZone {
    /// Widen `start_ms` to 00:00:00.000 of its day and `end_ms` to
    /// 23:59:59.999 of its day.
    pub fn day_window(&self, start_ms: i64, end_ms: i64) -> Result<DateWindow> {
        match self {
            ReportZone::Local => day_window_in(&Local, start_ms, end_ms),
            ReportZone::Fixed(offset) => day_window_in(offset, start_ms, end_ms),
        }
    }

    /// Epoch milliseconds of midnight starting `date`.
    pub fn midnight_millis(&self, date: NaiveDate) -> Result<i64> {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::validation(format!("invalid date {date}")))?;
        let start = match self {
            ReportZone::Local => Local
                .from_local_datetime(&midnight)
                .earliest()
                .map(|dt| dt.timestamp_millis()),
            ReportZone::Fixed(offset) => offset
                .from_local_datetime(&midnight)
                .earliest()
                .map(|dt| dt.timestamp_millis()),
        };
        start.ok_or_else(|| AppError::validation(format!("{date} has no local midnight")))
    }

    /// Render an epoch-millisecond value as `MM-DD-YYYY`; empty on anything
    /// that is not a non-zero timestamp.
    pub fn format_date(&self, value: &Value) -> String {
        let Some(ms) = epoch_millis(value) else {
            return String::new();
        };
        match self {
            ReportZone::Local => format_in(&Local, ms),
            ReportZone::Fixed(offset) => format_in(offset, ms),
        }
    }
}

/// Interpret a JSON value as epoch milliseconds.
///
/// Accepts integers, floats and numeric strings. Zero counts as absent.
pub fn epoch_millis(value: &Value) -> Option<i64> {
    let ms = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    (ms != 0).then_some(ms)
}

fn day_window_in<Tz: TimeZone>(tz: &Tz, start_ms: i64, end_ms: i64) -> Result<DateWindow> {
    let start_of_day = NaiveTime::from_hms_milli_opt(0, 0, 0, 0)
        .ok_or_else(|| AppError::validation("invalid start-of-day time"))?;
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| AppError::validation("invalid end-of-day time"))?;

    let start = tz
        .timestamp_millis_opt(start_ms)
        .single()
        .and_then(|dt| {
            tz.from_local_datetime(&dt.date_naive().and_time(start_of_day))
                .earliest()
        })
        .ok_or_else(|| AppError::validation(format!("startDate {start_ms} is out of range")))?;

    let end = tz
        .timestamp_millis_opt(end_ms)
        .single()
        .and_then(|dt| {
            tz.from_local_datetime(&dt.date_naive().and_time(end_of_day))
                .latest()
        })
        .ok_or_else(|| AppError::validation(format!("endDate {end_ms} is out of range")))?;

    Ok(DateWindow {
        start_ms: start.timestamp_millis(),
        end_ms: end.timestamp_millis(),
    })
}

fn format_in<Tz: TimeZone>(tz: &Tz, ms: i64) -> String
where
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format(REPORT_DATE_FORMAT).to_string())
        .unwrap_or_default()
}
