//! Renders [`DateArg`] values into the strings the gateway accepts.
//!
//! Both terminals treat `1900-01-01` as "no date set". Any date at or before it
//! is sent as an absent (null) field rather than a literal date.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::models::date_arg::DateArg;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How an endpoint wants its time arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMode {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DD HH:MM:SS` for date-times; plain dates stay `YYYY-MM-DD`.
    DateTime,
}

/// The "no value" sentinel date, `1900-01-01`.
pub fn unavailable_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Midnight of [`unavailable_date`].
pub fn unavailable_datetime() -> NaiveDateTime {
    unavailable_date().and_time(chrono::NaiveTime::MIN)
}

/// Normalizes a date-like argument. `None` in, or a sentinel date, gives `None` out.
pub fn normalize(value: Option<&DateArg>, mode: DateMode) -> Option<Value> {
    match value? {
        DateArg::Text(s) => Some(Value::String(s.clone())),
        DateArg::Date(d) => {
            (*d > unavailable_date()).then(|| Value::String(d.format(DATE_FORMAT).to_string()))
        }
        DateArg::DateTime(dt) => (*dt > unavailable_datetime()).then(|| {
            let format = match mode {
                DateMode::Date => DATE_FORMAT,
                DateMode::DateTime => DATETIME_FORMAT,
            };
            Value::String(dt.format(format).to_string())
        }),
        DateArg::Other(v) => Some(v.clone()),
    }
}

/// [`normalize`] in [`DateMode::Date`].
pub fn format_date(value: Option<&DateArg>) -> Option<Value> {
    normalize(value, DateMode::Date)
}

/// [`normalize`] in [`DateMode::DateTime`].
pub fn format_datetime(value: Option<&DateArg>) -> Option<Value> {
    normalize(value, DateMode::DateTime)
}
