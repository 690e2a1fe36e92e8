//! Date-like request arguments.
//!
//! The gateway takes dates as strings, but callers usually hold `chrono` values.
//! [`DateArg`] carries either form until [`crate::normalize`] renders it for a
//! specific endpoint.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// A date, a date-time, a caller-formatted string, or any other JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum DateArg {
    /// Sent verbatim.
    Text(String),
    /// A calendar date.
    Date(NaiveDate),
    /// A wall-clock date-time.
    DateTime(NaiveDateTime),
    /// Anything else; sent verbatim.
    Other(Value),
}

impl From<&str> for DateArg {
    fn from(value: &str) -> Self {
        DateArg::Text(value.to_string())
    }
}

impl From<String> for DateArg {
    fn from(value: String) -> Self {
        DateArg::Text(value)
    }
}

impl From<NaiveDate> for DateArg {
    fn from(value: NaiveDate) -> Self {
        DateArg::Date(value)
    }
}

impl From<NaiveDateTime> for DateArg {
    fn from(value: NaiveDateTime) -> Self {
        DateArg::DateTime(value)
    }
}

impl From<DateTime<Utc>> for DateArg {
    fn from(value: DateTime<Utc>) -> Self {
        DateArg::DateTime(value.naive_utc())
    }
}

impl From<Value> for DateArg {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => DateArg::Text(s),
            other => DateArg::Other(other),
        }
    }
}
