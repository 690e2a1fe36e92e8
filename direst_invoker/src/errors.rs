//! Error types for the gateway client.

use serde_json::Value;
use shared_utils::ConfigError;
use snafu::{Backtrace, Snafu};

/// Errors raised while talking to the gateway.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum InvokerError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Request {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The gateway answered with a non-200 status.
    ///
    /// `errcode` and `message` are lifted out of the response body when present,
    /// and default to `0` and `""` otherwise.
    #[snafu(display("APIError:status=POST / {status} errcode={errcode} {message}"))]
    Api {
        status: u16,
        errcode: i64,
        message: String,
        body: Option<Value>,
    },

    /// The response decoded as JSON but not as anything tabular.
    #[snafu(display("Unexpected response shape: {message}"))]
    Shape {
        message: String,
        backtrace: Backtrace,
    },

    /// Invalid client configuration.
    #[snafu(display("Configuration error: {source}"))]
    Config { source: ConfigError },
}

impl InvokerError {
    /// Builds an [`InvokerError::Api`] from a status and the (possibly absent) decoded body.
    pub fn from_response(status: u16, body: Option<Value>) -> Self {
        let (errcode, message) = error_fields(body.as_ref());
        InvokerError::Api {
            status,
            errcode,
            message,
            body,
        }
    }

    /// HTTP status carried by an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            InvokerError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Provider error code carried by an API error.
    pub fn errcode(&self) -> Option<i64> {
        match self {
            InvokerError::Api { errcode, .. } => Some(*errcode),
            _ => None,
        }
    }

    /// Provider message carried by an API error.
    pub fn message(&self) -> Option<&str> {
        match self {
            InvokerError::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// True when this is an API error whose code is one of `no_data_codes`.
    pub fn is_no_data(&self, no_data_codes: &[i64]) -> bool {
        self.errcode()
            .is_some_and(|code| no_data_codes.contains(&code))
    }
}

/// Reads `errcode` (or the older `error_code`) and `message` from an error body.
fn error_fields(body: Option<&Value>) -> (i64, String) {
    let Some(Value::Object(map)) = body else {
        return (0, String::new());
    };

    let errcode = map
        .get("errcode")
        .or_else(|| map.get("error_code"))
        .and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .unwrap_or(0);

    let message = match map.get("message") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    (errcode, message)
}
