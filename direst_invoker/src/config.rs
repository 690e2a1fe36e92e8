//! Client configuration, usually read from a TOML file:
//!
//! ```toml
//! base_url = "http://localhost:5000/iFind/"
//! max_batch_size = 8000
//! no_data_codes = [-4001]
//! timeout_secs = 30
//! ```

use std::{num::NonZeroUsize, path::Path, time::Duration};

use serde::Deserialize;
use shared_utils::{ConfigError, read_toml_config};

/// Provider error code meaning "the query legitimately returned nothing".
pub const DEFAULT_NO_DATA_CODE: i64 = -4001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerConfig {
    /// Gateway prefix for one provider, always ending in `/`.
    pub base_url: String,
    /// Largest number of codes sent in one request; `None` sends all codes at once.
    pub max_batch_size: Option<NonZeroUsize>,
    /// Error codes treated as "no data" on the first batch.
    pub no_data_codes: Vec<i64>,
    /// Per-request timeout. `None` leaves the HTTP client default.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    base_url: String,
    max_batch_size: Option<i64>,
    no_data_codes: Option<Vec<i64>>,
    timeout_secs: Option<u64>,
}

impl InvokerConfig {
    /// Config with defaults for everything but the base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url.into())?,
            max_batch_size: None,
            no_data_codes: vec![DEFAULT_NO_DATA_CODE],
            timeout: None,
        })
    }

    /// Caps the number of codes per request. Zero is rejected.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Result<Self, ConfigError> {
        let max = NonZeroUsize::new(max_batch_size).ok_or_else(|| ConfigError::Invalid {
            field: "max_batch_size".into(),
            message: "must be a positive integer, got 0".into(),
        })?;
        self.max_batch_size = Some(max);
        Ok(self)
    }

    pub fn with_no_data_codes(mut self, codes: Vec<i64>) -> Self {
        self.no_data_codes = codes;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(s)?;
        Self::from_raw(raw)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw: RawConfig = read_toml_config(path)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(raw.base_url)?,
            max_batch_size: raw.max_batch_size.map(parse_batch_size).transpose()?,
            no_data_codes: raw.no_data_codes.unwrap_or_else(|| vec![DEFAULT_NO_DATA_CODE]),
            timeout: raw.timeout_secs.map(Duration::from_secs),
        })
    }
}

fn normalize_base_url(url: String) -> Result<String, ConfigError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ConfigError::Invalid {
            field: "base_url".into(),
            message: "must not be empty".into(),
        });
    }
    if url.ends_with('/') {
        Ok(url.to_string())
    } else {
        Ok(format!("{url}/"))
    }
}

fn parse_batch_size(n: i64) -> Result<NonZeroUsize, ConfigError> {
    usize::try_from(n)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| ConfigError::Invalid {
            field: "max_batch_size".into(),
            message: format!("must be a positive integer, got {n}"),
        })
}
