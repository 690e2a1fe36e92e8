use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use shared_utils::{ConfigError, get_env_var};

use crate::{
    config::InvokerConfig,
    models::{codes::Codes, date_arg::DateArg, table::Table},
    normalize::{DATE_FORMAT, DATETIME_FORMAT},
};

/// Environment variable read when neither `--config` nor `--url` is given.
pub const URL_ENV_VAR: &str = "DIREST_URL";

/// Splits a comma-separated code list, dropping blanks.
pub fn parse_codes(codes: &str) -> Codes {
    Codes::Many(
        codes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Reads `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD` into a typed date so the sentinel
/// rule applies; anything else is forwarded as text.
pub fn parse_date_arg(s: &str) -> DateArg {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT) {
        return DateArg::DateTime(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return DateArg::Date(d);
    }
    DateArg::Text(s.to_string())
}

/// Resolves the client config from `--config`, `--url` or `$DIREST_URL`, in that order.
pub fn resolve_config(
    config: Option<&str>,
    url: Option<&str>,
    max_batch_size: Option<usize>,
) -> Result<InvokerConfig, ConfigError> {
    let config = match (config, url) {
        (Some(path), _) => InvokerConfig::load(path)?,
        (None, Some(url)) => InvokerConfig::new(url)?,
        (None, None) => {
            let url = get_env_var(URL_ENV_VAR).map_err(|e| ConfigError::Invalid {
                field: "base_url".into(),
                message: format!("pass --config or --url ({e})"),
            })?;
            InvokerConfig::new(url)?
        }
    };

    match max_batch_size {
        Some(n) => config.with_max_batch_size(n),
        None => Ok(config),
    }
}

/// JSON array of row records; `[]` when there was no data.
pub fn table_to_json(table: Option<&Table>) -> Value {
    Value::Array(table.map(Table::to_records).unwrap_or_default())
}
