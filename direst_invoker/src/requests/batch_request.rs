//! Splits oversized code lists into sequential requests.
//!
//! The gateway caps how many codes one request may carry. [`execute_batched`]
//! issues one request per slice of at most `max_batch_size` codes, strictly in
//! order, and stacks the partial tables. It never retries; a failing batch is
//! either absorbed or returned as-is:
//!
//! | accumulated rows | error                  | outcome                          |
//! |------------------|------------------------|----------------------------------|
//! | none             | a benign no-data code  | stop, `Ok(None)`                 |
//! | none             | anything else          | `Err` unchanged                  |
//! | some             | anything               | log, stop, return what we have   |

use std::{future::Future, num::NonZeroUsize};

use tracing::{debug, info, warn};

use crate::{
    config::{DEFAULT_NO_DATA_CODE, InvokerConfig},
    errors::InvokerError,
    models::{codes::Codes, table::Table},
};

/// Which provider errors count as "no data" rather than a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPolicy {
    pub no_data_codes: Vec<i64>,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            no_data_codes: vec![DEFAULT_NO_DATA_CODE],
        }
    }
}

impl From<&InvokerConfig> for BatchPolicy {
    fn from(config: &InvokerConfig) -> Self {
        Self {
            no_data_codes: config.no_data_codes.clone(),
        }
    }
}

/// Splits `keys` into order-preserving slices of at most `max_batch_size`.
///
/// `None` keeps everything in one slice. An empty input gives no slices.
pub fn partition(keys: &[String], max_batch_size: Option<NonZeroUsize>) -> Vec<&[String]> {
    if keys.is_empty() {
        return Vec::new();
    }
    match max_batch_size {
        Some(max) => keys.chunks(max.get()).collect(),
        None => vec![keys],
    }
}

/// Runs `single_batch_fn` once per batch of `keys` and concatenates the results.
///
/// Each call receives the batch as a comma-joined string. A call returning
/// `Ok(None)` or an empty table is skipped. Returns `Ok(None)` when nothing was
/// collected, including when `keys` is empty (no request is made).
pub async fn execute_batched<F, Fut>(
    keys: &Codes,
    max_batch_size: Option<NonZeroUsize>,
    policy: &BatchPolicy,
    mut single_batch_fn: F,
) -> Result<Option<Table>, InvokerError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Option<Table>, InvokerError>>,
{
    let batches = partition(keys.keys(), max_batch_size);
    let total = batches.len();
    let mut partials: Vec<Table> = Vec::new();

    for (i, batch) in batches.into_iter().enumerate() {
        debug!(batch = i + 1, total, codes = batch.len(), "requesting batch");

        match single_batch_fn(batch.join(",")).await {
            Ok(Some(table)) if !table.is_empty() => partials.push(table),
            Ok(_) => debug!(batch = i + 1, total, "batch returned no rows"),
            Err(e) if partials.is_empty() && e.is_no_data(&policy.no_data_codes) => {
                info!(batch = i + 1, total, error = %e, "no data for query");
                return Ok(None);
            }
            Err(e) if partials.is_empty() => return Err(e),
            Err(e) => {
                warn!(
                    batch = i + 1,
                    total,
                    collected = partials.len(),
                    error = %e,
                    "batch failed, returning rows collected so far"
                );
                break;
            }
        }
    }

    if partials.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Table::concat(partials)))
    }
}
