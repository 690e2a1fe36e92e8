//! One generic call path shared by every gateway endpoint.
//!
//! Endpoints differ only in their path, the request key that carries codes,
//! how they want dates rendered and whether the response needs transposing.
//! [`EndpointSpec`] records exactly that, and [`RestInvoker::call_endpoint`]
//! does the rest.

use std::num::NonZeroUsize;

use serde_json::{Map, Value};

use crate::{
    errors::InvokerError,
    models::{codes::Codes, date_arg::DateArg, table::Table},
    normalize::{DateMode, normalize},
    requests::{BatchPolicy, RestInvoker, execute_batched},
};

/// How a response body maps onto rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    /// Response keys are columns.
    Columns,
    /// Response keys are rows (typically codes); the table is transposed after reading.
    Transposed,
}

impl Orient {
    pub fn apply(self, table: Table) -> Table {
        match self {
            Orient::Columns => table,
            Orient::Transposed => table.transpose(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    /// Path under the provider prefix, e.g. `wsd/`.
    pub path: &'static str,
    /// Request key holding the comma-joined codes, for endpoints that take codes.
    pub codes_field: Option<&'static str>,
    pub date_mode: DateMode,
    pub orient: Orient,
    /// Gateway-side limit on codes per request, applied even without a configured cap.
    pub max_codes: Option<usize>,
}

impl EndpointSpec {
    pub const fn new(path: &'static str, orient: Orient) -> Self {
        Self {
            path,
            codes_field: None,
            date_mode: DateMode::Date,
            orient,
            max_codes: None,
        }
    }

    pub const fn codes(mut self, field: &'static str) -> Self {
        self.codes_field = Some(field);
        self
    }

    pub const fn datetime(mut self) -> Self {
        self.date_mode = DateMode::DateTime;
        self
    }

    pub const fn max_codes(mut self, n: usize) -> Self {
        self.max_codes = Some(n);
        self
    }
}

/// A flat JSON request body built field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    fields: Map<String, Value>,
}

impl RequestBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), Value::String(value.into()));
        self
    }

    pub fn value(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Adds a normalized date; absent and sentinel dates are sent as `null`.
    pub fn date(mut self, key: &str, value: Option<&DateArg>, mode: DateMode) -> Self {
        let rendered = normalize(value, mode).unwrap_or(Value::Null);
        self.fields.insert(key.to_string(), rendered);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl RestInvoker {
    /// Calls a table endpoint, splitting `codes` across requests when the
    /// endpoint takes codes and a cap applies.
    ///
    /// `Ok(None)` means the gateway had nothing for this query.
    pub async fn call_endpoint(
        &self,
        spec: &EndpointSpec,
        codes: Option<&Codes>,
        body: RequestBody,
    ) -> Result<Option<Table>, InvokerError> {
        let (Some(field), Some(codes)) = (spec.codes_field, codes) else {
            let table = self.fetch_table(spec, &body).await?;
            return Ok(table.filter(|t| !t.is_empty()));
        };

        let policy = BatchPolicy::from(self.config());
        let max_batch_size = self.effective_cap(spec);
        execute_batched(codes, max_batch_size, &policy, |batch| {
            let body = body.clone().text(field, batch);
            async move { self.fetch_table(spec, &body).await }
        })
        .await
    }

    async fn fetch_table(
        &self,
        spec: &EndpointSpec,
        body: &RequestBody,
    ) -> Result<Option<Table>, InvokerError> {
        let Some(value) = self.public_post(spec.path, body).await? else {
            return Ok(None);
        };
        let table = Table::from_json(value)?;
        Ok(Some(spec.orient.apply(table)))
    }

    fn effective_cap(&self, spec: &EndpointSpec) -> Option<NonZeroUsize> {
        let endpoint = spec.max_codes.and_then(NonZeroUsize::new);
        match (self.config().max_batch_size, endpoint) {
            (Some(configured), Some(limit)) => Some(configured.min(limit)),
            (configured, limit) => configured.or(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn body_renders_dates_and_nulls() {
        let begin = DateArg::Date(NaiveDate::from_ymd_opt(2018, 6, 15).unwrap());
        let unset = DateArg::Date(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());

        let body = RequestBody::new()
            .text("exchange", "SSE")
            .date("begintime", Some(&begin), DateMode::Date)
            .date("endtime", Some(&unset), DateMode::Date)
            .value("offset", 1);

        assert_eq!(
            body.to_json(),
            json!({"exchange": "SSE", "begintime": "2018-06-15", "endtime": null, "offset": 1})
        );
    }

    #[test]
    fn spec_builder() {
        const SPEC: EndpointSpec = EndpointSpec::new("THS_BasicData/", Orient::Columns)
            .codes("thsCode")
            .max_codes(8000);
        assert_eq!(SPEC.codes_field, Some("thsCode"));
        assert_eq!(SPEC.max_codes, Some(8000));
        assert_eq!(SPEC.date_mode, DateMode::Date);
        assert_eq!(
            EndpointSpec::new("wst/", Orient::Transposed).datetime().date_mode,
            DateMode::DateTime
        );
    }
}
