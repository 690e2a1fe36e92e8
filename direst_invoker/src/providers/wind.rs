//! Provider A: the Wind terminal behind the `/wind/` gateway prefix.
//!
//! Table endpoints answer `{code: {field: value}}`-style objects, so every
//! table is transposed to one row per code.

use std::{path::Path, sync::Arc};

use serde_json::Value;

use crate::{
    config::InvokerConfig,
    errors::InvokerError,
    models::{codes::Codes, date_arg::DateArg, table::Table},
    normalize::DateMode,
    providers::endpoint::{EndpointSpec, Orient, RequestBody},
    requests::RestInvoker,
    transport::Transport,
};

const WSET: EndpointSpec = EndpointSpec::new("wset/", Orient::Transposed);
const WSS: EndpointSpec = EndpointSpec::new("wss/", Orient::Transposed).codes("codes");
const WSD: EndpointSpec = EndpointSpec::new("wsd/", Orient::Transposed).codes("codes");
const WSI: EndpointSpec = EndpointSpec::new("wsi/", Orient::Transposed)
    .codes("codes")
    .datetime();
const WST: EndpointSpec = EndpointSpec::new("wst/", Orient::Transposed)
    .codes("codes")
    .datetime();
const WSQ: EndpointSpec = EndpointSpec::new("wsq/", Orient::Transposed).codes("codes");
const EDB: EndpointSpec = EndpointSpec::new("edb/", Orient::Transposed).codes("codes");
const TDAYSOFFSET: &str = "tdaysoffset/";
const TDAYS: &str = "tdays/";

#[derive(Debug, Clone)]
pub struct WindInvoker {
    invoker: RestInvoker,
}

impl WindInvoker {
    pub fn new(config: InvokerConfig) -> Result<Self, InvokerError> {
        Ok(Self {
            invoker: RestInvoker::new(config)?,
        })
    }

    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, InvokerError> {
        Ok(Self {
            invoker: RestInvoker::from_config_file(path)?,
        })
    }

    pub fn with_transport(config: InvokerConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            invoker: RestInvoker::with_transport(config, transport),
        }
    }

    pub fn invoker(&self) -> &RestInvoker {
        &self.invoker
    }

    /// Sector, index and other constituent sets.
    pub async fn wset(&self, tablename: &str, options: &str) -> Result<Option<Table>, InvokerError> {
        let body = RequestBody::new()
            .text("tablename", tablename)
            .text("options", options);
        self.invoker.call_endpoint(&WSET, None, body).await
    }

    /// Cross-sectional snapshot of `fields` for each code.
    pub async fn wss(
        &self,
        codes: impl Into<Codes>,
        fields: &str,
        options: &str,
    ) -> Result<Option<Table>, InvokerError> {
        let codes = codes.into();
        let body = RequestBody::new()
            .text("fields", fields)
            .text("options", options);
        self.invoker.call_endpoint(&WSS, Some(&codes), body).await
    }

    /// Daily time series.
    pub async fn wsd(
        &self,
        codes: impl Into<Codes>,
        fields: &str,
        begin_time: impl Into<DateArg>,
        end_time: impl Into<DateArg>,
        options: &str,
    ) -> Result<Option<Table>, InvokerError> {
        self.series(&WSD, codes.into(), fields, begin_time.into(), end_time.into(), options)
            .await
    }

    /// Minute bars.
    pub async fn wsi(
        &self,
        codes: impl Into<Codes>,
        fields: &str,
        begin_time: impl Into<DateArg>,
        end_time: impl Into<DateArg>,
        options: &str,
    ) -> Result<Option<Table>, InvokerError> {
        self.series(&WSI, codes.into(), fields, begin_time.into(), end_time.into(), options)
            .await
    }

    /// Intraday ticks.
    pub async fn wst(
        &self,
        codes: impl Into<Codes>,
        fields: &str,
        begin_time: impl Into<DateArg>,
        end_time: impl Into<DateArg>,
        options: &str,
    ) -> Result<Option<Table>, InvokerError> {
        self.series(&WST, codes.into(), fields, begin_time.into(), end_time.into(), options)
            .await
    }

    /// Real-time quotes.
    pub async fn wsq(
        &self,
        codes: impl Into<Codes>,
        fields: &str,
        options: &str,
    ) -> Result<Option<Table>, InvokerError> {
        let codes = codes.into();
        let body = RequestBody::new()
            .text("fields", fields)
            .text("options", options);
        self.invoker.call_endpoint(&WSQ, Some(&codes), body).await
    }

    /// Economic database series.
    pub async fn edb(
        &self,
        codes: impl Into<Codes>,
        begin_time: impl Into<DateArg>,
        end_time: impl Into<DateArg>,
        options: &str,
    ) -> Result<Option<Table>, InvokerError> {
        let codes = codes.into();
        let body = RequestBody::new()
            .date("beginTime", Some(&begin_time.into()), EDB.date_mode)
            .date("endTime", Some(&end_time.into()), EDB.date_mode)
            .text("options", options);
        self.invoker.call_endpoint(&EDB, Some(&codes), body).await
    }

    /// The trading day `offset` days away from `begin_time`.
    pub async fn tdaysoffset(
        &self,
        offset: i64,
        begin_time: impl Into<DateArg>,
        options: &str,
    ) -> Result<Option<String>, InvokerError> {
        let body = RequestBody::new()
            .value("offset", offset)
            .date("beginTime", Some(&begin_time.into()), DateMode::Date)
            .text("options", options);
        let value = self.invoker.public_post(TDAYSOFFSET, &body).await?;
        Ok(value.and_then(|v| match v.get("Date") {
            Some(Value::String(date)) => Some(date.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }))
    }

    /// Trading days in a range, as returned by the gateway.
    pub async fn tdays(
        &self,
        begin_time: impl Into<DateArg>,
        end_time: impl Into<DateArg>,
        options: &str,
    ) -> Result<Option<Value>, InvokerError> {
        let body = RequestBody::new()
            .date("beginTime", Some(&begin_time.into()), DateMode::Date)
            .date("endTime", Some(&end_time.into()), DateMode::Date)
            .text("options", options);
        self.invoker.public_post(TDAYS, &body).await
    }

    async fn series(
        &self,
        spec: &EndpointSpec,
        codes: Codes,
        fields: &str,
        begin_time: DateArg,
        end_time: DateArg,
        options: &str,
    ) -> Result<Option<Table>, InvokerError> {
        let body = RequestBody::new()
            .text("fields", fields)
            .date("beginTime", Some(&begin_time), spec.date_mode)
            .date("endTime", Some(&end_time), spec.date_mode)
            .text("options", options);
        self.invoker.call_endpoint(spec, Some(&codes), body).await
    }
}
