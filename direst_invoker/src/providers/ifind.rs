//! Provider B: the iFinD terminal behind the `/iFind/` gateway prefix.

use std::{path::Path, sync::Arc};

use crate::{
    config::InvokerConfig,
    errors::InvokerError,
    models::{codes::Codes, date_arg::DateArg, table::Table},
    providers::endpoint::{EndpointSpec, Orient, RequestBody},
    requests::RestInvoker,
    transport::Transport,
};

/// Most codes `THS_BasicData` accepts in one call.
pub const BASIC_DATA_MAX_CODES: usize = 8000;

const DATE_SERIAL: EndpointSpec =
    EndpointSpec::new("THS_DateSerial/", Orient::Columns).codes("thscode");
const HIGH_FREQUENCE_SEQUENCE: EndpointSpec =
    EndpointSpec::new("THS_HighFrequenceSequence/", Orient::Columns)
        .codes("thscode")
        .datetime();
const REALTIME_QUOTES: EndpointSpec =
    EndpointSpec::new("THS_RealtimeQuotes/", Orient::Columns).codes("thscode");
const HISTORY_QUOTES: EndpointSpec =
    EndpointSpec::new("THS_HistoryQuotes/", Orient::Columns).codes("thscode");
const SNAPSHOT: EndpointSpec = EndpointSpec::new("THS_Snapshot/", Orient::Columns)
    .codes("thscode")
    .datetime();
const BASIC_DATA: EndpointSpec = EndpointSpec::new("THS_BasicData/", Orient::Columns)
    .codes("thsCode")
    .max_codes(BASIC_DATA_MAX_CODES);
const DATA_POOL: EndpointSpec = EndpointSpec::new("THS_DataPool/", Orient::Columns);
const EDB_QUERY: EndpointSpec =
    EndpointSpec::new("THS_EDBQuery/", Orient::Columns).codes("indicators");
const DATE_QUERY: EndpointSpec = EndpointSpec::new("THS_DateQuery/", Orient::Columns);

#[derive(Debug, Clone)]
pub struct IFinDInvoker {
    invoker: RestInvoker,
}

impl IFinDInvoker {
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

    /// Date series. `global_param` looks like `Days:Tradedays,Fill:Previous,Interval:D`.
    pub async fn ths_date_serial(
        &self,
        thscode: impl Into<Codes>,
        json_indicator: &str,
        json_param: &str,
        global_param: &str,
        begin_time: impl Into<DateArg>,
        end_time: impl Into<DateArg>,
    ) -> Result<Option<Table>, InvokerError> {
        let codes = thscode.into();
        let body = RequestBody::new()
            .text("jsonIndicator", json_indicator)
            .text("jsonparam", json_param)
            .text("globalparam", global_param)
            .date("begintime", Some(&begin_time.into()), DATE_SERIAL.date_mode)
            .date("endtime", Some(&end_time.into()), DATE_SERIAL.date_mode);
        self.invoker
            .call_endpoint(&DATE_SERIAL, Some(&codes), body)
            .await
    }

    /// Intraday sequence; times look like `2018-05-15 09:30:00`.
    pub async fn ths_high_frequence_sequence(
        &self,
        thscode: impl Into<Codes>,
        json_indicator: &str,
        json_param: &str,
        begin_time: impl Into<DateArg>,
        end_time: impl Into<DateArg>,
    ) -> Result<Option<Table>, InvokerError> {
        self.ranged(
            &HIGH_FREQUENCE_SEQUENCE,
            thscode.into(),
            json_indicator,
            json_param,
            begin_time.into(),
            end_time.into(),
        )
        .await
    }

    pub async fn ths_realtime_quotes(
        &self,
        thscode: impl Into<Codes>,
        json_indicator: &str,
        json_param: &str,
    ) -> Result<Option<Table>, InvokerError> {
        let codes = thscode.into();
        let body = RequestBody::new()
            .text("jsonIndicator", json_indicator)
            .text("jsonparam", json_param);
        self.invoker
            .call_endpoint(&REALTIME_QUOTES, Some(&codes), body)
            .await
    }

    /// Historical quotes. `json_param` looks like `period:D,pricetype:1,rptcategory:1`.
    pub async fn ths_history_quotes(
        &self,
        thscode: impl Into<Codes>,
        json_indicator: &str,
        json_param: &str,
        begin_time: impl Into<DateArg>,
        end_time: impl Into<DateArg>,
    ) -> Result<Option<Table>, InvokerError> {
        self.ranged(
            &HISTORY_QUOTES,
            thscode.into(),
            json_indicator,
            json_param,
            begin_time.into(),
            end_time.into(),
        )
        .await
    }

    /// Intraday snapshots. The gateway only accepts `dataType:Original` as `json_param`.
    pub async fn ths_snapshot(
        &self,
        thscode: impl Into<Codes>,
        json_indicator: &str,
        json_param: &str,
        begin_time: impl Into<DateArg>,
        end_time: impl Into<DateArg>,
    ) -> Result<Option<Table>, InvokerError> {
        self.ranged(
            &SNAPSHOT,
            thscode.into(),
            json_indicator,
            json_param,
            begin_time.into(),
            end_time.into(),
        )
        .await
    }

    /// Basic data, split into calls of at most [`BASIC_DATA_MAX_CODES`] codes
    /// (or the configured cap, if smaller).
    pub async fn ths_basic_data(
        &self,
        ths_code: impl Into<Codes>,
        indicator_name: &str,
        param_option: &str,
    ) -> Result<Option<Table>, InvokerError> {
        let codes = ths_code.into();
        let body = RequestBody::new()
            .text("indicatorName", indicator_name)
            .text("paramOption", param_option);
        self.invoker
            .call_endpoint(&BASIC_DATA, Some(&codes), body)
            .await
    }

    /// Data pool query. `fun_option` looks like `date:Y,security_name:Y,thscode:Y`.
    pub async fn ths_data_pool(
        &self,
        data_pool_name: &str,
        param_name: &str,
        fun_option: &str,
    ) -> Result<Option<Table>, InvokerError> {
        let body = RequestBody::new()
            .text("DataPoolname", data_pool_name)
            .text("paramname", param_name)
            .text("FunOption", fun_option);
        self.invoker.call_endpoint(&DATA_POOL, None, body).await
    }

    /// EDB indicators such as `M001620326,M002822183`.
    pub async fn ths_edb_query(
        &self,
        indicators: impl Into<Codes>,
        begin_time: impl Into<DateArg>,
        end_time: impl Into<DateArg>,
    ) -> Result<Option<Table>, InvokerError> {
        let codes = indicators.into();
        let body = RequestBody::new()
            .date("begintime", Some(&begin_time.into()), EDB_QUERY.date_mode)
            .date("endtime", Some(&end_time.into()), EDB_QUERY.date_mode);
        self.invoker
            .call_endpoint(&EDB_QUERY, Some(&codes), body)
            .await
    }

    /// Exchange calendar. `params` looks like `dateType:0,period:D,dateFormat:0`.
    pub async fn ths_date_query(
        &self,
        exchange: &str,
        params: &str,
        begin_time: impl Into<DateArg>,
        end_time: impl Into<DateArg>,
    ) -> Result<Option<Table>, InvokerError> {
        let body = RequestBody::new()
            .text("exchange", exchange)
            .text("params", params)
            .date("begintime", Some(&begin_time.into()), DATE_QUERY.date_mode)
            .date("endtime", Some(&end_time.into()), DATE_QUERY.date_mode);
        self.invoker.call_endpoint(&DATE_QUERY, None, body).await
    }

    async fn ranged(
        &self,
        spec: &EndpointSpec,
        codes: Codes,
        json_indicator: &str,
        json_param: &str,
        begin_time: DateArg,
        end_time: DateArg,
    ) -> Result<Option<Table>, InvokerError> {
        let body = RequestBody::new()
            .text("jsonIndicator", json_indicator)
            .text("jsonparam", json_param)
            .date("begintime", Some(&begin_time), spec.date_mode)
            .date("endtime", Some(&end_time), spec.date_mode);
        self.invoker.call_endpoint(spec, Some(&codes), body).await
    }
}
