//! HTTP transport for the gateway.
//!
//! [`Transport`] is the seam between request building and the network: the
//! invoker only needs "POST this JSON, give me the status and whatever JSON came
//! back". [`HttpTransport`] is the reqwest-backed implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    config::InvokerConfig,
    errors::{ClientBuildSnafu, InvokerError, RequestSnafu},
};

/// Status plus decoded body of one gateway response.
///
/// `body` is `None` when the response was empty or not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Option<Value>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` as JSON to `url`.
    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, InvokerError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &InvokerConfig) -> Result<Self, InvokerError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context(ClientBuildSnafu)?;

        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, InvokerError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context(RequestSnafu)?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.context(RequestSnafu)?;
        let body = match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(url, status, error = %e, "response body is not JSON");
                None
            }
        };

        Ok(RawResponse { status, body })
    }
}
