use std::{path::Path, sync::Arc};

use serde_json::Value;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    config::InvokerConfig,
    errors::{ConfigSnafu, InvokerError},
    providers::endpoint::RequestBody,
    transport::{HttpTransport, Transport},
};

/// Posts JSON bodies to one provider's gateway prefix.
///
/// Provider-specific invokers wrap this and only decide paths and field names.
#[derive(Clone)]
pub struct RestInvoker {
    config: InvokerConfig,
    transport: Arc<dyn Transport>,
}

impl RestInvoker {
    /// Creates an invoker backed by [`HttpTransport`].
    pub fn new(config: InvokerConfig) -> Result<Self, InvokerError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Reads an [`InvokerConfig`] TOML file and creates an HTTP-backed invoker.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, InvokerError> {
        let config = InvokerConfig::load(path).context(ConfigSnafu)?;
        Self::new(config)
    }

    pub fn with_transport(config: InvokerConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Full URL for an endpoint path such as `wsd/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path.trim_start_matches('/'))
    }

    /// POSTs `body` to `path`.
    ///
    /// A 200 response yields its decoded JSON (`None` if it was not JSON). Any
    /// other status becomes [`InvokerError::Api`] carrying the status, the
    /// provider's `errcode`/`message` and the raw body.
    pub async fn public_post(
        &self,
        path: &str,
        body: &RequestBody,
    ) -> Result<Option<Value>, InvokerError> {
        let url = self.url(path);
        debug!(%url, "POST");

        let response = self.transport.post_json(&url, &body.to_json()).await?;
        if response.status != 200 {
            return Err(InvokerError::from_response(response.status, response.body));
        }
        Ok(response.body)
    }
}

impl std::fmt::Debug for RestInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestInvoker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
