//! Gateway endpoints for each data provider.
//!
//! Both providers share one request path ([`endpoint::EndpointSpec`] driven
//! through [`crate::requests::RestInvoker::call_endpoint`]); the invokers here
//! only name the endpoints and their request keys.
//!
//! # Example
//!
//! ```no_run
//! use direst_invoker::{config::InvokerConfig, providers::IFinDInvoker};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = InvokerConfig::new("http://localhost:5000/iFind/")?.with_max_batch_size(500)?;
//! let ifind = IFinDInvoker::new(config)?;
//! let table = ifind
//!     .ths_date_query("SSE", "dateType:0,period:D,dateFormat:0", "2018-06-15", "2018-06-21")
//!     .await?;
//! if let Some(table) = table {
//!     println!("{} trading days", table.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod endpoint;
pub mod ifind;
pub mod wind;

pub use ifind::IFinDInvoker;
pub use wind::WindInvoker;
