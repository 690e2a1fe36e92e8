//! Client for the DIRestPlus gateway, which exposes Wind and iFinD terminal
//! queries as HTTP/JSON endpoints.
//!
//! Each call builds a flat JSON body, POSTs it to a fixed path under the
//! provider prefix and reads the answer into a [`Table`]. Code lists longer
//! than the configured cap are split across sequential requests and the
//! partial tables stacked back together (see [`requests::execute_batched`]).

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod providers;
pub mod requests;
pub mod transport;

pub use config::InvokerConfig;
pub use errors::InvokerError;
pub use models::{codes::Codes, date_arg::DateArg, table::Table};
pub use providers::{IFinDInvoker, WindInvoker};
