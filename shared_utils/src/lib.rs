//! Helpers shared by the workspace crates: environment lookup and TOML config loading.

pub mod config;
pub mod env;

pub use config::{ConfigError, read_toml_config};
pub use env::{MissingEnvVarError, get_env_var};
