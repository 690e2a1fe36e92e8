use std::{fs, path::Path};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::error;

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the expected shape.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not acceptable.
    #[error("Invalid config value for `{field}`: {message}")]
    Invalid { field: String, message: String },
}

/// Reads a TOML file and deserializes it into `T`.
pub fn read_toml_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| {
        error!("Failed to read config file {}: {:?}", path.display(), source);
        ConfigError::Read {
            path: path.display().to_string(),
            source,
        }
    })?;

    toml::from_str(&content).map_err(|e| {
        error!("Failed to parse config file {}: {:?}", path.display(), e);
        ConfigError::Parse(e)
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde::Deserialize;
    use tempfile::NamedTempFile;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        base_url: String,
        limit: Option<u32>,
    }

    #[test]
    fn reads_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://localhost:5000/wind/\"\nlimit = 10").unwrap();

        let sample: Sample = read_toml_config(file.path()).unwrap();
        assert_eq!(sample.base_url, "http://localhost:5000/wind/");
        assert_eq!(sample.limit, Some(10));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = read_toml_config::<Sample>("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url = ").unwrap();

        let err = read_toml_config::<Sample>(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
