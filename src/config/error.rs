use std::path::PathBuf;
use thiserror::Error;

use crate::schema::SchemaError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("required config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("none of the candidate config files exist: {0:?}")]
    NoConfigFile(Vec<PathBuf>),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to deserialize config value: {0}")]
    DeserializeError(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}
