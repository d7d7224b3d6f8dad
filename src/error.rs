use crate::config::ConfigError;
use crate::schema::SchemaError;
use thiserror::Error;

/// Top-level error type for the dragon-cfg library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}
