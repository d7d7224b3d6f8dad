use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("invalid schema source: {0}")]
    InvalidSchema(String),

    #[error("missing required keys: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
}
