pub mod config;
mod error;
pub mod schema;

pub use config::{ConfigError, ConfigLoader, ConfigStore, KeyPath};
pub use error::Error;
pub use schema::{is_truthy, Schema, SchemaError};
pub use toml::{Table, Value};
