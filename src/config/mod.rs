//! Configuration stores and the sources they are loaded from.

mod builder;
mod env;
mod error;
mod file;
mod key;
mod source;
mod store;

#[cfg(test)]
mod proptests;

pub use builder::ConfigLoader;
pub use env::EnvSource;
pub use error::ConfigError;
pub use file::{FallbackFileSource, FileSource};
pub use key::KeyPath;
pub use source::{ConfigEntry, ConfigSource, TableSource};
pub use store::ConfigStore;
