use std::path::{Path, PathBuf};

use toml::Table;

use super::env::EnvSource;
use super::file::{FallbackFileSource, FileSource};
use super::source::{merge_at_path, ConfigSource, TableSource};
use super::{ConfigError, ConfigStore};
use crate::schema::{self, Schema};

/// Builder for loading a [`ConfigStore`] from several sources.
///
/// Sources are merged in registration order, with later sources overriding
/// earlier ones. Nested tables are merged recursively; other values
/// (including arrays) are replaced entirely.
///
/// When a [`Schema`] is attached, its defaults fill top-level keys that no
/// source provided, and the build fails if a required key is still missing.
///
/// ## Example
///
/// ```no_run
/// use dragon_cfg::{ConfigLoader, Schema};
///
/// let schema = Schema::from_toml_str(
///     r#"
///     name = { required = true }
///     port = { default = 8080 }
///     "#,
/// )?;
///
/// let store = ConfigLoader::new()
///     .with_fallback_files(["config/local.toml", "config/default.toml"])
///     .with_env("MYAPP", "__")
///     .with_schema(schema)
///     .build()?;
///
/// let port: u16 = store.get(&["port"])?;
/// # Ok::<(), dragon_cfg::Error>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigLoader {
    sources: Vec<Box<dyn ConfigSource>>,
    schema: Option<Schema>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds the first existing file among `candidates`.
    ///
    /// The build fails if none of them exists.
    pub fn with_fallback_files<I, P>(self, candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.with_source(FallbackFileSource::new(candidates))
    }

    /// Loads overrides from environment variables with the given prefix.
    ///
    /// See [`EnvSource`] for the naming scheme.
    ///
    /// # Panics
    ///
    /// Panics if `separator` is empty.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Adds an in-memory table.
    pub fn with_table(self, table: Table) -> Self {
        self.with_source(TableSource::new(table))
    }

    /// Adds a custom source.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Reconciles the merged result against `schema`.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Loads and merges every source, then applies the schema if one is set.
    pub fn build(self) -> Result<ConfigStore, ConfigError> {
        let mut merged = Table::new();

        for source in &self.sources {
            for entry in source.entries()? {
                merge_at_path(&mut merged, &entry.path, entry.value);
            }
        }

        if let Some(schema) = &self.schema {
            let filled = schema::apply_defaults(schema, &mut merged);
            if filled > 0 {
                log::debug!("filled {filled} config keys from schema defaults");
            }
            schema::validate(schema, &merged)?;
        }

        Ok(ConfigStore::new(merged))
    }
}
