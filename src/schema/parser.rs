use toml::{Table, Value};

use super::truthy::is_truthy;
use super::SchemaError;
use crate::config::ConfigStore;

/// Metadata field marking a key as required.
const REQUIRED_FIELD: &str = "required";

/// Metadata field holding a key's default value.
const DEFAULT_FIELD: &str = "default";

/// A parsed configuration schema.
///
/// Every top-level key of the schema source is *defined*. A key is *required*
/// when its `required` field is truthy (see [`is_truthy`](super::is_truthy)),
/// and has a *default* when its metadata contains a `default` field, whatever
/// its value. Other metadata fields are ignored.
///
/// ## Example
///
/// ```
/// use dragon_cfg::Schema;
///
/// let schema = Schema::from_toml_str(
///     r#"
///     a = { required = true }
///     b = { default = 5 }
///     c = {}
///     "#,
/// )?;
///
/// assert_eq!(schema.defined_keys(), ["a", "b", "c"]);
/// assert_eq!(schema.required_keys(), ["a"]);
/// assert_eq!(schema.default_value("b").and_then(|v| v.as_integer()), Some(5));
/// # Ok::<(), dragon_cfg::SchemaError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    defined: Vec<String>,
    required: Vec<String>,
    defaults: Table,
}

impl Schema {
    /// Parses a schema table.
    pub fn from_table(table: Table) -> Self {
        let mut schema = Self::default();
        for (key, entry) in table {
            schema.parse_entry(key, entry);
        }
        schema
    }

    /// Parses a schema from an arbitrary value, failing if it is not a table.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        match value {
            Value::Table(table) => Ok(Self::from_table(table)),
            other => Err(SchemaError::InvalidSchema(format!(
                "expected a table, got {} `{}`",
                other.type_str(),
                other
            ))),
        }
    }

    /// Parses a schema held in a configuration store.
    pub fn from_store(store: &ConfigStore) -> Result<Self, SchemaError> {
        Self::from_value(Value::Table(store.get_array_copy()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SchemaError> {
        let table: Table = toml::from_str(contents)
            .map_err(|e| SchemaError::InvalidSchema(e.to_string()))?;
        Ok(Self::from_table(table))
    }

    fn parse_entry(&mut self, key: String, entry: Value) {
        let Value::Table(mut meta) = entry else {
            self.defined.push(key);
            return;
        };

        if meta.get(REQUIRED_FIELD).is_some_and(is_truthy) {
            self.required.push(key.clone());
        }
        if let Some(default) = meta.remove(DEFAULT_FIELD) {
            self.defaults.insert(key.clone(), default);
        }
        self.defined.push(key);
    }

    /// Every key the schema mentions, in schema order.
    pub fn defined_keys(&self) -> &[String] {
        &self.defined
    }

    /// Keys whose `required` field is truthy, in schema order.
    pub fn required_keys(&self) -> &[String] {
        &self.required
    }

    /// Default values keyed by configuration key.
    pub fn default_values(&self) -> &Table {
        &self.defaults
    }

    pub fn is_defined(&self, key: &str) -> bool {
        self.defined.iter().any(|k| k == key)
    }

    pub fn is_required(&self, key: &str) -> bool {
        self.required.iter().any(|k| k == key)
    }

    pub fn default_value(&self, key: &str) -> Option<&Value> {
        self.defaults.get(key)
    }
}

impl TryFrom<Value> for Schema {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl TryFrom<&ConfigStore> for Schema {
    type Error = SchemaError;

    fn try_from(store: &ConfigStore) -> Result<Self, Self::Error> {
        Self::from_store(store)
    }
}
