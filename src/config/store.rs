use std::ops::Index;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use toml::{Table, Value};

use super::builder::ConfigLoader;
use super::key::KeyPath;
use super::ConfigError;
use crate::schema::{self, Schema};

/// An immutable, queryable configuration object.
///
/// A store owns one table of nested configuration values. Values are read by
/// key path: each segment descends one table level.
///
/// Construction from arbitrary input never fails. Input that is not a table
/// produces an empty store whose [`is_valid`](Self::is_valid) returns `false`,
/// and every query on it still answers deterministically.
///
/// ## Example
///
/// ```
/// use dragon_cfg::ConfigStore;
///
/// let store = ConfigStore::from_toml_str(
///     r#"
///     [server]
///     host = "localhost"
///     port = 8080
///     "#,
/// );
///
/// assert!(store.has_key(&["server", "port"]));
/// assert_eq!(store.get::<u16>(&["server", "port"])?, 8080);
/// assert!(!store.has_key(&["server", "tls", "cert"]));
/// # Ok::<(), dragon_cfg::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
    data: Table,
    valid: bool,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Table::new())
    }
}

impl ConfigStore {
    /// Creates a valid store that owns `data`.
    pub fn new(data: Table) -> Self {
        Self { data, valid: true }
    }

    /// Creates a store from an arbitrary value.
    ///
    /// Anything other than a table yields an empty, invalid store.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Table(data) => Self::new(data),
            _ => Self::invalid(),
        }
    }

    /// Parses TOML text into a store. Unparseable text yields an empty,
    /// invalid store.
    pub fn from_toml_str(contents: &str) -> Self {
        match toml::from_str::<Table>(contents) {
            Ok(data) => Self::new(data),
            Err(_) => Self::invalid(),
        }
    }

    /// Creates a store and reconciles it with `schema`.
    ///
    /// Defaults fill top-level keys that are absent. The store is invalid if
    /// `value` is not a table or if a required key is still absent afterwards.
    pub fn with_schema(value: Value, schema: &Schema) -> Self {
        let mut store = Self::from_value(value);
        schema::apply_defaults(schema, &mut store.data);
        if !schema::missing_required(schema, &store.data).is_empty() {
            store.valid = false;
        }
        store
    }

    /// Loads a single required TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::new().with_file(path, true).build()
    }

    /// Loads the first of `candidates` that exists.
    pub fn from_first_file<I, P>(candidates: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        ConfigLoader::new().with_fallback_files(candidates).build()
    }

    fn invalid() -> Self {
        Self {
            data: Table::new(),
            valid: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns `true` if every segment of `keys` resolves.
    ///
    /// All segments but the last must name nested tables. An empty path, a
    /// missing segment, or a non-table in the middle of the path gives `false`.
    pub fn has_key<K: AsRef<str>>(&self, keys: &[K]) -> bool {
        self.lookup(keys).is_some()
    }

    /// Returns the value at `keys`.
    ///
    /// Fails with [`ConfigError::KeyNotFound`] when [`has_key`](Self::has_key)
    /// would return `false` for the same path.
    pub fn get_key<K: AsRef<str>>(&self, keys: &[K]) -> Result<&Value, ConfigError> {
        self.lookup(keys).ok_or_else(|| {
            let path = KeyPath::new(keys.iter().map(AsRef::<str>::as_ref));
            ConfigError::KeyNotFound(path.to_string())
        })
    }

    /// [`has_key`](Self::has_key) for a comma-joined key such as `"server, port"`.
    pub fn has_joined_key(&self, joined: &str) -> bool {
        self.has_key(KeyPath::from_joined(joined).segments())
    }

    /// [`get_key`](Self::get_key) for a comma-joined key such as `"server, port"`.
    pub fn get_joined_key(&self, joined: &str) -> Result<&Value, ConfigError> {
        self.get_key(KeyPath::from_joined(joined).segments())
    }

    /// Deserializes the value at `keys` into `T`.
    pub fn get<T: DeserializeOwned>(&self, keys: &[impl AsRef<str>]) -> Result<T, ConfigError> {
        self.get_key(keys)?
            .clone()
            .try_into()
            .map_err(ConfigError::DeserializeError)
    }

    /// Returns a snapshot of all configuration values.
    pub fn get_all(&self) -> Table {
        self.data.clone()
    }

    /// Returns a copy of the underlying table, suitable as raw input for
    /// another store or a [`Schema`].
    pub fn get_array_copy(&self) -> Table {
        self.data.clone()
    }

    /// Top-level keys in insertion order.
    pub fn get_keys(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over top-level entries in insertion order.
    pub fn iter(&self) -> toml::map::Iter<'_> {
        self.data.iter()
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(&self.data)?)
    }

    fn lookup<K: AsRef<str>>(&self, keys: &[K]) -> Option<&Value> {
        let (last, parents) = keys.split_last()?;

        let mut table = &self.data;
        for key in parents {
            match table.get(key.as_ref()) {
                Some(Value::Table(nested)) => table = nested,
                _ => return None,
            }
        }

        table.get(last.as_ref())
    }
}

impl From<Table> for ConfigStore {
    fn from(data: Table) -> Self {
        Self::new(data)
    }
}

impl From<Value> for ConfigStore {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl Index<&str> for ConfigStore {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        &self.data[key]
    }
}

impl<'a> IntoIterator for &'a ConfigStore {
    type Item = (&'a String, &'a Value);
    type IntoIter = toml::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl Serialize for ConfigStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConfigStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Table::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigStore {
        ConfigStore::from_toml_str(
            r#"
            random_string = "test_value"
            positive_integer = 42
            negative_integer = -256
            positive_boolean = true
            negative_boolean = false
            list = [1, 2, 3]

            [level1.level2.level3]
            level4_key = "level4_value"
            "#,
        )
    }

    #[test]
    fn test_flat_lookup() {
        let store = sample();
        assert!(store.is_valid());
        assert!(store.has_key(&["random_string"]));
        assert_eq!(
            store.get_key(&["random_string"]).unwrap().as_str(),
            Some("test_value")
        );
        assert_eq!(
            store.get_key(&["negative_integer"]).unwrap().as_integer(),
            Some(-256)
        );
        assert_eq!(
            store.get_key(&["negative_boolean"]).unwrap().as_bool(),
            Some(false)
        );
    }

    #[test]
    fn test_nested_lookup() {
        let store = sample();
        let path = ["level1", "level2", "level3", "level4_key"];

        assert!(store.has_key(&path));
        assert_eq!(store.get_key(&path).unwrap().as_str(), Some("level4_value"));
        assert!(store.has_key(&["level1", "level2"]));
        assert!(store.get_key(&["level1", "level2"]).unwrap().is_table());
        assert!(!store.has_key(&["level1", "level2", "nonexistent"]));
    }

    #[test]
    fn test_joined_key_matches_segments() {
        let store = sample();
        assert!(store.has_joined_key("level1, level2, level3, level4_key"));
        assert_eq!(
            store.get_joined_key("level1,level2,level3,level4_key").unwrap(),
            store
                .get_key(&["level1", "level2", "level3", "level4_key"])
                .unwrap()
        );
        assert!(!store.has_joined_key("level1, nonexistent"));
    }

    #[test]
    fn test_joined_key_with_trailing_comma() {
        let store = sample();
        assert!(store.has_joined_key("level1, level2, level3, level4_key,"));
        assert!(store.has_joined_key("random_string,"));
        assert!(!store.has_joined_key(","));
    }

    #[test]
    fn test_has_key_never_descends_into_scalars_or_arrays() {
        let store = sample();
        assert!(!store.has_key(&["random_string", "anything"]));
        assert!(!store.has_key(&["list", "0"]));
        assert!(!store.has_key(&["level1", "level2", "level3", "level4_key", "deeper"]));
    }

    #[test]
    fn test_empty_path() {
        let store = sample();
        let empty: [&str; 0] = [];
        assert!(!store.has_key(&empty));
        assert!(matches!(
            store.get_key(&empty),
            Err(ConfigError::KeyNotFound(_))
        ));
        assert!(!store.has_joined_key(""));
    }

    #[test]
    fn test_get_key_missing_reports_path() {
        let store = sample();
        match store.get_key(&["level1", "missing", "leaf"]) {
            Err(ConfigError::KeyNotFound(path)) => assert_eq!(path, "level1.missing.leaf"),
            other => panic!("expected KeyNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_typed_get() {
        let store = sample();
        assert_eq!(store.get::<i64>(&["positive_integer"]).unwrap(), 42);
        assert_eq!(store.get::<Vec<u8>>(&["list"]).unwrap(), vec![1, 2, 3]);
        assert!(matches!(
            store.get::<bool>(&["random_string"]),
            Err(ConfigError::DeserializeError(_))
        ));
    }

    #[test]
    fn test_non_table_input_is_invalid() {
        let store = ConfigStore::from_value(Value::String("not a table".into()));
        assert!(!store.is_valid());
        assert!(store.is_empty());
        assert!(!store.has_key(&["anything"]));
        assert!(store.get_keys().is_empty());
    }

    #[test]
    fn test_unparseable_toml_is_invalid() {
        let store = ConfigStore::from_toml_str("this is = = not toml");
        assert!(!store.is_valid());
        assert!(store.is_empty());
    }

    #[test]
    fn test_keys_keep_insertion_order() {
        let store = ConfigStore::from_toml_str(
            r#"
            zeta = 1
            alpha = 2
            mid = 3
            "#,
        );
        assert_eq!(store.get_keys(), vec!["zeta", "alpha", "mid"]);
        let iterated: Vec<&String> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(iterated, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_copies_do_not_alias() {
        let store = sample();
        let mut copy = store.get_array_copy();
        copy.insert("random_string".into(), Value::Integer(0));

        assert_eq!(store["random_string"].as_str(), Some("test_value"));
        assert_eq!(ConfigStore::new(store.get_array_copy()), store);
    }

    #[test]
    fn test_get_all_is_a_snapshot() {
        let store = sample();
        let mut all = store.get_all();
        all.insert("positive_integer".into(), Value::Integer(0));
        all.remove("random_string");
        if let Some(Value::Table(level1)) = all.get_mut("level1") {
            level1.clear();
        }

        assert_eq!(store["positive_integer"].as_integer(), Some(42));
        assert!(store.has_key(&["random_string"]));
        assert!(store.has_key(&["level1", "level2", "level3", "level4_key"]));
        assert_eq!(store.get_all(), store.get_array_copy());
    }

    #[test]
    fn test_container_surface() {
        let store = sample();
        assert_eq!(store.len(), 7);
        assert_eq!((&store).into_iter().count(), store.len());
        assert_eq!(store["positive_integer"].as_integer(), Some(42));
    }

    #[test]
    fn test_serialize_round_trip() {
        let store = sample();
        let text = store.to_toml_string().unwrap();
        assert_eq!(ConfigStore::from_toml_str(&text), store);

        let parsed: ConfigStore = toml::from_str(&text).unwrap();
        assert_eq!(parsed, store);
    }

    #[test]
    fn test_with_schema_fills_defaults() {
        let schema = Schema::from_toml_str(
            r#"
            name = { required = true }
            port = { default = 8080 }
            "#,
        )
        .unwrap();

        let raw: Table = toml::from_str(r#"name = "svc""#).unwrap();
        let store = ConfigStore::with_schema(Value::Table(raw), &schema);
        assert!(store.is_valid());
        assert_eq!(store.get::<u16>(&["port"]).unwrap(), 8080);
    }

    #[test]
    fn test_with_schema_missing_required_is_invalid() {
        let schema = Schema::from_toml_str("name = { required = \"yes\" }").unwrap();
        let store = ConfigStore::with_schema(Value::Table(Table::new()), &schema);
        assert!(!store.is_valid());
    }
}
