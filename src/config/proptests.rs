//! Property-based tests for key lookup.

use super::ConfigStore;
use proptest::prelude::*;
use toml::{Table, Value};

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z_]{1,8}"
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        any::<bool>().prop_map(Value::Boolean),
        "[ -~]{0,16}".prop_map(Value::String),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(key_strategy(), inner, 0..4)
                .prop_map(|map| Value::Table(map.into_iter().collect())),
        ]
    })
}

fn table_strategy() -> impl Strategy<Value = Table> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 0..6)
        .prop_map(|map| map.into_iter().collect())
}

/// Nests `leaf` under `path`, outermost segment first.
fn nest(path: &[String], leaf: Value) -> Table {
    let mut value = leaf;
    for key in path[1..].iter().rev() {
        let mut table = Table::new();
        table.insert(key.clone(), value);
        value = Value::Table(table);
    }
    let mut root = Table::new();
    root.insert(path[0].clone(), value);
    root
}

/// Every path that exists in `table`, including intermediate tables.
fn all_paths(table: &Table, prefix: &mut Vec<String>, out: &mut Vec<(Vec<String>, Value)>) {
    for (key, value) in table {
        prefix.push(key.clone());
        out.push((prefix.clone(), value.clone()));
        if let Value::Table(nested) = value {
            all_paths(nested, prefix, out);
        }
        prefix.pop();
    }
}

proptest! {
    #[test]
    fn placed_value_round_trips(
        path in prop::collection::vec(key_strategy(), 1..6),
        leaf in value_strategy(),
    ) {
        let store = ConfigStore::new(nest(&path, leaf.clone()));

        prop_assert!(store.has_key(&path));
        prop_assert_eq!(store.get_key(&path).unwrap(), &leaf);
        prop_assert!(store.has_joined_key(&path.join(",")));
    }

    #[test]
    fn every_existing_path_is_found(table in table_strategy()) {
        let store = ConfigStore::new(table.clone());
        let mut paths = Vec::new();
        all_paths(&table, &mut Vec::new(), &mut paths);

        for (path, value) in paths {
            prop_assert!(store.has_key(&path));
            prop_assert_eq!(store.get_key(&path).unwrap(), &value);
        }
    }

    #[test]
    fn descending_past_a_non_table_is_missing(
        path in prop::collection::vec(key_strategy(), 1..4),
        leaf in scalar_strategy(),
        extra in prop::collection::vec(key_strategy(), 1..3),
    ) {
        let store = ConfigStore::new(nest(&path, leaf));
        let mut deeper = path.clone();
        deeper.extend(extra);

        prop_assert!(!store.has_key(&deeper));
        prop_assert!(store.get_key(&deeper).is_err());
    }

    #[test]
    fn missing_segment_is_missing(
        table in table_strategy(),
        path in prop::collection::vec(key_strategy(), 1..4),
    ) {
        // Upper-case keys never appear in generated tables.
        let mut missing = path;
        missing.push("MISSING".to_string());

        let store = ConfigStore::new(table);
        prop_assert!(!store.has_key(&missing));
    }

    #[test]
    fn array_copy_round_trip(table in table_strategy()) {
        let store = ConfigStore::new(table);
        let copy = ConfigStore::new(store.get_array_copy());

        prop_assert_eq!(copy.get_keys(), store.get_keys());
        prop_assert_eq!(copy, store);
    }
}
