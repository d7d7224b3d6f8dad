use toml::Table;

use super::{Schema, SchemaError};

/// Inserts schema defaults for top-level keys missing from `data`.
///
/// Keys already present are left alone, whatever their value. Returns the
/// number of keys filled in.
pub fn apply_defaults(schema: &Schema, data: &mut Table) -> usize {
    let mut filled = 0;
    for (key, default) in schema.default_values() {
        if !data.contains_key(key) {
            data.insert(key.clone(), default.clone());
            filled += 1;
        }
    }
    filled
}

/// Required keys absent from the top level of `data`, in schema order.
pub fn missing_required(schema: &Schema, data: &Table) -> Vec<String> {
    schema
        .required_keys()
        .iter()
        .filter(|key| !data.contains_key(key.as_str()))
        .cloned()
        .collect()
}

/// Checks that every required key is present. Keys the schema does not
/// define are accepted.
pub fn validate(schema: &Schema, data: &Table) -> Result<(), SchemaError> {
    let missing = missing_required(schema, data);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingRequired(missing))
    }
}
