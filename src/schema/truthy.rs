use toml::Value;

/// String spellings accepted as `true` in schema metadata.
const TRUTHY_STRINGS: [&str; 9] = [
    "true", "True", "TRUE", "y", "Y", "yes", "Yes", "YES", "√",
];

/// Returns `true` only for values on a fixed whitelist.
///
/// Matching is exact in both type and value: `true`, the integer `1`, and the
/// whitelisted strings. No trimming or case folding is applied, so
/// `"1"`, `0`, `1.0`, and `"Yes "` are all false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Boolean(b) => *b,
        Value::Integer(i) => *i == 1,
        Value::String(s) => TRUTHY_STRINGS.contains(&s.as_str()),
        _ => false,
    }
}
