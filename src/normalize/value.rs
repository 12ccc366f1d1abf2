//! Generic, catalog-independent coercions from untyped JSON.

use serde_json::Value;

/// Case-insensitive key lookup. Returns `None` when `source` is not an
/// object or no casing of `key` is present. An exact-case hit wins over a
/// case-folded one.
pub fn get_key<'a>(source: &'a Value, key: &str) -> Option<&'a Value> {
    let map = source.as_object()?;
    if let Some(v) = map.get(key) {
        return Some(v);
    }
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

/// Coerce any JSON value to a display string. Null/absent become `""`;
/// strings pass through unquoted; objects and arrays are re-serialized.
/// Never fails.
pub fn to_string_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => serde_json::to_string(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Coerce any JSON value to a boolean. Numbers are non-zero-truthy;
/// strings match `true/1/yes` and `false/0/no/""` case-insensitively;
/// anything else yields `fallback`.
pub fn to_boolean_value(value: Option<&Value>, fallback: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" | "" => false,
            _ => fallback,
        },
        _ => fallback,
    }
}

/// Shorthand: string coercion of a case-insensitive field lookup.
pub fn string_at(source: &Value, key: &str) -> String {
    to_string_value(get_key(source, key))
}

/// A field as a non-empty trimmed string, when it has one.
pub fn non_empty_string_at(source: &Value, key: &str) -> Option<String> {
    let s = string_at(source, key);
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A field as a TCP port, accepting numbers and numeric strings.
pub fn port_at(source: &Value, key: &str) -> Option<u16> {
    match get_key(source, key)? {
        Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A field as a list of non-empty strings. Non-array and non-string
/// elements are dropped, not errors.
pub fn string_list_at(source: &Value, key: &str) -> Vec<String> {
    match get_key(source, key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
